use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Public view of a user account, as embedded in hoaxes and directory pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    /// Stored image name on the server; `None` means the default avatar
    #[serde(default)]
    pub image: Option<String>,
}

impl UserRef {
    pub fn new(id: i64, username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
            image: None,
        }
    }

    /// `displayName@username`, the way profile cards present an account
    pub fn handle(&self) -> String {
        format!("{}@{}", self.display_name, self.username)
    }

    /// Display name, falling back to the username when it is blank
    pub fn name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

/// Signup payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

/// Profile update payload
///
/// `image` carries the base64-encoded file content, or `None` to keep the
/// current image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub display_name: String,
    pub image: Option<String>,
}

/// Basic-auth credentials
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn serialize_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}
