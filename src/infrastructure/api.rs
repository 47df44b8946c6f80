//! Abstract Hoaxify service
//!
//! The feed and directory models never talk to the network themselves; the
//! runtime executes their requests through this trait. `HttpApi` is the
//! production implementation, tests plug in in-memory ones.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    Credentials, FeedQuery, FeedScope, Hoax, NewUser, Page, UserRef, UserUpdate,
};

/// Failure of a call to the service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("network error: {0}")]
    Network(String),
    /// The requested resource does not exist
    #[error("not found")]
    NotFound,
    /// The server answered with a non-success status
    #[error("{}", .message.as_deref().unwrap_or("request failed"))]
    Status {
        status: u16,
        message: Option<String>,
        validation_errors: BTreeMap<String, String>,
    },
    /// The response body did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
    /// A local resource (e.g. an image file) could not be read
    #[error("{0}")]
    Io(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: Some(message.into()),
            validation_errors: BTreeMap::new(),
        }
    }

    /// Field-level validation message reported by the server, if any
    pub fn validation_error(&self, field: &str) -> Option<&str> {
        match self {
            ApiError::Status {
                validation_errors, ..
            } => validation_errors.get(field).map(String::as_str),
            _ => None,
        }
    }

    pub fn validation_errors(&self) -> BTreeMap<String, String> {
        match self {
            ApiError::Status {
                validation_errors, ..
            } => validation_errors.clone(),
            _ => BTreeMap::new(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Error body produced by the service
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub validation_errors: Option<BTreeMap<String, String>>,
}

impl ApiErrorBody {
    pub fn into_error(self, status: u16) -> ApiError {
        if status == 404 {
            return ApiError::NotFound;
        }
        ApiError::Status {
            status: self.status.unwrap_or(status),
            message: self.message,
            validation_errors: self.validation_errors.unwrap_or_default(),
        }
    }
}

/// Remote operations the client depends on
#[async_trait]
pub trait HoaxifyApi: Send + Sync {
    /// Fetch a page for `Initial` and `Older` queries
    async fn fetch_feed_page(&self, scope: &FeedScope, query: FeedQuery)
        -> Result<Page<Hoax>, ApiError>;

    /// Fetch every hoax newer than the cursor of a `Newer` query
    async fn fetch_newer(&self, scope: &FeedScope, query: FeedQuery)
        -> Result<Vec<Hoax>, ApiError>;

    /// Count hoaxes newer than the cursor of a `NewerCount` query
    async fn fetch_newer_count(&self, scope: &FeedScope, query: FeedQuery) -> Result<u64, ApiError>;

    async fn fetch_user_page(&self, page_index: usize, page_size: usize)
        -> Result<Page<UserRef>, ApiError>;

    async fn fetch_user(&self, username: &str) -> Result<UserRef, ApiError>;

    async fn update_user(&self, user_id: i64, update: UserUpdate) -> Result<UserRef, ApiError>;

    async fn post_hoax(&self, content: &str) -> Result<Hoax, ApiError>;

    /// Authenticate with basic auth and return the account
    async fn login(&self, credentials: &Credentials) -> Result<UserRef, ApiError>;

    /// Create an account and return the server's confirmation message
    async fn signup(&self, user: &NewUser) -> Result<String, ApiError>;
}
