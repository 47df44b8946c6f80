use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserRef;

/// Server-assigned hoax identifier
///
/// Ids are assigned monotonically by the server, so ordering by id is ordering
/// by publication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoaxId(pub i64);

impl HoaxId {
    /// Cursor used when nothing is known yet; every real hoax is newer than it.
    pub const ZERO: HoaxId = HoaxId(0);

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for HoaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for HoaxId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// An authored post
///
/// Hoaxes are never mutated after they are fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hoax {
    pub id: HoaxId,
    pub content: String,
    /// Publication time; the service sends epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub user: UserRef,
}

impl Hoax {
    pub fn new(
        id: impl Into<HoaxId>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
        user: UserRef,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            timestamp,
            user,
        }
    }

    /// Publication time formatted in the local timezone
    pub fn local_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}
