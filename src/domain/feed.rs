use std::fmt;

use crate::domain::hoax::HoaxId;

/// Which hoaxes a feed shows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedScope {
    /// Hoaxes of every user
    Global,
    /// Hoaxes of a single author
    Author(String),
}

impl FeedScope {
    pub fn author(username: impl Into<String>) -> Self {
        Self::Author(username.into())
    }

    pub fn is_global(&self) -> bool {
        matches!(self, FeedScope::Global)
    }
}

impl fmt::Display for FeedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedScope::Global => write!(f, "global"),
            FeedScope::Author(username) => write!(f, "@{username}"),
        }
    }
}

/// Position-based query against the id-ordered hoax log
///
/// Cursors are hoax ids: `Older` asks for hoaxes strictly older than `before`,
/// `Newer` and `NewerCount` for hoaxes strictly newer than `after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedQuery {
    /// First page, newest first
    Initial { size: usize },
    /// Next page below the oldest known hoax
    Older { before: HoaxId, size: usize },
    /// Every hoax above the newest known one; the server decides the size
    Newer { after: HoaxId },
    /// Number of hoaxes above the newest known one
    NewerCount { after: HoaxId },
}

impl FeedQuery {
    pub fn cursor(&self) -> Option<HoaxId> {
        match self {
            FeedQuery::Initial { .. } => None,
            FeedQuery::Older { before, .. } => Some(*before),
            FeedQuery::Newer { after } | FeedQuery::NewerCount { after } => Some(*after),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scope_display() {
        assert_eq!(FeedScope::Global.to_string(), "global");
        assert_eq!(FeedScope::author("user1").to_string(), "@user1");
    }

    #[test]
    fn test_query_cursor() {
        assert_eq!(FeedQuery::Initial { size: 5 }.cursor(), None);
        assert_eq!(
            FeedQuery::Older {
                before: HoaxId(3),
                size: 5
            }
            .cursor(),
            Some(HoaxId(3))
        );
        assert_eq!(
            FeedQuery::NewerCount { after: HoaxId(9) }.cursor(),
            Some(HoaxId(9))
        );
    }
}
