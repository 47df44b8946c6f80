use serde::{Deserialize, Serialize};

/// A page of a server-side ordered collection
///
/// Mirrors the page shape the service returns for `/hoaxes` and `/users`.
/// Fields other than `content` are optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default = "default_true")]
    pub first: bool,
    #[serde(default = "default_true")]
    pub last: bool,
    #[serde(default)]
    pub number: usize,
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub total_pages: usize,
}

fn default_true() -> bool {
    true
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            first: true,
            last: true,
            number: 0,
            size: 0,
            total_pages: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, first: bool, last: bool) -> Self {
        Self {
            content,
            first,
            last,
            ..Self::default()
        }
    }

    /// Set page index and size
    pub fn at(mut self, number: usize, size: usize) -> Self {
        self.number = number;
        self.size = size;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Answer of the "how many newer hoaxes" probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewerCount {
    pub count: u64,
}
