//! Directory paginator
//!
//! Page-indexed browsing of the user directory. Unlike the feed, the page is
//! replaced wholesale on every successful load. A failed load keeps the last
//! good page and sets an error message that the next successful load clears.
//!
//! Loads are not mutually exclusive, but every request carries a sequence
//! number and only the response to the most recent request is applied.

use crate::{
    domain::{Page, UserRef},
    infrastructure::api::ApiError,
};

pub const DEFAULT_PAGE_SIZE: usize = 3;
pub const LOAD_ERROR_MESSAGE: &str = "User load failed";

/// The user page currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPage {
    pub items: Vec<UserRef>,
    pub page_index: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub page_size: usize,
}

impl DirectoryPage {
    fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_index: 0,
            is_first: true,
            is_last: true,
            page_size,
        }
    }
}

/// Fetch the runtime has to perform for the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryRequest {
    pub seq: u64,
    pub page_index: usize,
    pub page_size: usize,
}

/// Read-only copy of the directory for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySnapshot {
    pub items: Vec<UserRef>,
    pub page_index: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPaginator {
    page: DirectoryPage,
    loading: bool,
    error: Option<String>,
    latest_seq: u64,
    /// Page index of the latest request
    requested_index: usize,
}

impl Default for DirectoryPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl DirectoryPaginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: DirectoryPage::empty(page_size),
            loading: false,
            error: None,
            latest_seq: 0,
            requested_index: 0,
        }
    }

    pub fn page(&self) -> &DirectoryPage {
        &self.page
    }

    pub fn items(&self) -> &[UserRef] {
        &self.page.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a "previous" action should be offered
    pub fn can_go_previous(&self) -> bool {
        !self.page.is_first
    }

    /// Whether a "next" action should be offered
    pub fn can_go_next(&self) -> bool {
        !self.page.is_last
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            items: self.page.items.clone(),
            page_index: self.page.page_index,
            is_first: self.page.is_first,
            is_last: self.page.is_last,
            loading: self.loading,
            error: self.error.clone(),
        }
    }

    pub fn load(&mut self, page_index: usize) -> DirectoryRequest {
        self.latest_seq += 1;
        self.requested_index = page_index;
        self.loading = true;
        DirectoryRequest {
            seq: self.latest_seq,
            page_index,
            page_size: self.page.page_size,
        }
    }

    pub fn next(&mut self) -> Option<DirectoryRequest> {
        if self.page.is_last {
            return None;
        }
        Some(self.load(self.page.page_index + 1))
    }

    pub fn previous(&mut self) -> Option<DirectoryRequest> {
        if self.page.is_first {
            return None;
        }
        let index = self.page.page_index.checked_sub(1)?;
        Some(self.load(index))
    }

    /// Reload the page currently shown
    pub fn reload(&mut self) -> DirectoryRequest {
        self.load(self.page.page_index)
    }

    pub fn handle_response(&mut self, seq: u64, result: Result<Page<UserRef>, ApiError>) {
        if seq != self.latest_seq {
            log::debug!("discarding directory response {seq}, latest is {}", self.latest_seq);
            return;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                let page_size = if page.size > 0 {
                    page.size
                } else {
                    self.page.page_size
                };
                self.page = DirectoryPage {
                    items: page.content,
                    page_index: self.requested_index,
                    is_first: page.first,
                    is_last: page.last,
                    page_size,
                };
                self.error = None;
            }
            Err(e) => {
                log::warn!("directory load failed: {e}");
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }
}
