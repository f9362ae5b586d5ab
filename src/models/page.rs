use serde::{Deserialize, Serialize};

/// Paginated response wrapper returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

/// Page metadata of the currently loaded page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Empty pagination before anything has been loaded
    pub fn new(size: u32) -> Self {
        Pagination {
            page: 0,
            size,
            total: 0,
            total_pages: 0,
        }
    }

    /// Take the page metadata of an envelope verbatim
    pub fn from_envelope<T>(envelope: &PageEnvelope<T>) -> Self {
        Pagination {
            page: envelope.number,
            size: envelope.size,
            total: envelope.total_elements,
            total_pages: envelope.total_pages,
        }
    }

    /// Check if on first page
    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    /// Check if on last page
    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.page + 1 >= self.total_pages
    }

    /// Index of the next page, if there is one
    pub fn next_page(&self) -> Option<u32> {
        if self.is_last() {
            None
        } else {
            Some(self.page + 1)
        }
    }

    /// Index of the previous page, if there is one
    pub fn previous_page(&self) -> Option<u32> {
        self.page.checked_sub(1)
    }
}
