//! Pagination query parameter extractor.

use serde::Deserialize;

use staybook_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints (`?page=2&limit=20`).
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 10, max: 100).
    #[serde(default = "default_limit", alias = "pageSize")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_out_of_range() {
        let page = PaginationParams { page: 0, limit: 500 }.into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);
    }
}
