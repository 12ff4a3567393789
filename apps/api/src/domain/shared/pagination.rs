use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// One-based page request as sent by the client (`?page=2&limit=20`).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request from optional query values, clamping out-of-range input.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Rows to skip. Saturates for absurd page numbers, which then read as
    /// an empty page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total - 1) / self.limit + 1
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_and_limit() {
        let req = PageRequest::new(Some(0), Some(1000));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, MAX_PAGE_SIZE);

        let req = PageRequest::new(None, Some(-3));
        assert_eq!(req.limit, 1);
    }

    #[test]
    fn offset_and_page_count() {
        let req = PageRequest::new(Some(3), Some(20));
        assert_eq!(req.offset(), 40);
        assert_eq!(req.pages(0), 0);
        assert_eq!(req.pages(20), 1);
        assert_eq!(req.pages(41), 3);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let req = PageRequest::new(Some(i64::MAX), Some(20));
        assert_eq!(req.offset(), i64::MAX);

        let req = PageRequest::new(Some(i64::MAX), Some(1));
        assert_eq!(req.offset(), i64::MAX - 1);
        assert_eq!(req.pages(i64::MAX), i64::MAX);
    }
}
