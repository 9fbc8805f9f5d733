//! Cursor pagination types
//!
//! List queries are keyed on the last-seen document rather than a numeric
//! offset: the client passes back `last_id` from the previous page and the
//! store continues strictly after that document in `created_at DESC` order.

use serde::{Deserialize, Serialize};

/// Maximum page size accepted from clients
pub const MAX_PAGE_SIZE: i64 = 50;

/// Parameters for a cursor-paginated list query
#[derive(Debug, Clone)]
pub struct CursorParams {
    /// Number of items to fetch (clamped to 1..=MAX_PAGE_SIZE)
    pub limit: i64,
    /// Id of the last document of the previous page, if any
    pub last_id: Option<String>,
}

impl CursorParams {
    /// Create cursor parameters with the limit clamped to the accepted range
    pub fn new(limit: i64, last_id: Option<String>) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            last_id,
        }
    }

    /// First page with the given limit
    pub fn first(limit: i64) -> Self {
        Self::new(limit, None)
    }
}

/// One page of a cursor-paginated listing
///
/// `has_more` is approximated as `items.len() == limit`: the true size of the
/// remaining set is never counted, so a collection whose remainder exactly
/// equals the page size produces one extra empty round trip. Accepted
/// behavior, not a bug to fix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    /// Items in this page, `created_at` descending
    pub items: Vec<T>,
    /// Cursor for the next page; `None` when this page is empty
    pub last_id: Option<String>,
    /// Whether another page is (probably) available
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    /// Build a page from fetched rows, computing the continuation cursor
    pub fn new(items: Vec<T>, last_id: Option<String>, limit: i64) -> Self {
        let has_more = items.len() as i64 == limit;
        Self {
            items,
            last_id,
            has_more,
        }
    }

    /// An empty page
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            last_id: None,
            has_more: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamped() {
        assert_eq!(CursorParams::new(0, None).limit, 1);
        assert_eq!(CursorParams::new(-3, None).limit, 1);
        assert_eq!(CursorParams::new(500, None).limit, MAX_PAGE_SIZE);
        assert_eq!(CursorParams::new(10, None).limit, 10);
    }

    #[test]
    fn test_has_more_is_full_page_approximation() {
        let full = CursorPage::new(vec![1, 2, 3], Some("c".into()), 3);
        assert!(full.has_more);

        let short = CursorPage::new(vec![1, 2], Some("b".into()), 3);
        assert!(!short.has_more);

        let empty: CursorPage<i32> = CursorPage::new(Vec::new(), None, 3);
        assert!(!empty.has_more);
        assert!(empty.is_empty());
    }
}
