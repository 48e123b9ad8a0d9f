//! Paginated list responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a resource listing.
///
/// `count` is the total number of records across every page; the page size
/// is whatever the API chose to return in `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T = Value> {
    /// Total number of matching records.
    #[serde(default)]
    pub count: u64,

    /// URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,

    /// The records on this page, in API order.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Total number of pages implied by this (first) page.
    ///
    /// The page size is taken from `results.len()`. A zero count or an
    /// empty page means there are no pages at all.
    pub fn page_count(&self) -> u32 {
        let size = self.results.len() as u64;
        if self.count == 0 || size == 0 {
            return 0;
        }
        u32::try_from(self.count.div_ceil(size)).unwrap_or(u32::MAX)
    }
}
