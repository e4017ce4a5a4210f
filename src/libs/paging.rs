//! Pagination envelope and sort direction shared by all listing operations.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// One page of a listing plus the pagination bookkeeping the caller echoes
/// back: total matching count (unaffected by pagination) and derived page
/// count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 { 0 } else { total_count.div_ceil(limit as u64) };
        Page {
            items,
            total_count,
            page,
            limit,
            total_pages,
        }
    }
}

/// `skip = (page - 1) * limit`, the offset of the first row of `page`.
pub fn skip(page: u32, limit: u32) -> u64 {
    (page.saturating_sub(1) as u64) * limit as u64
}
