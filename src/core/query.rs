//! Pagination parameters and response envelopes
//!
//! List endpoints share the same pagination contract: `page` starts at 1,
//! `limit` defaults to 10 and is clamped, the page fetch skips
//! `(page - 1) * limit` records, and the metadata reports
//! `totalPages = ceil(total / limit)`. A page beyond the last returns an
//! empty `data` array with the true `total` untouched.

use serde::Serialize;

/// Maximum number of items per page
pub const MAX_PAGE_SIZE: usize = 100;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// serde default for the `page` query parameter
pub fn default_page() -> usize {
    1
}

/// serde default for the `limit` query parameter
pub fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Clamp a requested page number to the minimum of 1
pub fn clamp_page(page: usize) -> usize {
    page.max(1)
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of items matching the filter
    pub total: usize,

    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of pages
    pub total_pages: usize,
}

impl PaginationMeta {
    /// Create pagination metadata from the effective page, limit and total
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        Self {
            total,
            page,
            limit,
            total_pages,
        }
    }
}

/// Paginated response envelope: `{ data, meta }`
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: usize, limit: usize, total: usize) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(page, limit, total),
        }
    }
}
