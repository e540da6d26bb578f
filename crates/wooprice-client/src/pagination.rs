//! WooCommerce page-number pagination via response headers.
//!
//! Collection endpoints report their size in two headers:
//!
//! ```text
//! X-WP-Total: 137
//! X-WP-TotalPages: 2
//! ```
//!
//! Pages are requested with `page=N` (1-based) alongside `per_page`.

use reqwest::header::HeaderMap;

pub const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Reads the `X-WP-TotalPages` header.
///
/// Returns `None` when the header is absent or not a number; callers then
/// treat the response as the only page.
#[must_use]
pub fn total_pages(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(TOTAL_PAGES_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u32>().ok())
}

/// `true` when another page should be requested after `page`.
#[must_use]
pub fn has_next_page(page: u32, total_pages: Option<u32>) -> bool {
    total_pages.is_some_and(|total| page < total)
}
