// src/api/pagination.rs
//! Cursor pagination, driven to exhaustion.
//!
//! Every list endpoint (search, database query, block children) pages its
//! results. Stopping after the first page silently truncates trees with many
//! siblings, so every caller loops the cursor until the remote reports no
//! more.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use serde::Deserialize;

/// Generic paginated response from the Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Fetches all pages of a cursor-paginated endpoint.
///
/// `fetch_fn` receives the page size and the cursor to resume from (None for
/// the first call) and performs one remote call.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;

    loop {
        let response = fetch_fn(NOTION_API_PAGE_SIZE, cursor).await?;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(all_items)
}
