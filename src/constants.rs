// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

/// Base URL for all Notion API requests.
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

/// Pinned Notion API version, sent with every request.
///
/// https://developers.notion.com/reference/versioning
pub const NOTION_VERSION: &str = "2022-06-28";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while paginating children lists and query results.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Default per-request timeout in seconds, overridable with `--timeout-secs`.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
