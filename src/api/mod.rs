// src/api/mod.rs
//! Notion API interaction — transport, pagination, and the two client-side
//! workarounds for remote limitations (nesting-limit splitting and recursive
//! tree fetching).

pub mod client;
mod deep;
mod pagination;
mod tree;

use crate::error::AppError;
use crate::model::{Block, PageObject, SortSpec};
use crate::types::NotionId;

/// The ability to reach a Notion workspace.
///
/// Workflows and the workaround layers depend on this trait, never on HTTP
/// details, so they can be driven against an in-memory mock in tests.
#[async_trait::async_trait]
pub trait NotionApi: Send + Sync {
    /// Search accessible objects. An empty query returns everything the
    /// integration can see; `databases_only` narrows to databases.
    ///
    /// https://developers.notion.com/reference/post-search
    async fn search(
        &self,
        query: Option<&str>,
        databases_only: bool,
    ) -> Result<Vec<PageObject>, AppError>;

    /// All page objects in a database, in the remote's order for the given
    /// sorts (remote default ordering when `sorts` is empty).
    ///
    /// https://developers.notion.com/reference/post-database-query
    async fn query_database(
        &self,
        database: &NotionId,
        sorts: &[SortSpec],
    ) -> Result<Vec<PageObject>, AppError>;

    /// One level of a block's children, fetched to cursor exhaustion.
    ///
    /// https://developers.notion.com/reference/get-block-children
    async fn get_block_children(&self, block: &NotionId) -> Result<Vec<Block>, AppError>;

    /// Appends blocks under a parent in one call. The remote returns the
    /// created blocks in submission order; the nesting-workaround layer
    /// relies on that ordering to pair created IDs with detached children.
    ///
    /// https://developers.notion.com/reference/patch-block-children
    async fn append_children(
        &self,
        parent: &NotionId,
        children: Vec<Block>,
    ) -> Result<Vec<Block>, AppError>;

    /// Creates a page under a parent page, optionally with initial content.
    ///
    /// https://developers.notion.com/reference/post-page
    async fn create_page(
        &self,
        parent: &NotionId,
        title: &str,
        content: Option<Vec<Block>>,
    ) -> Result<NotionId, AppError>;

    /// Archives a block (or page). Idempotent from the caller's perspective.
    ///
    /// https://developers.notion.com/reference/delete-a-block
    async fn delete_block(&self, block: &NotionId) -> Result<(), AppError>;

    /// Resolves a human database name to exactly one database, then queries
    /// it. Zero or multiple matches abort with `AmbiguousName`: the workflow
    /// has no way to disambiguate.
    async fn database_entries_by_name(
        &self,
        name: &str,
        sorts: &[SortSpec],
    ) -> Result<Vec<PageObject>, AppError> {
        let matches = self.search(Some(name), true).await?;
        match matches.as_slice() {
            [database] => self.query_database(&database.id, sorts).await,
            other => Err(AppError::AmbiguousName {
                name: name.to_string(),
                matches: other.len(),
            }),
        }
    }

    /// Resolves a page title to exactly one page object.
    async fn page_by_name(&self, name: &str) -> Result<PageObject, AppError> {
        let mut matches = self.search(Some(name), false).await?;
        if matches.len() == 1 {
            Ok(matches.remove(0))
        } else {
            Err(AppError::AmbiguousName {
                name: name.to_string(),
                matches: matches.len(),
            })
        }
    }
}

pub use client::NotionHttpClient;
pub use deep::{append_deep_content, create_subpage};
pub use tree::fetch_block_tree;
