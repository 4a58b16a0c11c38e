// src/api/tree.rs
//! Recursive retrieval of a block's descendant tree.
//!
//! The children endpoint returns one level at a time; this walks it eagerly
//! and materializes the whole tree. Every level fetches all pages of
//! children, so wide sibling lists are never truncated.

use super::NotionApi;
use crate::error::AppError;
use crate::model::Block;
use crate::types::NotionId;

/// Fetches the full tree of blocks under `block`.
///
/// With `recursive` set, each child's subtree is attached inside its type
/// payload as `children`, the only placement the API recognizes when the
/// result is re-submitted for creation. Without it, descendants are flattened
/// into the result sequence (emitted before the block that contained them),
/// discarding the nesting.
///
/// With `strip` set, each emitted block is reduced to the
/// `{object, type, <type>: payload}` shape the API accepts on writes.
pub async fn fetch_block_tree<A: NotionApi + ?Sized>(
    api: &A,
    block: &NotionId,
    recursive: bool,
    strip: bool,
) -> Result<Vec<Block>, AppError> {
    let children = api.get_block_children(block).await?;

    let mut elements = Vec::with_capacity(children.len());
    for mut el in children {
        if el.has_children {
            let id = el.id.clone().ok_or_else(|| {
                AppError::MalformedResponse("fetched block missing an id".to_string())
            })?;
            let subtree = Box::pin(fetch_block_tree(api, &id, recursive, strip)).await?;

            if recursive {
                el.payload.set_children(subtree);
            } else {
                elements.extend(subtree);
            }
        }

        elements.push(if strip { el.into_stripped() } else { el });
    }

    Ok(elements)
}
