// src/api/deep.rs
//! Client-side workaround for the remote's write nesting limit.
//!
//! A single append or create call accepts at most a parent block and its
//! direct children. In-memory trees are arbitrarily deep, so deep content is
//! split level by level: append the childless parents, pair the created IDs
//! with the detached child lists (the remote returns created blocks in
//! submission order), and append each child list under its new parent,
//! recursing only when the remote actually rejects a call as too deeply
//! nested.

use super::NotionApi;
use crate::error::AppError;
use crate::model::Block;
use crate::types::NotionId;

/// Appends an arbitrarily deep block tree under `grandparent`, splitting
/// across calls as the remote's nesting limit demands.
///
/// Each recursion level flattens exactly one level of the remaining tree, so
/// the recursion depth is bounded by the tree's actual depth.
pub async fn append_deep_content<A: NotionApi + ?Sized>(
    api: &A,
    grandparent: &NotionId,
    tree: Vec<Block>,
) -> Result<(), AppError> {
    if tree.is_empty() {
        return Ok(());
    }

    let (parents, child_lists): (Vec<Block>, Vec<Vec<Block>>) =
        tree.into_iter().map(Block::detach_children).unzip();

    let created = api.append_children(grandparent, parents).await?;
    if created.len() != child_lists.len() {
        return Err(AppError::MalformedResponse(format!(
            "appended {} blocks but the API reported {} created",
            child_lists.len(),
            created.len()
        )));
    }

    for (created_block, children) in created.into_iter().zip(child_lists) {
        if children.is_empty() {
            continue;
        }
        let parent_id = created_block.id.ok_or_else(|| {
            AppError::MalformedResponse("created block missing an id".to_string())
        })?;

        match api.append_children(&parent_id, children.clone()).await {
            Ok(_) => {}
            Err(e) if e.is_nesting_too_deep() => {
                log::debug!(
                    "children of {} still too deep, splitting another level",
                    parent_id
                );
                Box::pin(append_deep_content(api, &parent_id, children)).await?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Creates a subpage with content, falling back to the splitting path only
/// when the remote proves the content too deep for a single call. Shallow
/// content therefore costs exactly one request.
pub async fn create_subpage<A: NotionApi + ?Sized>(
    api: &A,
    parent: &NotionId,
    title: &str,
    content: Vec<Block>,
) -> Result<NotionId, AppError> {
    if content.is_empty() {
        return api.create_page(parent, title, None).await;
    }

    match api.create_page(parent, title, Some(content.clone())).await {
        Ok(page_id) => Ok(page_id),
        Err(e) if e.is_nesting_too_deep() => {
            log::info!("page content exceeds the nesting limit, creating empty and splitting");
            let page_id = api.create_page(parent, title, None).await?;
            append_deep_content(api, &page_id, content).await?;
            Ok(page_id)
        }
        Err(e) => Err(e),
    }
}
