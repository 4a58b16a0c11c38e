// tests/common/mod.rs
//! Shared in-memory stand-in for the Notion API.
//!
//! `MockApi` seeds search results, database rows, and block children, then
//! plays the remote's part: it enforces the two-level write nesting limit,
//! assigns IDs to created blocks in submission order, and records every call
//! so tests can assert on call counts and reconstruct the written tree.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notion_digest::{
    AppError, Block, BlockPayload, NotionApi, NotionErrorCode, NotionId, PageObject, RichText,
    RichTextContent, SortSpec, TextPayload, TextSpan,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// How deep one write call may nest: a block plus its direct children.
const WRITE_DEPTH_LIMIT: usize = 2;

/// One block created through the mock, addressable for later appends.
#[derive(Debug, Clone)]
pub struct CreatedEntry {
    pub id: NotionId,
    pub block: Block,
}

#[derive(Debug, Default)]
pub struct CallLog {
    pub appends_ok: usize,
    pub appends_rejected: usize,
    pub creates_ok: usize,
    pub creates_rejected: usize,
    pub deleted: Vec<NotionId>,
    pub query_sorts: Vec<Vec<SortSpec>>,
}

#[derive(Default)]
pub struct MockApi {
    search_results: HashMap<(String, bool), Vec<PageObject>>,
    database_rows: HashMap<NotionId, Vec<PageObject>>,
    seeded_children: HashMap<NotionId, Vec<Block>>,
    store: Mutex<HashMap<NotionId, Vec<CreatedEntry>>>,
    pub log: Mutex<CallLog>,
    id_counter: Mutex<u64>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_search_result(&mut self, query: &str, databases_only: bool, result: PageObject) {
        self.search_results
            .entry((query.to_string(), databases_only))
            .or_default()
            .push(result);
    }

    pub fn set_database_rows(&mut self, database: &NotionId, rows: Vec<PageObject>) {
        self.database_rows.insert(database.clone(), rows);
    }

    pub fn set_children(&mut self, block: &NotionId, children: Vec<Block>) {
        self.seeded_children.insert(block.clone(), children);
    }

    fn next_id(&self) -> NotionId {
        let mut counter = self.id_counter.lock().unwrap();
        *counter += 1;
        NotionId::parse(&format!("{:032x}", *counter)).unwrap()
    }

    fn nesting_error() -> AppError {
        AppError::NotionService {
            code: NotionErrorCode::NestingTooDeep,
            message: "body.children[0].children[0].children should be not present".to_string(),
            status: reqwest::StatusCode::BAD_REQUEST,
        }
    }

    /// Rebuilds the tree written under `parent`: inline children submitted in
    /// one call, then blocks appended under the created ID, in order. IDs are
    /// cleared so results compare structurally.
    pub fn materialize(&self, parent: &NotionId) -> Vec<Block> {
        let store = self.store.lock().unwrap();
        materialize_from(&store, parent)
    }
}

fn materialize_from(store: &HashMap<NotionId, Vec<CreatedEntry>>, parent: &NotionId) -> Vec<Block> {
    let Some(entries) = store.get(parent) else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| {
            let mut block = entry.block.clone();
            block.id = None;
            let mut children = block.payload.take_children();
            children.extend(materialize_from(store, &entry.id));
            if !children.is_empty() {
                block.payload.set_children(children);
            }
            block
        })
        .collect()
}

#[async_trait]
impl NotionApi for MockApi {
    async fn search(
        &self,
        query: Option<&str>,
        databases_only: bool,
    ) -> Result<Vec<PageObject>, AppError> {
        let key = (query.unwrap_or("").to_string(), databases_only);
        Ok(self.search_results.get(&key).cloned().unwrap_or_default())
    }

    async fn query_database(
        &self,
        database: &NotionId,
        sorts: &[SortSpec],
    ) -> Result<Vec<PageObject>, AppError> {
        self.log.lock().unwrap().query_sorts.push(sorts.to_vec());
        Ok(self
            .database_rows
            .get(database)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_block_children(&self, block: &NotionId) -> Result<Vec<Block>, AppError> {
        Ok(self
            .seeded_children
            .get(block)
            .cloned()
            .unwrap_or_default())
    }

    async fn append_children(
        &self,
        parent: &NotionId,
        children: Vec<Block>,
    ) -> Result<Vec<Block>, AppError> {
        if children
            .iter()
            .any(|b| !b.payload.fits_depth(WRITE_DEPTH_LIMIT))
        {
            self.log.lock().unwrap().appends_rejected += 1;
            return Err(Self::nesting_error());
        }

        let mut created = Vec::with_capacity(children.len());
        let mut store = self.store.lock().unwrap();
        for block in children {
            let id = self.next_id();
            store.entry(parent.clone()).or_default().push(CreatedEntry {
                id: id.clone(),
                block: block.clone(),
            });
            let mut echoed = block;
            echoed.id = Some(id);
            created.push(echoed);
        }
        self.log.lock().unwrap().appends_ok += 1;
        Ok(created)
    }

    async fn create_page(
        &self,
        _parent: &NotionId,
        _title: &str,
        content: Option<Vec<Block>>,
    ) -> Result<NotionId, AppError> {
        if let Some(children) = &content {
            if children
                .iter()
                .any(|b| !b.payload.fits_depth(WRITE_DEPTH_LIMIT))
            {
                self.log.lock().unwrap().creates_rejected += 1;
                return Err(Self::nesting_error());
            }
        }

        let page_id = self.next_id();
        if let Some(children) = content {
            let mut store = self.store.lock().unwrap();
            for block in children {
                let id = self.next_id();
                store
                    .entry(page_id.clone())
                    .or_default()
                    .push(CreatedEntry { id, block });
            }
        }
        self.log.lock().unwrap().creates_ok += 1;
        Ok(page_id)
    }

    async fn delete_block(&self, block: &NotionId) -> Result<(), AppError> {
        self.log.lock().unwrap().deleted.push(block.clone());
        Ok(())
    }
}

// --- Builders shared by the suites ---

/// A stripped paragraph holding one literal text span.
pub fn paragraph(text: &str) -> Block {
    Block::new(BlockPayload::Paragraph {
        paragraph: TextPayload::from_rich_text(vec![RichText {
            content: RichTextContent::Text {
                text: TextSpan {
                    content: text.to_string(),
                    link: None,
                },
            },
            annotations: None,
            plain_text: None,
            href: None,
        }]),
    })
}

/// A stripped paragraph whose rich text mentions a page.
pub fn mention_paragraph(page: &NotionId) -> Block {
    Block::new(BlockPayload::Paragraph {
        paragraph: TextPayload::from_rich_text(vec![RichText::page_mention(page.clone())]),
    })
}

/// A linear chain of paragraphs, `depth` levels deep.
pub fn chain(depth: usize) -> Block {
    let mut block = paragraph(&format!("level {depth}"));
    for level in (1..depth).rev() {
        let mut parent = paragraph(&format!("level {level}"));
        parent.payload.set_children(vec![block]);
        block = parent;
    }
    block
}

/// A page object with the given timestamps.
pub fn page_object(
    object: &str,
    created: DateTime<Utc>,
    edited: DateTime<Utc>,
) -> PageObject {
    PageObject {
        object: object.to_string(),
        id: NotionId::new_v4(),
        created_time: created,
        last_edited_time: edited,
        properties: serde_json::Map::new(),
    }
}

/// Marks a fetched-looking block: gives it an ID and the has_children flag.
pub fn with_identity(mut block: Block, id: &NotionId, has_children: bool) -> Block {
    block.id = Some(id.clone());
    block.has_children = has_children;
    block
}
