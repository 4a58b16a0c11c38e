// src/model/block.rs
//! The block tree: one tagged union keyed by `type`.
//!
//! The wire invariant (exactly one payload key matching the `type` value)
//! is structural here: serde's internally-tagged representation cannot emit
//! anything else. The enum also decides, per type, whether a block carries
//! rich text and whether it can nest children, replacing the original
//! implementation's parallel constant sets with one exhaustive type.
//!
//! All tree reshaping (stripping metadata, attaching or detaching children)
//! is done by pure transformations returning new values; nothing mutates
//! shared JSON in place.

use super::rich_text::RichText;
use crate::types::NotionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_object() -> String {
    "block".to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A node of workspace content.
///
/// Metadata fields are optional so a stripped block, reduced to
/// `{object, type, <type>: payload}` for re-submission, serializes to
/// exactly that shape with nothing else emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default = "default_object")]
    pub object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NotionId>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_children: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub payload: BlockPayload,
}

impl Block {
    /// A fresh local block carrying only a payload, ready for submission.
    pub fn new(payload: BlockPayload) -> Self {
        Self {
            object: default_object(),
            id: None,
            has_children: false,
            created_time: None,
            last_edited_time: None,
            payload,
        }
    }

    /// Reduces the block to the three keys the API needs on writes:
    /// `object`, `type`, and the type payload.
    pub fn into_stripped(self) -> Self {
        Self {
            object: self.object,
            id: None,
            has_children: false,
            created_time: None,
            last_edited_time: None,
            payload: self.payload,
        }
    }

    /// Splits the block from its nested children: returns the block with the
    /// payload's `children` field cleared, plus whatever was nested there.
    pub fn detach_children(mut self) -> (Self, Vec<Block>) {
        let children = self.payload.take_children();
        (self, children)
    }
}

/// Type payload shared by every rich-text-bearing block. Fields this client
/// doesn't model (`checked`, `language`, `icon`, ...) pass through `rest`
/// untouched, so fetched payloads re-submit byte-for-byte.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_toggleable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl TextPayload {
    pub fn from_rich_text(rich_text: Vec<RichText>) -> Self {
        Self {
            rich_text,
            color: Some("default".to_string()),
            ..Self::default()
        }
    }
}

/// Type payload for blocks that nest children but carry no rich text
/// (columns, tables, synced blocks).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// Block content, keyed by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockPayload {
    Paragraph { paragraph: TextPayload },
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: TextPayload },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextPayload },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: TextPayload },
    BulletedListItem { bulleted_list_item: TextPayload },
    NumberedListItem { numbered_list_item: TextPayload },
    ToDo { to_do: TextPayload },
    Toggle { toggle: TextPayload },
    Callout { callout: TextPayload },
    Quote { quote: TextPayload },
    Code { code: TextPayload },
    Template { template: TextPayload },
    ColumnList { column_list: ContainerPayload },
    Column { column: ContainerPayload },
    SyncedBlock { synced_block: ContainerPayload },
    Table { table: ContainerPayload },
    /// Block types this client doesn't model (dividers, media, child pages,
    /// ...). The raw payload round-trips, and nested children still attach
    /// under the type key so traversal loses nothing.
    #[serde(untagged)]
    Other(serde_json::Value),
}

impl BlockPayload {
    /// The wire name of this block's type.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading1 { .. } => "heading_1",
            Self::Heading2 { .. } => "heading_2",
            Self::Heading3 { .. } => "heading_3",
            Self::BulletedListItem { .. } => "bulleted_list_item",
            Self::NumberedListItem { .. } => "numbered_list_item",
            Self::ToDo { .. } => "to_do",
            Self::Toggle { .. } => "toggle",
            Self::Callout { .. } => "callout",
            Self::Quote { .. } => "quote",
            Self::Code { .. } => "code",
            Self::Template { .. } => "template",
            Self::ColumnList { .. } => "column_list",
            Self::Column { .. } => "column",
            Self::SyncedBlock { .. } => "synced_block",
            Self::Table { .. } => "table",
            Self::Other(value) => value
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("unsupported"),
        }
    }

    fn text_payload(&self) -> Option<&TextPayload> {
        match self {
            Self::Paragraph { paragraph: p }
            | Self::Heading1 { heading_1: p }
            | Self::Heading2 { heading_2: p }
            | Self::Heading3 { heading_3: p }
            | Self::BulletedListItem {
                bulleted_list_item: p,
            }
            | Self::NumberedListItem {
                numbered_list_item: p,
            }
            | Self::ToDo { to_do: p }
            | Self::Toggle { toggle: p }
            | Self::Callout { callout: p }
            | Self::Quote { quote: p }
            | Self::Code { code: p }
            | Self::Template { template: p } => Some(p),
            _ => None,
        }
    }

    fn text_payload_mut(&mut self) -> Option<&mut TextPayload> {
        match self {
            Self::Paragraph { paragraph: p }
            | Self::Heading1 { heading_1: p }
            | Self::Heading2 { heading_2: p }
            | Self::Heading3 { heading_3: p }
            | Self::BulletedListItem {
                bulleted_list_item: p,
            }
            | Self::NumberedListItem {
                numbered_list_item: p,
            }
            | Self::ToDo { to_do: p }
            | Self::Toggle { toggle: p }
            | Self::Callout { callout: p }
            | Self::Quote { quote: p }
            | Self::Code { code: p }
            | Self::Template { template: p } => Some(p),
            _ => None,
        }
    }

    fn container_payload_mut(&mut self) -> Option<&mut ContainerPayload> {
        match self {
            Self::ColumnList { column_list: c }
            | Self::Column { column: c }
            | Self::SyncedBlock { synced_block: c }
            | Self::Table { table: c } => Some(c),
            _ => None,
        }
    }

    /// The rich text spans of this block, empty for types that carry none.
    pub fn rich_text(&self) -> &[RichText] {
        self.text_payload().map(|p| p.rich_text.as_slice()).unwrap_or(&[])
    }

    /// Nests a subtree inside the type payload. The API only recognizes
    /// nested content under the type key, never as a sibling of it.
    pub fn set_children(&mut self, children: Vec<Block>) {
        if let Some(p) = self.text_payload_mut() {
            p.children = Some(children);
            return;
        }
        if let Some(c) = self.container_payload_mut() {
            c.children = Some(children);
            return;
        }
        if let Self::Other(value) = self {
            let type_name = value
                .get("type")
                .and_then(|t| t.as_str())
                .map(str::to_string);
            if let (Some(name), Ok(serialized)) = (type_name, serde_json::to_value(children)) {
                if let Some(payload) = value.get_mut(&name).and_then(|p| p.as_object_mut()) {
                    payload.insert("children".to_string(), serialized);
                }
            }
        }
    }

    /// Removes and returns the nested children, leaving the payload childless.
    pub fn take_children(&mut self) -> Vec<Block> {
        if let Some(p) = self.text_payload_mut() {
            return p.children.take().unwrap_or_default();
        }
        if let Some(c) = self.container_payload_mut() {
            return c.children.take().unwrap_or_default();
        }
        if let Self::Other(value) = self {
            let type_name = value
                .get("type")
                .and_then(|t| t.as_str())
                .map(str::to_string);
            if let Some(taken) = type_name
                .and_then(|name| value.get_mut(&name))
                .and_then(|payload| payload.as_object_mut())
                .and_then(|payload| payload.remove("children"))
            {
                return serde_json::from_value(taken).unwrap_or_default();
            }
        }
        Vec::new()
    }

    /// Whether this block's children nest no deeper than `limit` further
    /// levels. A childless block has depth 1; the API accepts writes of
    /// depth at most 2.
    pub fn fits_depth(&self, limit: usize) -> bool {
        fn children_of(payload: &BlockPayload) -> &[Block] {
            if let Some(p) = payload.text_payload() {
                return p.children.as_deref().unwrap_or(&[]);
            }
            match payload {
                BlockPayload::ColumnList { column_list: c }
                | BlockPayload::Column { column: c }
                | BlockPayload::SyncedBlock { synced_block: c }
                | BlockPayload::Table { table: c } => c.children.as_deref().unwrap_or(&[]),
                _ => &[],
            }
        }

        let children = children_of(self);
        if children.is_empty() {
            return limit >= 1;
        }
        limit >= 2 && children.iter().all(|c| c.payload.fits_depth(limit - 1))
    }
}
