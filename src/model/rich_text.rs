// src/model/rich_text.rs
//! Rich text spans and the mentions they carry.
//!
//! A block's `rich_text` sequence is where page mentions live; the
//! aggregation workflow matches on them. The tagged representations here
//! mirror the wire format exactly, so spans fetched from the API can be
//! re-submitted verbatim inside stripped blocks.

use crate::types::NotionId;
use serde::{Deserialize, Serialize};

/// One element of a block's `rich_text` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(flatten)]
    pub content: RichTextContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RichText {
    /// The page ID this span mentions, if it carries a page mention.
    pub fn mentioned_page(&self) -> Option<&NotionId> {
        match &self.content {
            RichTextContent::Mention {
                mention: Mention::Page { page },
            } => Some(&page.id),
            _ => None,
        }
    }

    /// Builds a span mentioning a page.
    pub fn page_mention(id: NotionId) -> Self {
        Self {
            content: RichTextContent::Mention {
                mention: Mention::Page {
                    page: PageMention { id },
                },
            },
            annotations: Some(Annotations::default()),
            plain_text: None,
            href: None,
        }
    }

    /// Builds a span mentioning a point in time.
    ///
    /// https://developers.notion.com/reference/rich-text#date-mentions
    pub fn date_mention(start: String, time_zone: Option<String>) -> Self {
        Self {
            content: RichTextContent::Mention {
                mention: Mention::Date {
                    date: DateMention {
                        start,
                        end: None,
                        time_zone,
                    },
                },
            },
            annotations: Some(Annotations::default()),
            plain_text: None,
            href: None,
        }
    }
}

/// Span content, keyed by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextContent {
    Text { text: TextSpan },
    Mention { mention: Mention },
    Equation { equation: serde_json::Value },
    /// Span kinds this client doesn't model; round-tripped as raw JSON.
    #[serde(untagged)]
    Other(serde_json::Value),
}

/// Literal text content of a `text` span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<serde_json::Value>,
}

/// An inline reference to another object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mention {
    Page { page: PageMention },
    Date { date: DateMention },
    #[serde(untagged)]
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMention {
    pub id: NotionId,
}

/// https://developers.notion.com/reference/property-value-object#date-property-values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateMention {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Span styling. Defaults to unstyled, matching what the API expects when
/// synthesizing new spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}
