// src/lib.rs
//! notion-digest library — aggregates project mentions scattered across
//! daily journal entries into one digest page, and purges stale
//! auto-generated entries.
//!
//! # Public API
//!
//! - **Error handling** — `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `Settings`
//! - **Domain model** — `Block`, `BlockPayload`, `RichText`, `PageObject`
//! - **Domain types** — `NotionId`, `ApiKey`, `CancelFlag`
//! - **API client** — the `NotionApi` trait, `NotionHttpClient`, the
//!   nesting-limit workaround (`append_deep_content`, `create_subpage`), and
//!   recursive traversal (`fetch_block_tree`)
//! - **Workflows** — `workflows::aggregate`, `workflows::cleanup`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod types;
pub mod workflows;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Command, CommandLineInput, Settings, WorkflowRun};

// --- Domain Model ---
pub use crate::model::{
    Annotations, Block, BlockPayload, ContainerPayload, DateMention, Mention, PageMention,
    PageObject, RichText, RichTextContent, SortSpec, TextPayload, TextSpan,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, CancelFlag, NotionId};

// --- API Client ---
pub use crate::api::{
    append_deep_content, create_subpage, fetch_block_tree, NotionApi, NotionHttpClient,
};
