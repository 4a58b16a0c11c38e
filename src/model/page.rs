// src/model/page.rs
//! Page objects as returned by search and database queries.

use crate::types::NotionId;
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

/// A search or query result: the page's identity and timestamps plus its
/// database-specific properties, kept raw. Page content lives behind the
/// block-children endpoint, not here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageObject {
    #[serde(default)]
    pub object: String,
    pub id: NotionId,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// One entry of a database query's sort sequence.
///
/// Serializes to the remote's `{property, direction}` vocabulary, with the
/// ascending flag translated to `"ascending"` / `"descending"`.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub property: String,
    pub ascending: bool,
}

impl SortSpec {
    pub fn ascending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            ascending: true,
        }
    }

    pub fn descending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            ascending: false,
        }
    }

    fn direction(&self) -> &'static str {
        if self.ascending {
            "ascending"
        } else {
            "descending"
        }
    }
}

impl Serialize for SortSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("SortSpec", 2)?;
        state.serialize_field("property", &self.property)?;
        state.serialize_field("direction", self.direction())?;
        state.end()
    }
}
