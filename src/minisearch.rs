//! MiniSearch index model.
//!
//! Reads the "plain object" form that MiniSearch produces with `toJSON()`,
//! which is what Observable Framework serves as `_observablehq/minisearch.json`.
//! Only the parts needed to list documents and look up terms are kept.

use crate::error::{Error, Result};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Field id MiniSearch assigns to `title` when `fieldIds` is absent.
pub const DEFAULT_TITLE_FIELD: u32 = 0;
/// Field id MiniSearch assigns to `keywords` when `fieldIds` is absent.
pub const DEFAULT_KEYWORDS_FIELD: u32 = 2;

/// Stored fields of one document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoredFields {
    #[serde(default)]
    pub title: Option<String>,
}

/// Postings of one term: field id -> short id -> term frequency
type Postings = BTreeMap<u32, BTreeMap<u32, IgnoredAny>>;

/// A deserialized MiniSearch index
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex {
    document_ids: BTreeMap<u32, String>,
    #[serde(default)]
    stored_fields: BTreeMap<u32, StoredFields>,
    #[serde(default)]
    field_ids: HashMap<String, u32>,
    index: Vec<(String, Postings)>,
}

/// One indexed document, identified by its short id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument<'a> {
    pub short_id: u32,
    pub id: &'a str,
    pub title: Option<&'a str>,
}

impl SearchIndex {
    /// Parse an index from its JSON serialization
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::index(format!("not a MiniSearch index: {e}")))
    }

    /// Number of documents in the index
    pub fn len(&self) -> usize {
        self.document_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_ids.is_empty()
    }

    /// Documents in ascending short id order
    pub fn documents(&self) -> impl Iterator<Item = IndexedDocument<'_>> {
        self.document_ids.iter().map(|(&short_id, id)| IndexedDocument {
            short_id,
            id,
            title: self
                .stored_fields
                .get(&short_id)
                .and_then(|f| f.title.as_deref()),
        })
    }

    /// Resolve a field name to its id
    pub fn field_id(&self, field: &str) -> Option<u32> {
        self.field_ids.get(field).copied().or(match field {
            "title" => Some(DEFAULT_TITLE_FIELD),
            "keywords" => Some(DEFAULT_KEYWORDS_FIELD),
            _ => None,
        })
    }

    /// Short ids of the documents that contain `term` in any of `fields`.
    ///
    /// Ids come field by field in the order given, each field in ascending
    /// short id order; an id already listed for an earlier field is skipped.
    pub fn term_documents(&self, term: &str, fields: &[&str]) -> Option<Vec<u32>> {
        let (_, postings) = self.index.iter().find(|(t, _)| t == term)?;

        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for &field in fields {
            let Some(field_id) = self.field_id(field) else {
                tracing::debug!(field, "field not in index");
                continue;
            };
            if let Some(docs) = postings.get(&field_id) {
                ids.extend(docs.keys().copied().filter(|id| seen.insert(*id)));
            }
        }
        Some(ids)
    }
}
