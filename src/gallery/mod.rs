//! Gallery model: the documents of the site and the groups they are shown in.

pub mod categorize;
pub mod thumbnails;

pub use categorize::*;
pub use thumbnails::*;

use crate::categories::{CategoryMap, CATCH_ALL};
use crate::error::Result;
use crate::minisearch::SearchIndex;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A page of the site as shown in the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub light: Option<String>,
    pub dark: Option<String>,
}

/// A category with the short ids of its documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub word: String,
    pub title: String,
    pub description: Option<String>,
    pub members: Vec<u32>,
}

/// A group with the documents it actually displays
#[derive(Debug)]
pub struct VisibleGroup<'a> {
    pub group: &'a Group,
    pub documents: Vec<&'a Document>,
}

/// Documents and groups of the gallery page
#[derive(Debug)]
pub struct Gallery {
    documents: BTreeMap<u32, Document>,
    groups: Vec<Group>,
}

impl Gallery {
    /// Build the gallery from the site index and category definitions
    pub fn build(
        index: &SearchIndex,
        categories: &CategoryMap,
        thumbnails: &Thumbnails,
    ) -> Result<Self> {
        let documents: BTreeMap<u32, Document> = index
            .documents()
            .map(|doc| {
                let thumb = thumbnails.lookup(doc.id);
                let document = Document {
                    id: doc.id.to_string(),
                    title: doc.title.unwrap_or(doc.id).to_string(),
                    light: thumb.light,
                    dark: thumb.dark,
                };
                (doc.short_id, document)
            })
            .collect();

        tracing::debug!(
            documents = documents.len(),
            with_thumbnail = documents
                .values()
                .filter(|d| d.light.is_some() || d.dark.is_some())
                .count(),
            "indexed documents"
        );

        let groups = categorize(categories, index, &documents)?;
        Ok(Self { documents, groups })
    }

    pub fn document(&self, short_id: u32) -> Option<&Document> {
        self.documents.get(&short_id)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Groups with each document kept only in the first group listing it.
    ///
    /// Dropping a document from a regular group is reported as a warning;
    /// the catch-all group is expected to repeat everything.
    pub fn visible_groups(&self) -> Vec<VisibleGroup<'_>> {
        let mut seen = HashSet::new();
        self.groups
            .iter()
            .map(|group| {
                let documents = group
                    .members
                    .iter()
                    .filter_map(|short_id| {
                        let document = self.documents.get(short_id)?;
                        if seen.insert(*short_id) {
                            Some(document)
                        } else {
                            if group.word != CATCH_ALL {
                                tracing::warn!("duplicate {}", document.id);
                            }
                            None
                        }
                    })
                    .collect();
                VisibleGroup { group, documents }
            })
            .collect()
    }
}
