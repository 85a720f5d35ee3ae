//! Gallery category definitions.
//!
//! The site keeps them in `src/index.json` as an ordered list of
//! `[word, {title, pages?, description?}]` pairs.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Word of the category that collects every document
pub const CATCH_ALL: &str = "more";

/// One category definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub title: String,
    /// Explicit document ids; when absent, documents are matched by keyword
    #[serde(default)]
    pub pages: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct CategoryFile {
    sections: Vec<(String, Category)>,
}

/// Ordered category definitions keyed by word
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    entries: Vec<(String, Category)>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load definitions from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::PathNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CategoryFile = serde_json::from_str(json)?;
        let mut map = Self::new();
        for (word, category) in file.sections {
            map.insert(word, category);
        }
        Ok(map)
    }

    /// Add a category; redefining a word keeps its original position
    pub fn insert(&mut self, word: impl Into<String>, category: Category) {
        let word = word.into();
        match self.entries.iter_mut().find(|(w, _)| *w == word) {
            Some((_, existing)) => *existing = category,
            None => self.entries.push((word, category)),
        }
    }

    pub fn get(&self, word: &str) -> Option<&Category> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
