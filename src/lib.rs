//! Pangea tools - build glue for the Pangea gallery site
//!
//! Generates the categorized gallery home page from the site's MiniSearch
//! index, and combines the search indexes of related documentation sites
//! into a single JSON file.

pub mod categories;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod gallery;
pub mod minisearch;
pub mod output;
pub mod search;

// Re-export main types
pub use categories::{Category, CategoryMap};
pub use config::{Config, SiteConfig, SiteKind};
pub use error::{Error, Result};
pub use fetch::{Fetch, HttpFetcher};
pub use gallery::{Document, Gallery, Group, Thumbnails};
pub use minisearch::SearchIndex;
pub use output::TemplateEngine;
pub use search::{Aggregator, CombinedIndex, SiteIndex};
