//! Search index aggregation across documentation sites.
//!
//! Each site serves its MiniSearch index under a hashed file name that is
//! only referenced from its JavaScript bundles, so the bundles are fetched
//! and searched for the name before the index itself is downloaded:
//!
//! - Observable Framework sites reference `minisearch.<hash>.json` from
//!   `_observablehq/search.js`.
//! - VitePress sites chain from the home page to `theme.<hash>.js`, then to
//!   `VPLocalSearchBox.<hash>.js`, then to `@localSearchIndexroot.<hash>.js`,
//!   a module exporting the index as a string.

pub mod js_literal;
pub mod locate;

pub use locate::{asset_pattern, find_asset};

use crate::config::{SiteConfig, SiteKind};
use crate::error::Result;
use crate::fetch::Fetch;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// The search index of one site and where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteIndex {
    pub source: String,
    pub index: Value,
}

/// Indexes of all sites, keyed by site name
pub type CombinedIndex = BTreeMap<String, SiteIndex>;

/// Index of an Observable Framework site rooted at `base`
pub fn framework_index(fetcher: &dyn Fetch, base: &str, source: &str) -> Result<SiteIndex> {
    let name = find_asset(
        fetcher,
        "minisearch",
        "json",
        &format!("{base}_observablehq/search.js"),
    )?;
    let text = fetcher.fetch_text(&format!("{base}_observablehq/{name}"))?;

    Ok(SiteIndex {
        source: source.to_string(),
        index: serde_json::from_str(&text)?,
    })
}

/// Index of a VitePress site rooted at `base`
pub fn vitepress_index(fetcher: &dyn Fetch, base: &str, source: &str) -> Result<SiteIndex> {
    let chunks = format!("{base}assets/chunks/");
    let theme = find_asset(fetcher, "theme", "js", base)?;
    let search_box = find_asset(fetcher, "VPLocalSearchBox", "js", &format!("{chunks}{theme}"))?;
    let search_root = find_asset(
        fetcher,
        "localSearchIndexroot",
        "js",
        &format!("{chunks}{search_box}"),
    )?;

    let module = fetcher.fetch_text(&format!("{chunks}@{search_root}"))?;
    let literal = js_literal::strip_module(&module)?;
    let json = js_literal::decode_string_literal(literal)?;

    Ok(SiteIndex {
        source: source.to_string(),
        index: serde_json::from_str(&json)?,
    })
}

/// Fetches the indexes of a list of sites
pub struct Aggregator<'a> {
    fetcher: &'a dyn Fetch,
    show_progress: bool,
}

impl<'a> Aggregator<'a> {
    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self {
            fetcher,
            show_progress: false,
        }
    }

    /// Show a spinner on stderr while sites are fetched
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Fetch one site's index
    pub fn fetch_site(&self, site: &SiteConfig) -> Result<SiteIndex> {
        match site.kind {
            SiteKind::Framework => framework_index(self.fetcher, &site.url, site.source()),
            SiteKind::Vitepress => vitepress_index(self.fetcher, &site.url, site.source()),
        }
    }

    /// Fetch every site in order, stopping at the first failure
    pub fn collect(&self, sites: &[SiteConfig]) -> Result<CombinedIndex> {
        let pb = if self.show_progress {
            let pb = ProgressBar::new(sites.len() as u64);
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{pos}/{len}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut combined = CombinedIndex::new();
        for site in sites {
            pb.set_message(site.name.clone());
            tracing::info!(
                site = %site.name,
                url = %site.url,
                kind = ?site.kind,
                "fetching search index"
            );

            let index = match self.fetch_site(site) {
                Ok(index) => index,
                Err(e) => {
                    pb.abandon_with_message(format!("{} failed", site.name));
                    return Err(e);
                }
            };
            combined.insert(site.name.clone(), index);
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(combined)
    }
}
