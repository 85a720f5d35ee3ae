use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gallery: GalleryConfig,
    pub search: SearchConfig,
}

/// Gallery page generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Root URL of the locally running site preview
    pub http_root: String,
    /// Path of the search index below `http_root`
    pub index_path: String,
    /// Category definitions file
    pub categories: PathBuf,
    /// Site source directory, where thumbnails live
    pub site_src: PathBuf,
    /// Markdown intro replacing the built-in one
    pub intro: Option<PathBuf>,
}

/// Search aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub sites: Vec<SiteConfig>,
    pub timeout_secs: u64,
}

/// One documentation site to scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Key of the site in the combined output
    pub name: String,
    pub kind: SiteKind,
    /// Base URL the assets are served from, with a trailing slash
    pub url: String,
    /// Source reported in the output; defaults to `url`
    #[serde(default)]
    pub source: Option<String>,
}

/// How a site exposes its search index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    /// Observable Framework: `_observablehq/minisearch.<hash>.json`
    Framework,
    /// VitePress local search: `assets/chunks/@localSearchIndexroot.<hash>.js`
    Vitepress,
}

impl SiteConfig {
    pub fn new(name: &str, kind: SiteKind, url: &str, source: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            url: url.to_string(),
            source: source.map(str::to_string),
        }
    }

    /// The source reported alongside the index
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.url)
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            http_root: "http://127.0.0.1:3033".to_string(),
            index_path: "_observablehq/minisearch.json".to_string(),
            categories: PathBuf::from("src/index.json"),
            site_src: PathBuf::from("src"),
            intro: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sites: vec![
                SiteConfig::new(
                    "documentation",
                    SiteKind::Vitepress,
                    "https://observablehq.com/documentation/",
                    Some("https://observablehq.com"),
                ),
                SiteConfig::new(
                    "d3",
                    SiteKind::Framework,
                    "https://d3.observablehq.cloud/examples/",
                    None,
                ),
                SiteConfig::new(
                    "d3docs",
                    SiteKind::Vitepress,
                    "https://d3js.org/",
                    Some("https://d3js.org"),
                ),
                SiteConfig::new(
                    "framework",
                    SiteKind::Framework,
                    "https://observablehq.com/framework/",
                    None,
                ),
                SiteConfig::new(
                    "pangea",
                    SiteKind::Framework,
                    "https://observablehq.observablehq.cloud/pangea/",
                    None,
                ),
                SiteConfig::new(
                    "plot",
                    SiteKind::Vitepress,
                    "https://observablehq.com/plot/",
                    Some("https://observablehq.com"),
                ),
            ],
            timeout_secs: 30,
        }
    }
}

/// Gallery options given on the command line
#[derive(Debug, Clone, Default)]
pub struct GalleryOverrides {
    pub http_root: Option<String>,
    pub categories: Option<PathBuf>,
    pub site_src: Option<PathBuf>,
    pub intro: Option<PathBuf>,
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults when the file is absent.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, gallery: GalleryOverrides, sites: &[String]) {
        if let Some(root) = gallery.http_root {
            self.gallery.http_root = root;
        }

        if let Some(categories) = gallery.categories {
            self.gallery.categories = categories;
        }

        if let Some(src) = gallery.site_src {
            self.gallery.site_src = src;
        }

        if gallery.intro.is_some() {
            self.gallery.intro = gallery.intro;
        }

        if !sites.is_empty() {
            self.search
                .sites
                .retain(|site| sites.iter().any(|name| name == &site.name));
        }
    }

    /// URL of the gallery's search index
    pub fn index_url(&self) -> String {
        format!(
            "{}/{}",
            self.gallery.http_root.trim_end_matches('/'),
            self.gallery.index_path.trim_start_matches('/')
        )
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let root = &self.gallery.http_root;
        if !(root.starts_with("http://") || root.starts_with("https://")) {
            return Err(Error::config_validation(format!(
                "http_root must be an http(s) URL, got {root:?}"
            )));
        }

        if self.search.timeout_secs == 0 {
            return Err(Error::config_validation("timeout_secs must be at least 1"));
        }

        let mut names = HashSet::new();
        for site in &self.search.sites {
            if site.name.is_empty() {
                return Err(Error::config_validation("site name cannot be empty"));
            }
            if !names.insert(site.name.as_str()) {
                return Err(Error::config_validation(format!(
                    "duplicate site name {:?}",
                    site.name
                )));
            }
            if !site.url.ends_with('/') {
                return Err(Error::config_validation(format!(
                    "site url must end with '/': {}",
                    site.url
                )));
            }
        }

        Ok(())
    }
}
