use std::path::PathBuf;
use thiserror::Error;

/// Pangea tool error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Http { url: String, status: u16 },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("can't find {needle} in {url}")]
    PatternNotFound { needle: String, url: String },

    #[error("Couldn't find {0}")]
    UnknownPage(String),

    #[error("Invalid search index: {0}")]
    Index(String),

    #[error("Invalid JavaScript string literal: {0}")]
    JsLiteral(String),
}

/// Result type alias for pangea operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a "pattern not found" error for a bundle lookup
    pub fn pattern_not_found(needle: impl Into<String>, url: impl Into<String>) -> Self {
        Error::PatternNotFound {
            needle: needle.into(),
            url: url.into(),
        }
    }

    /// Create an invalid search index error
    pub fn index(msg: impl Into<String>) -> Self {
        Error::Index(msg.into())
    }

    /// Create a JavaScript literal decoding error
    pub fn js_literal(msg: impl Into<String>) -> Self {
        Error::JsLiteral(msg.into())
    }
}
