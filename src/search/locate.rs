// Locating hashed assets in served bundles

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use regex::{Regex, RegexBuilder};

/// Pattern for an asset named `<needle>.<hash>.<ext>`, case-insensitive
pub fn asset_pattern(needle: &str, ext: &str) -> Result<Regex> {
    let pattern = format!(
        r"\b{}\.[a-z0-9_-]+\.{}\b",
        regex::escape(needle),
        regex::escape(ext)
    );
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

/// First asset name matching `needle`/`ext` in `haystack`
pub fn find_in(haystack: &str, needle: &str, ext: &str) -> Result<Option<String>> {
    Ok(asset_pattern(needle, ext)?
        .find(haystack)
        .map(|m| m.as_str().to_string()))
}

/// Fetch `url` and return the first asset name matching `needle`/`ext`
pub fn find_asset(fetcher: &dyn Fetch, needle: &str, ext: &str, url: &str) -> Result<String> {
    let haystack = fetcher.fetch_text(url)?;
    let name = find_in(&haystack, needle, ext)?
        .ok_or_else(|| Error::pattern_not_found(needle, url))?;
    tracing::debug!(url, asset = %name, "located asset");
    Ok(name)
}
