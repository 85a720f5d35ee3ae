//! CLI module for the pangea tools

mod args;

pub use args::{Args, Command};

use crate::categories::CategoryMap;
use crate::config::{Config, GalleryOverrides};
use crate::error::{Error, Result};
use crate::fetch::{Fetch, HttpFetcher};
use crate::gallery::{Gallery, Thumbnails};
use crate::minisearch::SearchIndex;
use crate::output::{TemplateEngine, DEFAULT_INTRO};
use crate::search::Aggregator;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG: &str = "pangea.toml";

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_tracing(args.command.verbose());

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Filter used when `RUST_LOG` is unset
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,pangea=debug"
    } else {
        "warn"
    }
}

/// Log to stderr; stdout carries the generated document
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Gallery {
            config,
            http_root,
            index,
            categories,
            site_src,
            intro,
            output,
            debug,
            verbose: _,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            cfg.merge_cli(
                GalleryOverrides {
                    http_root,
                    categories,
                    site_src,
                    intro,
                },
                &[],
            );
            cfg.validate()?;

            let categories = CategoryMap::load(&cfg.gallery.categories)?;
            tracing::debug!(
                path = %cfg.gallery.categories.display(),
                count = categories.len(),
                "loaded categories"
            );

            let json = match &index {
                Some(path) => read_file(path)?,
                None => {
                    let fetcher = HttpFetcher::new(Duration::from_secs(cfg.search.timeout_secs))?;
                    fetcher.fetch_text(&cfg.index_url())?
                }
            };
            let search_index = SearchIndex::from_json(&json)?;

            let thumbnails = Thumbnails::new(&cfg.gallery.site_src);
            let gallery = Gallery::build(&search_index, &categories, &thumbnails)?;

            let intro = match &cfg.gallery.intro {
                Some(path) => read_file(path)?,
                None => DEFAULT_INTRO.to_string(),
            };

            let page = TemplateEngine::new()?.render_page(&gallery, &intro, debug)?;
            write_output(output.as_deref(), &page)
        }

        Command::Search {
            config,
            sites,
            output,
            verbose: _,
        } => {
            let mut cfg = load_config(config.as_deref())?;

            if let Some(unknown) = sites
                .iter()
                .find(|name| !cfg.search.sites.iter().any(|s| &s.name == *name))
            {
                return Err(Error::config_validation(format!("unknown site {unknown:?}")));
            }
            cfg.merge_cli(GalleryOverrides::default(), &sites);

            let fetcher = HttpFetcher::new(Duration::from_secs(cfg.search.timeout_secs))?;
            let combined = Aggregator::new(&fetcher)
                .with_progress(true)
                .collect(&cfg.search.sites)?;

            write_output(output.as_deref(), &serde_json::to_string(&combined)?)
        }

        Command::Version => {
            println!("pangea {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load the config named on the command line, or `pangea.toml` if present
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::PathNotFound(path.to_path_buf()));
            }
            Config::load(path)
        }
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG)),
    }
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::PathNotFound(PathBuf::from(path)));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Write the generated document to a file, or to stdout
fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, contents)?;
            tracing::info!(path = %path.display(), bytes = contents.len(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_quiet() {
        assert_eq!(default_filter(false), "warn");
    }

    #[test]
    fn test_verbose_filter_keeps_other_crates_warnings() {
        let filter = default_filter(true);
        assert_eq!(filter, "warn,pangea=debug");
        assert!(filter.parse::<EnvFilter>().is_ok());
    }
}
