//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build tools for the Pangea gallery
#[derive(Parser, Debug)]
#[command(name = "pangea")]
#[command(about = "Build tools for the Pangea gallery")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the gallery home page from the site's search index
    Gallery {
        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Root URL of the running site preview
        #[arg(long)]
        http_root: Option<String>,

        /// Read the search index from a file instead of the preview server
        #[arg(long)]
        index: Option<PathBuf>,

        /// Category definitions file
        #[arg(long)]
        categories: Option<PathBuf>,

        /// Site source directory holding the thumbnails
        #[arg(long)]
        site_src: Option<PathBuf>,

        /// Markdown file replacing the built-in intro
        #[arg(long)]
        intro: Option<PathBuf>,

        /// Write the page to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append a listing of each category's page ids
        #[arg(long)]
        debug: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Combine the search indexes of the documentation sites into one JSON file
    Search {
        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only fetch these sites (can be repeated)
        #[arg(long = "site")]
        sites: Vec<String>,

        /// Write the JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Command::Gallery { verbose, .. } | Command::Search { verbose, .. } => *verbose,
            Command::Version => false,
        }
    }
}
