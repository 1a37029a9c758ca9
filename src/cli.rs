// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Example:
//   parallel-crawler https://example.com --depth 2 --per-host 4 --json
// =============================================================================

use clap::Parser;

use crate::config::{DEFAULT_DOWNLOADS, DEFAULT_EXTRACTORS, DEFAULT_PER_HOST};

#[derive(Parser, Debug)]
#[command(
    name = "parallel-crawler",
    version = "0.1.0",
    about = "Crawl every page reachable from a URL within a link-depth budget",
    long_about = "parallel-crawler downloads a page and everything it links to, up to --depth \
                  levels, using separate worker pools for downloading and link extraction \
                  and never running more than --per-host downloads against one host at a time."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    pub url: String,

    /// Crawl depth (1 = just the starting page, 2 = the page and its links, ...)
    #[arg(long, default_value_t = 3)]
    pub depth: usize,

    /// Number of parallel downloads
    #[arg(long, default_value_t = DEFAULT_DOWNLOADS)]
    pub downloaders: usize,

    /// Number of parallel link extractions
    #[arg(long, default_value_t = DEFAULT_EXTRACTORS)]
    pub extractors: usize,

    /// Maximum parallel downloads against a single host
    #[arg(long, default_value_t = DEFAULT_PER_HOST)]
    pub per_host: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}
