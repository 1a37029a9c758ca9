// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Build the HTTP downloader and the crawler engine
// 4. Crawl, print the result, shut the engine down
// 5. Exit with proper code (0 = no errors, 1 = some URLs failed, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - engine settings
mod crawl; // src/crawl/ - the concurrent crawl engine
mod error; // src/error.rs - error types
mod fetch; // src/fetch/ - downloading and link extraction

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::CrawlerConfig;
use crawl::{CrawlResult, WebCrawler};
use fetch::HttpDownloader;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `--json` output on stdout stays machine-readable
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parallel_crawler=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Returns:
//   Ok(0) = every reachable URL was downloaded
//   Ok(1) = some URLs failed
//   Err = bad arguments or the crawler could not start
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config = CrawlerConfig::from(&cli);
    let downloader = HttpDownloader::new(Duration::from_secs(cli.timeout_secs))?;
    let crawler = WebCrawler::new(Arc::new(downloader), &config)?;

    let result = crawler.crawl(&cli.url, cli.depth).await;
    crawler.close();
    let result = result?;

    print_results(&result, cli.json)?;

    if result.errors.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Prints the result either as a table or JSON
fn print_results(result: &CrawlResult, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(result)?;
        println!("{}", json_output);
    } else {
        print_table(result);
    }
    Ok(())
}

fn print_table(result: &CrawlResult) {
    println!("Downloaded:");
    for url in &result.downloaded {
        println!("   {}", url);
    }

    if !result.errors.is_empty() {
        println!();
        println!("{:<60} {:<16} {:<30}", "URL", "KIND", "MESSAGE");
        println!("{}", "=".repeat(106));
        for (url, error) in &result.errors {
            println!("{:<60} {:<16} {:<30}", truncate(url, 57), error.kind(), error.message());
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Downloaded: {}", result.downloaded.len());
    println!("   ❌ Errors: {}", result.errors.len());
}

// Truncates a URL for display, respecting UTF-8 character boundaries
fn truncate(url: &str, max_chars: usize) -> String {
    if url.chars().count() > max_chars {
        let head: String = url.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}
