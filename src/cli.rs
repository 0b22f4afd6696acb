// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is a thin driver around the library: one `scan` subcommand whose
// flags map one-to-one onto ScanOptions.
// =============================================================================

use clap::{Parser, Subcommand};
use link_monitor::config::{
    ScanOptions, DEFAULT_BATCH_DELAY_MS, DEFAULT_CONCURRENCY, DEFAULT_MAX_LINKS_PER_PAGE,
    DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_MS,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "link-monitor",
    version,
    about = "Crawl a website and report broken links, images, scripts and stylesheets",
    long_about = "link-monitor crawls a website breadth-first, checks every link and asset it \
                  finds with a bounded number of concurrent requests, and reports what is broken \
                  with a priority for each failure."
)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a website for broken links
    ///
    /// Example: link-monitor scan https://example.com --max-pages 20
    Scan {
        /// Website URL to scan (e.g., https://example.com)
        website_url: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Also write the JSON result to this file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Maximum number of pages to crawl
        #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages: usize,

        /// Maximum number of links extracted from a single page
        #[arg(long, default_value_t = DEFAULT_MAX_LINKS_PER_PAGE)]
        max_links_per_page: usize,

        /// Per-request timeout in milliseconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
        timeout_ms: u64,

        /// Maximum number of link checks in flight at once
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Pause between batches of link checks in milliseconds
        #[arg(long, default_value_t = DEFAULT_BATCH_DELAY_MS)]
        batch_delay_ms: u64,
    },
}

impl Commands {
    pub fn scan_options(&self) -> ScanOptions {
        match self {
            Commands::Scan {
                max_pages,
                max_links_per_page,
                timeout_ms,
                concurrency,
                batch_delay_ms,
                ..
            } => ScanOptions {
                max_pages: *max_pages,
                max_links_per_page: *max_links_per_page,
                timeout_ms: *timeout_ms,
                concurrency: *concurrency,
                batch_delay_ms: *batch_delay_ms,
            },
        }
    }
}
