// src/lib.rs
// =============================================================================
// link-monitor: crawl a website and report its broken links.
//
// The crate is used in-process by the host application:
//
//     let result = link_monitor::scan("https://example.com", ScanOptions::default()).await?;
//
// scan() only returns an error when the scan can't even start (bad URL, bad
// options). Once it starts it always produces a complete ScanResult.
//
// Module map:
// - config:  ScanOptions / ScanTarget
// - checker: HTML extraction, HTTP probing, classification
// - crawl:   BFS discovery and batched probing
// - monitor: LinkMonitor, which runs a whole scan
// - report:  ScanResult and friends, plus ResultSink
// =============================================================================

pub mod checker;
pub mod config;
pub mod crawl;
pub mod error;
pub mod monitor;
pub mod report;

pub use config::{ScanOptions, ScanTarget};
pub use error::{MonitorError, Result};
pub use monitor::LinkMonitor;
pub use report::{
    BrokenLink, JsonFileSink, Priority, ResourceKind, ResultSink, ScanProgress, ScanResult,
    ScanSummary,
};

// Scans one site over real HTTP with the given bounds
pub async fn scan(seed_url: &str, options: ScanOptions) -> Result<ScanResult> {
    let monitor = LinkMonitor::new(seed_url, options)?;
    Ok(monitor.scan().await)
}
