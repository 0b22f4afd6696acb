// src/monitor.rs
// =============================================================================
// LinkMonitor ties the pieces together into one scan:
//
//   discover pages  ->  probe every resource  ->  tally the results
//
// A scan never fails once it has started. Pages that won't load, resources
// that time out, even a seed that can't be reached at all: all of it ends up
// as counters and BrokenLink entries in a complete ScanResult.
//
// Each LinkMonitor owns nothing shared between scans. Two monitors for two
// different sites can run side by side without touching each other's state.
// =============================================================================

use crate::checker::{HttpChecker, PageFetcher, ResourceProber};
use crate::config::{ScanOptions, ScanTarget};
use crate::crawl::{discover, probe_resources};
use crate::error::Result;
use crate::report::{ScanProgress, ScanResult, ScanSummary};
use std::sync::Arc;
use tracing::info;

pub struct LinkMonitor {
    target: ScanTarget,
    fetcher: Arc<dyn PageFetcher>,
    prober: Arc<dyn ResourceProber>,
}

impl LinkMonitor {
    // Builds a monitor that uses real HTTP for both fetching and probing
    //
    // Fails only if the seed URL or options are invalid, or the HTTP client
    // can't be built.
    pub fn new(seed_url: &str, options: ScanOptions) -> Result<Self> {
        let target = ScanTarget::new(seed_url, options)?;
        let checker = Arc::new(HttpChecker::new(target.options())?);
        Ok(Self::with_collaborators(target, checker.clone(), checker))
    }

    // Builds a monitor around caller-supplied fetcher and prober
    pub fn with_collaborators(
        target: ScanTarget,
        fetcher: Arc<dyn PageFetcher>,
        prober: Arc<dyn ResourceProber>,
    ) -> Self {
        Self {
            target,
            fetcher,
            prober,
        }
    }

    pub fn target(&self) -> &ScanTarget {
        &self.target
    }

    pub async fn scan(&self) -> ScanResult {
        let mut progress = ScanProgress::start();
        info!("Starting link scan of {}", self.target.base());

        let discovery = discover(&self.target, self.fetcher.as_ref()).await;
        progress.total_pages = discovery.pages_known;
        progress.scanned_pages = discovery.pages_scanned;
        progress.total_links = discovery.resources.len();

        let report = probe_resources(&self.target, &discovery.resources, self.prober.as_ref()).await;
        progress.checked_links = report.checked;
        progress.broken_links = report.broken_links.len();
        progress.finish();

        let summary = ScanSummary::from_broken_links(progress.total_links, &report.broken_links);

        info!(
            "Scan of {} complete: {} page(s), {} resource(s), {} broken",
            self.target.base(),
            progress.scanned_pages,
            progress.total_links,
            summary.broken_links_found
        );

        ScanResult {
            broken_links: report.broken_links,
            progress,
            summary,
        }
    }
}
