// src/config.rs
// =============================================================================
// Scan configuration.
//
// ScanOptions is what a caller hands us (from the CLI, or deserialized from a
// JSON request body in the host app). ScanTarget is the validated, immutable
// form the crawler actually runs against: the parsed seed URL plus the bounds.
// =============================================================================

use crate::error::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Identifying client string sent with every outbound request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Maximum redirects followed by the GET fallback probe
pub const MAX_REDIRECTS: usize = 5;

pub const DEFAULT_MAX_PAGES: usize = 50;
pub const DEFAULT_MAX_LINKS_PER_PAGE: usize = 100;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_BATCH_DELAY_MS: u64 = 100;

// Tunable bounds for one scan
//
// #[serde(default)] means a JSON body may omit any field and still get the
// defaults below, e.g. `{"maxPages": 10}` is a valid request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanOptions {
    /// Upper bound on pages fetched during discovery
    pub max_pages: usize,
    /// Upper bound on resources extracted from any single page
    pub max_links_per_page: usize,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum probes in flight at once
    pub concurrency: usize,
    /// Pause between probe batches in milliseconds (0 disables it)
    pub batch_delay_ms: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_links_per_page: DEFAULT_MAX_LINKS_PER_PAGE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            concurrency: DEFAULT_CONCURRENCY,
            batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
        }
    }
}

impl ScanOptions {
    // Rejects bounds that would make the scan a no-op or hang forever
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(MonitorError::InvalidOptions("maxPages must be at least 1".into()));
        }
        if self.max_links_per_page == 0 {
            return Err(MonitorError::InvalidOptions(
                "maxLinksPerPage must be at least 1".into(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(MonitorError::InvalidOptions("timeoutMs must be at least 1".into()));
        }
        if self.concurrency == 0 {
            return Err(MonitorError::InvalidOptions("concurrency must be at least 1".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

// The validated input of one scan. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct ScanTarget {
    base: Url,
    options: ScanOptions,
}

impl ScanTarget {
    // Parses the seed URL and validates the options
    //
    // This is the only place a scan can fail before it starts. The seed must
    // be an absolute http(s) URL with a host; its fragment is dropped since
    // it never changes which document gets fetched.
    pub fn new(seed_url: &str, options: ScanOptions) -> Result<Self> {
        options.validate()?;

        let mut base = Url::parse(seed_url.trim()).map_err(|e| MonitorError::InvalidUrl {
            url: seed_url.to_string(),
            reason: e.to_string(),
        })?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(MonitorError::UnsupportedScheme(base.scheme().to_string()));
        }

        if base.host_str().is_none() {
            return Err(MonitorError::InvalidUrl {
                url: seed_url.to_string(),
                reason: "URL has no host".into(),
            });
        }

        base.set_fragment(None);

        Ok(Self { base, options })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    // True when `url` shares scheme, host and port with the seed
    pub fn is_internal(&self, url: &Url) -> bool {
        url.origin() == self.base.origin()
    }
}
