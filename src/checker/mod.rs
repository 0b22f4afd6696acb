// src/checker/mod.rs
// =============================================================================
// This module contains everything that looks at a single page or resource.
//
// Submodules:
// - html: Extracts resource references from HTML pages
// - http: Fetches pages and probes resources over HTTP
// - classify: Turns failing probes into prioritized BrokenLink entries
//
// It also defines the two seams the crawler talks through. The crawler only
// ever sees these traits, so tests can swap in fakes that never touch the
// network.
// =============================================================================

mod classify;
mod html;
mod http;

use crate::error::Result;
use async_trait::async_trait;
use url::Url;

pub use classify::{classify, priority_for, resource_kind};
pub use html::{extract_resources, is_network_url, normalize_url, DiscoveredResource, ElementKind};
pub use http::{HttpChecker, ProbeError, ProbeOutcome};

// A page body together with the address it was actually served from
//
// After a redirect `url` is the final location, and relative links on the
// page resolve against it rather than against the address we asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: Url,
    pub html: String,
}

// Fetches a page so its links can be extracted
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the HTML and final URL, or an error if the page can't be used
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage>;
}

// Checks whether a resource is reachable
//
// Never fails: every kind of failure is a ProbeOutcome
#[async_trait]
pub trait ResourceProber: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeOutcome;
}
