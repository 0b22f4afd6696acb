// Shared fakes for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use link_monitor::checker::{FetchedPage, PageFetcher, ProbeOutcome, ResourceProber};
use link_monitor::{MonitorError, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

// A website held in memory: page URL -> HTML, plus per-URL fetch counts
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }

    pub fn max_fetches_per_url(&self) -> usize {
        self.fetches.lock().unwrap().values().copied().max().unwrap_or(0)
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default() += 1;
        let html = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| MonitorError::PageStatus {
                url: url.to_string(),
                status: 404,
            })?;
        Ok(FetchedPage {
            url: Url::parse(url).unwrap(),
            html,
        })
    }
}

// Answers probes from a table (200 for anything unlisted) and records how
// many probes were running at the same moment
pub struct FakeProber {
    outcomes: HashMap<String, ProbeOutcome>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    probed: Mutex<Vec<String>>,
}

impl FakeProber {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            delay: Duration::from_millis(2),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn outcome(mut self, url: &str, outcome: ProbeOutcome) -> Self {
        self.outcomes.insert(url.to_string(), outcome);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceProber for FakeProber {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        self.probed.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.outcomes
            .get(url)
            .cloned()
            .unwrap_or(ProbeOutcome::Status(200))
    }
}
