// src/report.rs
// =============================================================================
// The scan result and everything inside it.
//
// These are the types the host application persists. They serialize to JSON
// with camelCase field names (brokenLinks, isComplete, brokenLinksFound...)
// because that is the shape the report/storage layer already consumes.
//
// Also defines ResultSink, the seam through which a finished result leaves
// the crawler (the CLI uses the JSON file sink below).
// =============================================================================

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What kind of resource a broken link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A page on the same origin as the seed
    Internal,
    /// A page on some other origin
    External,
    Image,
    Script,
    Stylesheet,
    /// Anything we can't place (e.g. a URL without a host)
    Other,
}

/// How urgently a broken link should be fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

// One failing resource. Created once by the classifier, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenLink {
    /// The resource that failed
    pub url: String,
    /// The page the resource was first found on
    pub source_page: String,
    /// Anchor text or image alt text, if the element had any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
    #[serde(rename = "linkType")]
    pub kind: ResourceKind,
    /// HTTP status, absent for network-level failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub error: String,
    pub priority: Priority,
    pub checked_at: DateTime<Utc>,
}

// Running counters for one scan
//
// Counters only ever go up. finish() flips is_complete and stamps the end
// time, and only the first call does anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanProgress {
    pub total_pages: usize,
    pub scanned_pages: usize,
    pub total_links: usize,
    pub checked_links: usize,
    pub broken_links: usize,
    pub is_complete: bool,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScanProgress {
    pub fn start() -> Self {
        Self {
            total_pages: 0,
            scanned_pages: 0,
            total_links: 0,
            checked_links: 0,
            broken_links: 0,
            is_complete: false,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn finish(&mut self) {
        if self.is_complete {
            return;
        }
        self.is_complete = true;
        self.completed_at = Some(Utc::now());
    }
}

// Per-kind tally computed once from the final broken list
//
// Scripts, stylesheets and unplaceable resources all land in `other`, so the
// four buckets always add up to broken_links_found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_links_found: usize,
    pub broken_links_found: usize,
    pub internal_broken_links: usize,
    pub external_broken_links: usize,
    pub image_broken_links: usize,
    pub other_broken_links: usize,
}

impl ScanSummary {
    pub fn from_broken_links(total_links_found: usize, broken_links: &[BrokenLink]) -> Self {
        let mut summary = Self {
            total_links_found,
            broken_links_found: broken_links.len(),
            ..Self::default()
        };

        for link in broken_links {
            match link.kind {
                ResourceKind::Internal => summary.internal_broken_links += 1,
                ResourceKind::External => summary.external_broken_links += 1,
                ResourceKind::Image => summary.image_broken_links += 1,
                ResourceKind::Script | ResourceKind::Stylesheet | ResourceKind::Other => {
                    summary.other_broken_links += 1
                }
            }
        }

        summary
    }
}

/// Everything one scan produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub broken_links: Vec<BrokenLink>,
    pub progress: ScanProgress,
    pub summary: ScanSummary,
}

impl ScanResult {
    pub fn has_broken_links(&self) -> bool {
        !self.broken_links.is_empty()
    }
}

// Receives a finished scan. The crawler never calls this itself; whoever ran
// the scan decides where the result goes.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn store(&self, result: &ScanResult) -> Result<()>;
}

// Writes the result as pretty-printed JSON to a file
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ResultSink for JsonFileSink {
    async fn store(&self, result: &ScanResult) -> Result<()> {
        let json = serde_json::to_vec_pretty(result)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::info!("Scan result written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken(kind: ResourceKind) -> BrokenLink {
        BrokenLink {
            url: "https://example.com/x".to_string(),
            source_page: "https://example.com/".to_string(),
            link_text: None,
            kind,
            status_code: Some(404),
            error: "HTTP 404 Not Found".to_string(),
            priority: Priority::Low,
            checked_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_buckets_add_up() {
        let links = vec![
            broken(ResourceKind::Internal),
            broken(ResourceKind::External),
            broken(ResourceKind::Image),
            broken(ResourceKind::Script),
            broken(ResourceKind::Stylesheet),
            broken(ResourceKind::Other),
        ];
        let summary = ScanSummary::from_broken_links(20, &links);

        assert_eq!(summary.total_links_found, 20);
        assert_eq!(summary.broken_links_found, links.len());
        assert_eq!(summary.internal_broken_links, 1);
        assert_eq!(summary.external_broken_links, 1);
        assert_eq!(summary.image_broken_links, 1);
        assert_eq!(summary.other_broken_links, 3);
        assert_eq!(
            summary.internal_broken_links
                + summary.external_broken_links
                + summary.image_broken_links
                + summary.other_broken_links,
            summary.broken_links_found
        );
    }

    #[test]
    fn test_finish_only_once() {
        let mut progress = ScanProgress::start();
        assert!(!progress.is_complete);

        progress.finish();
        let first = progress.completed_at;
        assert!(progress.is_complete);
        assert!(first.is_some());

        progress.finish();
        assert_eq!(progress.completed_at, first);
    }

    #[test]
    fn test_json_field_names() {
        let result = ScanResult {
            broken_links: vec![broken(ResourceKind::Image)],
            progress: ScanProgress::start(),
            summary: ScanSummary::default(),
        };
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["brokenLinks"].is_array());
        assert_eq!(json["brokenLinks"][0]["linkType"], "image");
        assert_eq!(json["brokenLinks"][0]["statusCode"], 404);
        assert_eq!(json["progress"]["isComplete"], false);
        assert!(json["summary"]["brokenLinksFound"].is_number());
    }

    #[tokio::test]
    async fn test_json_file_sink_writes_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        let mut progress = ScanProgress::start();
        progress.finish();
        let result = ScanResult {
            broken_links: Vec::new(),
            progress,
            summary: ScanSummary::default(),
        };

        JsonFileSink::new(&path).store(&result).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: ScanResult = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, result);
    }
}
