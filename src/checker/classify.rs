// src/checker/classify.rs
// =============================================================================
// Turns a failing probe into a BrokenLink with a kind and a priority.
//
// Kind comes from the file extension first (images, scripts, stylesheets),
// then from the origin (internal vs external). Priority is then a function of
// kind and status code only:
//
//   status >= 500                                  -> high
//   status >= 400 and internal/script/stylesheet   -> high
//   status >= 400 and image                        -> medium
//   anything else that is broken                   -> low
//
// Nothing here touches the network or the clock; the caller passes the
// timestamp in. Same inputs, same BrokenLink.
// =============================================================================

use super::html::DiscoveredResource;
use super::http::ProbeOutcome;
use crate::config::ScanTarget;
use crate::report::{BrokenLink, Priority, ResourceKind};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "ico", "avif", "tif", "tiff",
];
const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs"];
const STYLESHEET_EXTENSIONS: &[&str] = &["css"];

// Works out what a URL points at
pub fn resource_kind(url: &Url, target: &ScanTarget) -> ResourceKind {
    if let Some(extension) = path_extension(url) {
        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return ResourceKind::Image;
        }
        if SCRIPT_EXTENSIONS.contains(&extension.as_str()) {
            return ResourceKind::Script;
        }
        if STYLESHEET_EXTENSIONS.contains(&extension.as_str()) {
            return ResourceKind::Stylesheet;
        }
    }

    if url.host_str().is_none() {
        ResourceKind::Other
    } else if target.is_internal(url) {
        ResourceKind::Internal
    } else {
        ResourceKind::External
    }
}

pub fn priority_for(kind: ResourceKind, status_code: Option<u16>) -> Priority {
    match status_code {
        Some(status) if status >= 500 => Priority::High,
        Some(status) if status >= 400 => match kind {
            ResourceKind::Internal | ResourceKind::Script | ResourceKind::Stylesheet => {
                Priority::High
            }
            ResourceKind::Image => Priority::Medium,
            ResourceKind::External | ResourceKind::Other => Priority::Low,
        },
        _ => Priority::Low,
    }
}

// Builds the BrokenLink for a failing outcome, or None if the resource is fine
pub fn classify(
    resource: &DiscoveredResource,
    outcome: &ProbeOutcome,
    target: &ScanTarget,
    checked_at: DateTime<Utc>,
) -> Option<BrokenLink> {
    let (status_code, error) = match outcome {
        ProbeOutcome::Status(status) if *status >= 400 => (Some(*status), describe_status(*status)),
        ProbeOutcome::Status(_) => return None,
        ProbeOutcome::Failed(error) => (None, error.to_string()),
    };

    let kind = resource_kind(&resource.url, target);

    Some(BrokenLink {
        url: resource.url.to_string(),
        source_page: resource.source_page.clone(),
        link_text: resource.link_text.clone(),
        kind,
        status_code,
        error,
        priority: priority_for(kind, status_code),
        checked_at,
    })
}

// Lowercased extension of the last path segment, e.g. "png" for /a/b.PNG
fn path_extension(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.last()?;
    let (stem, extension) = segment.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

fn describe_status(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason());
    match reason {
        Some(reason) => format!("HTTP {} {}", status, reason),
        None => format!("HTTP {}", status),
    }
}
