// src/checker/http.rs
// =============================================================================
// This module talks to the network: it fetches pages for the crawler and
// probes resources to see whether they are alive.
//
// Key functionality:
// - Makes HTTP HEAD requests first (lightweight, no body download)
// - Falls back to a single GET if HEAD fails at the network level, or if the
//   server answers HEAD with 405/501 (plenty of servers simply don't do HEAD)
// - Sorts network failures into typed errors (timeout, DNS, refused, ...)
//
// Rust concepts:
// - async/await: For network I/O
// - Enums: To represent the probe outcome
// - Traits: HttpChecker implements both PageFetcher and ResourceProber
// =============================================================================

use super::{FetchedPage, PageFetcher, ResourceProber};
use crate::config::{ScanOptions, MAX_REDIRECTS, USER_AGENT};
use crate::error::{MonitorError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::error::Error as StdError;
use thiserror::Error;
use tracing::debug;

// Why a probe failed without getting a status code back
//
// The #[error(...)] text is what ends up in BrokenLink.error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Request timed out")]
    Timeout,
    #[error("Could not resolve hostname")]
    Dns,
    #[error("Connection refused")]
    ConnectionRefused,
    #[error("Too many redirects")]
    TooManyRedirects,
    #[error("TLS/SSL error")]
    Tls,
    #[error("{0}")]
    Other(String),
}

// Result of checking one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered (any status, including 4xx/5xx)
    Status(u16),
    /// The request never got an answer
    Failed(ProbeError),
}

impl ProbeOutcome {
    pub fn is_broken(&self) -> bool {
        match self {
            ProbeOutcome::Status(status) => *status >= 400,
            ProbeOutcome::Failed(_) => true,
        }
    }
}

// reqwest-backed fetcher and prober
//
// One client for the whole scan so connections to the target host are pooled.
// Client is cheap to clone (it's an Arc internally).
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: Client,
}

impl HttpChecker {
    pub fn new(options: &ScanOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }

    // The fallback probe: a full GET that follows redirects
    //
    // We only need the status line, so the body is never read; dropping the
    // response closes it.
    async fn probe_with_get(&self, url: &str) -> ProbeOutcome {
        match self.client.get(url).send().await {
            Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
            Err(e) => {
                debug!("GET failed for {}: {}", url, e);
                ProbeOutcome::Failed(categorize_error(&e))
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpChecker {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?;

        // Where the redirects (if any) ended up
        let final_url = response.url().clone();
        if final_url.as_str() != url {
            debug!("{} redirected to {}", url, final_url);
        }

        if !response.status().is_success() {
            return Err(MonitorError::PageStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        // No content-type header at all is treated as HTML; many small
        // servers leave it off
        let is_html = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("html"))
            .unwrap_or(true);

        if !is_html {
            return Err(MonitorError::NotHtml(url.to_string()));
        }

        Ok(FetchedPage {
            url: final_url,
            html: response.text().await?,
        })
    }
}

#[async_trait]
impl ResourceProber for HttpChecker {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.head(url).send().await {
            Ok(response) if head_unsupported(response.status()) => {
                debug!("HEAD not supported by {} ({}), retrying with GET", url, response.status());
                self.probe_with_get(url).await
            }
            Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
            Err(e) => {
                debug!("HEAD failed for {}: {}, retrying with GET", url, e);
                self.probe_with_get(url).await
            }
        }
    }
}

// 405 Method Not Allowed / 501 Not Implemented on a HEAD say nothing about
// whether the resource exists
fn head_unsupported(status: StatusCode) -> bool {
    matches!(status, StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED)
}

// Categorizes different error types from reqwest
//
// reqwest wraps hyper which wraps std::io, so the useful detail is usually a
// few levels down the source() chain. We check the typed flags first, then
// the io::ErrorKind, then fall back to matching on the message text.
fn categorize_error(error: &reqwest::Error) -> ProbeError {
    if error.is_timeout() {
        return ProbeError::Timeout;
    }
    if error.is_redirect() {
        return ProbeError::TooManyRedirects;
    }

    let chain = error_chain_text(error);

    if has_io_error_kind(error, std::io::ErrorKind::ConnectionRefused)
        || chain.contains("connection refused")
    {
        ProbeError::ConnectionRefused
    } else if has_io_error_kind(error, std::io::ErrorKind::TimedOut) {
        ProbeError::Timeout
    } else if chain.contains("dns")
        || chain.contains("failed to lookup address")
        || chain.contains("name or service not known")
        || chain.contains("no such host")
    {
        ProbeError::Dns
    } else if chain.contains("certificate") || chain.contains("tls") || chain.contains("ssl") {
        ProbeError::Tls
    } else if error.is_connect() {
        ProbeError::Other("Connection failed".to_string())
    } else {
        ProbeError::Other(error.to_string())
    }
}

fn error_chain_text(error: &reqwest::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text.to_lowercase()
}

fn has_io_error_kind(error: &reqwest::Error, kind: std::io::ErrorKind) -> bool {
    let mut source = error.source();
    while let Some(inner) = source {
        if let Some(io_error) = inner.downcast_ref::<std::io::Error>() {
            if io_error.kind() == kind {
                return true;
            }
        }
        source = inner.source();
    }
    false
}
