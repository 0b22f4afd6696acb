// src/crawl/probe.rs
// =============================================================================
// Phase 2: health-check every discovered resource, `concurrency` at a time.
//
// The resource list is cut into batches of `concurrency`. Each batch runs all
// its probes concurrently and we wait for the whole batch before starting the
// next one, so there are never more than `concurrency` requests in flight.
// A short pause between batches keeps us from hammering the target host.
//
// Non-network resources (mailto:, tel:) are never probed and always count as
// healthy.
// =============================================================================

use crate::checker::{classify, DiscoveredResource, ResourceProber};
use crate::config::ScanTarget;
use crate::report::BrokenLink;
use chrono::Utc;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct ProbeReport {
    pub broken_links: Vec<BrokenLink>,
    /// Resources whose check finished (probed or skipped)
    pub checked: usize,
}

pub async fn probe_resources(
    target: &ScanTarget,
    resources: &[DiscoveredResource],
    prober: &dyn ResourceProber,
) -> ProbeReport {
    let options = target.options();
    let batch_size = options.concurrency.max(1);
    let total_batches = resources.len().div_ceil(batch_size);

    // Probes in one batch finish in any order, so the counters are atomics
    let checked = AtomicUsize::new(0);
    let broken = AtomicUsize::new(0);
    let mut broken_links = Vec::new();

    info!(
        "Checking {} resource(s) in {} batch(es) of up to {}",
        resources.len(),
        total_batches,
        batch_size
    );

    for (index, batch) in resources.chunks(batch_size).enumerate() {
        if index > 0 && !options.batch_delay().is_zero() {
            tokio::time::sleep(options.batch_delay()).await;
        }

        let checked = &checked;
        let broken = &broken;
        let probes = batch.iter().map(move |resource| async move {
            let link = check_resource(target, resource, prober).await;
            checked.fetch_add(1, Ordering::SeqCst);
            if link.is_some() {
                broken.fetch_add(1, Ordering::SeqCst);
            }
            link
        });

        // One slot per resource; None means healthy
        let slots: Vec<Option<BrokenLink>> = join_all(probes).await;
        broken_links.extend(slots.into_iter().flatten());

        debug!(
            "Batch {}/{} done: {} checked, {} broken so far",
            index + 1,
            total_batches,
            checked.load(Ordering::SeqCst),
            broken.load(Ordering::SeqCst)
        );
    }

    ProbeReport {
        broken_links,
        checked: checked.into_inner(),
    }
}

async fn check_resource(
    target: &ScanTarget,
    resource: &DiscoveredResource,
    prober: &dyn ResourceProber,
) -> Option<BrokenLink> {
    if !resource.is_network() {
        return None;
    }

    let outcome = prober.probe(resource.url.as_str()).await;
    classify(resource, &outcome, target, Utc::now())
}
