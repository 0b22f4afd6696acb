// src/crawl/queue.rs
// =============================================================================
// Phase 1: breadth-first page discovery.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Take the next page, mark it visited, fetch its HTML (if it redirects,
//    the final URL is marked visited too and becomes the page's URL)
// 3. Extract resources (links, images, stylesheets, scripts), capped per page
// 4. Queue same-origin anchors we haven't seen (while there's room)
// 5. Add every resource to the site-wide set, deduplicated by URL
// 6. Repeat until the frontier is empty or we've scanned max_pages pages
//
// A page that fails to fetch contributes nothing and the crawl moves on. It
// only shows up as broken if another page links to it, because then it gets
// probed like any other resource.
//
// Rust concepts:
// - HashSet: To deduplicate resources (O(1) lookup)
// - &dyn Trait: The fetcher can be real HTTP or a test fake
// =============================================================================

use super::frontier::Frontier;
use crate::checker::{
    extract_resources, is_network_url, normalize_url, DiscoveredResource, PageFetcher,
};
use crate::config::ScanTarget;
use std::collections::HashSet;
use tracing::{debug, info, warn};

// What discovery hands to the probing phase
#[derive(Debug, Default)]
pub struct Discovery {
    /// Every distinct resource found, first reference wins
    pub resources: Vec<DiscoveredResource>,
    /// Pages known to the frontier (fetched or still queued)
    pub pages_known: usize,
    /// Pages fetched and parsed successfully
    pub pages_scanned: usize,
}

// Site-wide resource set, keeps first-seen order
#[derive(Debug, Default)]
struct ResourceSet {
    seen: HashSet<String>,
    items: Vec<DiscoveredResource>,
}

impl ResourceSet {
    fn insert(&mut self, resource: DiscoveredResource) -> bool {
        if !self.seen.insert(resource.url.to_string()) {
            return false;
        }
        self.items.push(resource);
        true
    }
}

// Crawls the site behind `target` and collects every resource it references
pub async fn discover(target: &ScanTarget, fetcher: &dyn PageFetcher) -> Discovery {
    let options = target.options();
    let mut frontier = Frontier::new(target.base(), options.max_pages);
    let mut resources = ResourceSet::default();
    let mut pages_scanned = 0;

    while pages_scanned < options.max_pages {
        let Some(page) = frontier.next_page() else {
            break;
        };

        debug!("Crawling [{}/{}]: {}", pages_scanned + 1, options.max_pages, page);

        let fetched = match fetcher.fetch_page(&page).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Failed to fetch {}: {}", page, e);
                continue;
            }
        };

        // Links resolve against where the page actually lives, which after a
        // redirect is not the URL we dequeued
        let page_url = normalize_url(fetched.url);
        if page_url.as_str() != page
            && target.is_internal(&page_url)
            && !frontier.mark_visited(&page_url)
        {
            debug!("{} redirected to {}, already crawled", page, page_url);
            continue;
        }

        pages_scanned += 1;

        let found = extract_resources(&fetched.html, &page_url, options.max_links_per_page);
        let mut new_resources = 0;
        let mut new_pages = 0;

        for resource in found {
            if should_follow(target, &frontier, &resource) && frontier.enqueue(&resource.url) {
                new_pages += 1;
            }
            if resources.insert(resource) {
                new_resources += 1;
            }
        }

        debug!(
            "{}: {} new resource(s), {} new page(s) queued, {} waiting",
            page_url,
            new_resources,
            new_pages,
            frontier.pending()
        );
    }

    info!(
        "Discovery finished: {} page(s) scanned, {} visited, {} known, {} unique resource(s)",
        pages_scanned,
        frontier.visited_pages(),
        frontier.known_pages(),
        resources.items.len()
    );

    Discovery {
        resources: resources.items,
        pages_known: frontier.known_pages(),
        pages_scanned,
    }
}

// Same-origin anchors over http(s) that we haven't fetched yet
fn should_follow(target: &ScanTarget, frontier: &Frontier, resource: &DiscoveredResource) -> bool {
    resource.element.is_navigable()
        && is_network_url(&resource.url)
        && target.is_internal(&resource.url)
        && !frontier.is_visited(&resource.url)
}
