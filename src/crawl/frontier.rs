// src/crawl/frontier.rs
// =============================================================================
// The frontier: which pages we know about and which are still waiting.
//
// Two sets and a queue:
// - seen:    every page ever enqueued (or the seed). This is the dedup key,
//            and its size is capped at the page bound.
// - visited: pages that have been dequeued for fetching, plus the pages a
//            redirect landed on.
// - queue:   FIFO of pages not fetched yet.
//
// seen never grows past `capacity`, so the queue can't either.
// =============================================================================

use std::collections::{HashSet, VecDeque};
use url::Url;

#[derive(Debug)]
pub struct Frontier {
    seen: HashSet<String>,
    visited: HashSet<String>,
    queue: VecDeque<String>,
    capacity: usize,
}

impl Frontier {
    // Starts with just the seed in the queue
    pub fn new(seed: &Url, capacity: usize) -> Self {
        let mut frontier = Self {
            seen: HashSet::new(),
            visited: HashSet::new(),
            queue: VecDeque::new(),
            capacity,
        };
        frontier.enqueue(seed);
        frontier
    }

    // Adds a page unless it's already known or the frontier is full
    //
    // Returns true if the page was actually queued
    pub fn enqueue(&mut self, url: &Url) -> bool {
        let key = page_key(url);
        if self.seen.contains(&key) || self.seen.len() >= self.capacity {
            return false;
        }
        self.seen.insert(key.clone());
        self.queue.push_back(key);
        true
    }

    // Next page to fetch, marked visited before it's handed out
    //
    // Marking here (not after the fetch) means a page can't be handed out
    // twice even if fetching ever becomes concurrent.
    pub fn next_page(&mut self) -> Option<String> {
        while let Some(url) = self.queue.pop_front() {
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }

    // Records a page we fetched without dequeuing it (a redirect target), so
    // it's never handed out again
    //
    // Returns false if it had already been visited
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(page_key(url))
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(&page_key(url))
    }

    /// Pages known so far (fetched or waiting)
    pub fn known_pages(&self) -> usize {
        self.seen.len()
    }

    pub fn visited_pages(&self) -> usize {
        self.visited.len()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

// Pages are keyed without their fragment
fn page_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}
