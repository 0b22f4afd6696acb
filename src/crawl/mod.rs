// src/crawl/mod.rs
// =============================================================================
// This module handles the two phases of a site scan.
//
// Features:
// - Breadth-first discovery starting from the seed URL (frontier + queue)
// - Same-origin restriction (never crawls external sites)
// - Page-count and per-page bounds, so cyclic sites still terminate
// - Batched resource probing with a hard ceiling on in-flight requests
//
// Rust concepts:
// - Async programming: For network requests
// - Collections: HashSet for dedup, VecDeque for the BFS queue
// - Atomics: For counters shared by concurrently running probes
// =============================================================================

mod frontier;
mod probe;
mod queue;

pub use frontier::Frontier;
pub use probe::{probe_resources, ProbeReport};
pub use queue::{discover, Discovery};
