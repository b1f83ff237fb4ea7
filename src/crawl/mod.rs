// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first crawling from a seed URL, bounded by depth and page budget
// - Same-host restriction (never leaves the seed's site)
// - Glob-based exclude rules for paths
// - Per-URL rate gate, optional politeness delay
// - Progress events per crawled page, cancellation between pages
//
// Submodules:
// - orchestrator: the crawl loop and its crawl-scoped state
// - links: same-origin link discovery
// - path_filter: exclude-pattern matching
// - rate_gate: keyed rolling-window limiter
// - progress: progress events and sinks
// =============================================================================

mod links;
mod orchestrator;
mod path_filter;
mod progress;
mod rate_gate;

pub use links::discover_links;
pub use orchestrator::{CrawlResult, Crawler, PageResult};
pub use path_filter::{compile_pattern, is_path_match, should_crawl_path, PathFilter};
pub use progress::{ChannelSink, NoopSink, ProgressEvent, ProgressSink};
pub use rate_gate::RateGate;
