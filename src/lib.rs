// src/lib.rs
// =============================================================================
// site-scribe: crawl a website and pull out its readable content.
//
// The crate is split the same way the crawl flows:
//   fetch   -> get a page body (HttpFetcher, or any Fetcher you plug in)
//   content -> strip noise, extract title / headings / paragraphs
//   crawl   -> the crawl loop, link discovery, path rules, rate gate, progress
//   render  -> turn the finished crawl into a printable HTML document
//
// Example:
//   let crawler = Crawler::http(CrawlerConfig::default())?;
//   let pages = crawler.crawl("https://example.com", &CrawlOptions::default(), &NoopSink).await?;
// =============================================================================

pub mod config;
pub mod content;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod render;

pub use config::{CrawlOptions, CrawlerConfig};
pub use content::{ExtractedContent, Heading};
pub use crawl::{ChannelSink, CrawlResult, Crawler, NoopSink, PageResult, ProgressEvent, ProgressSink};
pub use error::CrawlError;
pub use fetch::{FetchedPage, Fetcher, HttpFetcher};
