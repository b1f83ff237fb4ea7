// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// Two kinds of failure exist:
// - Page-level: Fetch, Parse and RateLimitExceeded. One URL is abandoned and
//   the crawl carries on with the next one.
// - Crawl-level: CrawlFailed. Nothing was crawled because the request itself
//   was unusable (bad seed URL, invalid options).
//
// The binary wraps these in anyhow; the library keeps them typed with
// thiserror so callers can match on the variant.
// =============================================================================

use thiserror::Error;

/// Everything `Crawler::crawl` and the per-page pipeline can fail with.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The transport could not deliver the page
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The page body could not be turned into a document
    #[error("failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },

    /// The rate gate refused the request for this key
    #[error("rate limit exceeded for {key}")]
    RateLimitExceeded { key: String },

    /// Fatal: the crawl never started
    #[error("Crawling failed: {0}")]
    CrawlFailed(String),
}

/// Transport failures reported by a `Fetcher`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("could not read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

/// A path glob that could not be compiled into a matcher.
#[derive(Debug, Error)]
#[error("invalid path pattern '{pattern}': {reason}")]
pub struct PatternError {
    pub pattern: String,
    pub reason: String,
}

/// Rejected `CrawlOptions` values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("crawlDepth must be at least 1, got {0}")]
    CrawlDepth(usize),

    #[error("maxPages must be at least 1, got {0}")]
    MaxPages(usize),
}

impl From<OptionsError> for CrawlError {
    fn from(e: OptionsError) -> Self {
        CrawlError::CrawlFailed(e.to_string())
    }
}

/// The progress consumer went away or refused an event.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("progress receiver closed")]
    Closed,
}
