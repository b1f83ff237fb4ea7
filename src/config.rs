// src/config.rs
// =============================================================================
// Configuration for a crawl.
//
// CrawlOptions: what to crawl. Comes from CLI flags or from a JSON file in
// the same camelCase shape the web front end posts:
//   { "crawlDepth": 2, "maxPages": 10, "includePaths": [], "excludePaths": ["/blog/**"] }
//
// CrawlerConfig: how to crawl. Transport and pacing settings that stay the
// same across many crawls run by one Crawler.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::OptionsError;

/// Limits and path rules for a single crawl. Immutable once the crawl starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOptions {
    /// Maximum link hops from the seed; the seed itself is depth 1
    pub crawl_depth: usize,

    /// Hard ceiling on pages admitted into the crawl
    pub max_pages: usize,

    /// Accepted for compatibility but not consulted when filtering links
    #[serde(default)]
    pub include_paths: Vec<String>,

    /// Glob patterns; a link whose path matches any of them is not followed
    #[serde(default)]
    pub exclude_paths: Vec<String>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            crawl_depth: 1,
            max_pages: 10,
            include_paths: Vec::new(),
            exclude_paths: Vec::new(),
        }
    }
}

impl CrawlOptions {
    /// Checks the numeric bounds. Called by the crawler before anything is fetched.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.crawl_depth < 1 {
            return Err(OptionsError::CrawlDepth(self.crawl_depth));
        }
        if self.max_pages < 1 {
            return Err(OptionsError::MaxPages(self.max_pages));
        }
        Ok(())
    }

    /// Loads options from a JSON file (the API request body shape).
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read options file '{}': {}", path.display(), e))?;
        let options: CrawlOptions = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid options file '{}': {}", path.display(), e))?;
        Ok(options)
    }
}

/// Settings for the crawler itself, shared by every crawl it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Requests allowed per rate-gate key within one window
    pub rate_limit_per_second: u32,

    /// Length of the rolling rate window, in milliseconds
    pub rate_window_ms: u64,

    /// Number of pages fetched at once (1 = strict depth-first order)
    pub concurrency: usize,

    /// Per-request timeout, in seconds
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Fixed pause after each successful fetch, in milliseconds (0 = none)
    pub politeness_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_second: 1,
            rate_window_ms: 1000,
            concurrency: 1,
            request_timeout_secs: 10,
            user_agent: format!("site-scribe/{}", env!("CARGO_PKG_VERSION")),
            politeness_delay_ms: 0,
        }
    }
}

impl CrawlerConfig {
    pub fn rate_window(&self) -> Duration {
        Duration::from_millis(self.rate_window_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn politeness_delay(&self) -> Option<Duration> {
        (self.politeness_delay_ms > 0).then(|| Duration::from_millis(self.politeness_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_request_shape() {
        let json = r#"{
            "crawlDepth": 2,
            "maxPages": 25,
            "includePaths": ["/docs/**"],
            "excludePaths": ["/blog/**", "/tags/*"]
        }"#;
        let options: CrawlOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.crawl_depth, 2);
        assert_eq!(options.max_pages, 25);
        assert_eq!(options.include_paths, vec!["/docs/**"]);
        assert_eq!(options.exclude_paths, vec!["/blog/**", "/tags/*"]);
    }

    #[test]
    fn test_path_lists_are_optional() {
        let options: CrawlOptions =
            serde_json::from_str(r#"{"crawlDepth": 1, "maxPages": 1}"#).unwrap();
        assert!(options.include_paths.is_empty());
        assert!(options.exclude_paths.is_empty());
    }

    #[test]
    fn test_validate_rejects_zero_bounds() {
        let mut options = CrawlOptions::default();
        assert!(options.validate().is_ok());

        options.crawl_depth = 0;
        assert_eq!(options.validate(), Err(OptionsError::CrawlDepth(0)));

        options.crawl_depth = 1;
        options.max_pages = 0;
        assert_eq!(options.validate(), Err(OptionsError::MaxPages(0)));
    }

    #[test]
    fn test_crawler_config_defaults() {
        let config: CrawlerConfig = serde_json::from_str(r#"{"concurrency": 4}"#).unwrap();
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.rate_limit_per_second, 1);
        assert_eq!(config.rate_window(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.politeness_delay(), None);
    }
}
