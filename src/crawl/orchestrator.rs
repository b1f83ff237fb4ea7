// src/crawl/orchestrator.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Validate the options and the seed URL (the only fatal failures)
// 2. Push the seed onto a work list as (url, depth 1)
// 3. Pop an item and claim it: skip if already visited, over the page
//    budget, or deeper than crawlDepth
// 4. Rate gate -> fetch -> parse -> strip noise -> extract
// 5. Record the page, emit a progress event
// 6. If depth < crawlDepth, push the page's links (reversed, so the first
//    link is popped next)
// 7. Repeat until the work list is empty, the budget is spent, or the crawl
//    is cancelled
//
// The work list is a stack, so with concurrency = 1 pages complete in
// depth-first, left-to-right order: a page's first link and everything below
// it finish before its second link is tried.
//
// A page that fails (transport, body, rate gate) is logged and released from
// the visited set. Its links are not followed and its siblings carry on.
//
// All mutable crawl state lives in CrawlState, created fresh inside each
// crawl() call. A Crawler can run many crawls at once without them sharing
// anything but the fetcher.
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::links::discover_links;
use super::path_filter::PathFilter;
use super::progress::{ProgressEvent, ProgressSink};
use super::rate_gate::RateGate;
use crate::config::{CrawlOptions, CrawlerConfig};
use crate::content::{extract_content, sanitize, ExtractedContent};
use crate::error::{CrawlError, FetchError};
use crate::fetch::{Fetcher, HttpFetcher};

/// One crawled page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub url: String,
    pub content: ExtractedContent,
    /// Link hops from the seed; the seed is 1
    pub depth: usize,
}

/// Pages in the order they completed
pub type CrawlResult = Vec<PageResult>;

// An entry in the work list
#[derive(Debug, Clone)]
struct CrawlItem {
    url: Url,
    depth: usize,
}

// What a successful fetch produced
#[derive(Debug)]
struct ProcessedPage {
    content: ExtractedContent,
    links: Vec<Url>,
}

// Read-only inputs shared by every in-flight page of one crawl
struct PageEnv<'a> {
    options: &'a CrawlOptions,
    seed_host: String,
    filter: PathFilter,
    gate: RateGate,
}

// Mutable state of one crawl; only the crawl loop touches it
#[derive(Default)]
struct CrawlState {
    visited: HashSet<String>,
    results: CrawlResult,
    stack: Vec<CrawlItem>,
}

impl CrawlState {
    // Check-and-insert in one step; this is the only way a URL enters the
    // visited set, so neither the uniqueness nor the budget can be raced.
    fn claim(&mut self, item: &CrawlItem, options: &CrawlOptions) -> bool {
        if item.depth > options.crawl_depth
            || self.visited.len() >= options.max_pages
            || self.visited.contains(item.url.as_str())
        {
            return false;
        }
        self.visited.insert(item.url.as_str().to_string())
    }

    fn release(&mut self, url: &Url) {
        self.visited.remove(url.as_str());
    }

    // Budget here counts recorded pages, not claims: an in-flight URL may
    // still fail and be released, and its slot must stay reachable. The
    // hard ceiling is enforced again by claim().
    fn schedule_links(&mut self, links: Vec<Url>, depth: usize, options: &CrawlOptions) {
        if self.results.len() >= options.max_pages {
            return;
        }
        for url in links.into_iter().rev() {
            if !self.visited.contains(url.as_str()) {
                self.stack.push(CrawlItem { url, depth });
            }
        }
    }
}

/// Crawls websites through a `Fetcher`.
#[derive(Debug, Clone)]
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlerConfig,
}

impl Crawler<HttpFetcher> {
    /// A crawler that fetches over the network with reqwest.
    pub fn http(config: CrawlerConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlerConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawls from `seed_url` until the work list, depth or page budget runs out.
    ///
    /// Only an unusable seed URL or invalid options fail the call; individual
    /// pages that fail are left out of the result.
    pub async fn crawl(
        &self,
        seed_url: &str,
        options: &CrawlOptions,
        sink: &dyn ProgressSink,
    ) -> Result<CrawlResult, CrawlError> {
        self.crawl_with_cancellation(seed_url, options, sink, CancellationToken::new())
            .await
    }

    /// Like `crawl`, but stops between pages once `cancel` fires and returns
    /// whatever was collected so far.
    #[instrument(skip_all, fields(seed = %seed_url))]
    pub async fn crawl_with_cancellation(
        &self,
        seed_url: &str,
        options: &CrawlOptions,
        sink: &dyn ProgressSink,
        cancel: CancellationToken,
    ) -> Result<CrawlResult, CrawlError> {
        options.validate()?;

        let seed = Url::parse(seed_url)
            .map_err(|e| CrawlError::CrawlFailed(format!("Invalid URL '{}': {}", seed_url, e)))?;

        let seed_host = seed
            .host_str()
            .ok_or_else(|| CrawlError::CrawlFailed(format!("URL has no host: {}", seed_url)))?
            .to_string();

        info!(
            depth = options.crawl_depth,
            max_pages = options.max_pages,
            excludes = options.exclude_paths.len(),
            "starting crawl"
        );

        let env = PageEnv {
            options,
            seed_host,
            filter: PathFilter::new(&options.exclude_paths),
            gate: RateGate::new(self.config.rate_limit_per_second, self.config.rate_window()),
        };

        let mut state = CrawlState::default();
        state.stack.push(CrawlItem { url: seed, depth: 1 });

        let concurrency = self.config.concurrency.max(1);
        let mut in_flight = FuturesUnordered::new();

        loop {
            if cancel.is_cancelled() {
                info!("crawl cancelled");
                break;
            }

            // Top up the worker pool from the work list
            while in_flight.len() < concurrency {
                let Some(item) = state.stack.pop() else {
                    break;
                };
                if !state.claim(&item, options) {
                    continue;
                }
                debug!(url = %item.url, depth = item.depth, "crawling");
                in_flight.push(self.process_page(&env, item));
            }

            if in_flight.is_empty() {
                break;
            }

            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                outcome = in_flight.next() => outcome,
            };
            let Some((item, outcome)) = next else {
                continue;
            };

            match outcome {
                Ok(page) => {
                    state.results.push(PageResult {
                        url: item.url.to_string(),
                        content: page.content,
                        depth: item.depth,
                    });

                    let event = ProgressEvent {
                        pages_processed: state.results.len(),
                        current_depth: item.depth,
                        current_url: item.url.to_string(),
                    };
                    if let Err(e) = sink.emit(event).await {
                        warn!(error = %e, "progress sink failed");
                    }

                    state.schedule_links(page.links, item.depth + 1, options);
                }
                Err(e) => {
                    warn!(url = %item.url, error = %e, "skipping page");
                    state.release(&item.url);
                }
            }
        }

        info!(pages = state.results.len(), "crawl finished");
        Ok(state.results)
    }

    async fn process_page(
        &self,
        env: &PageEnv<'_>,
        item: CrawlItem,
    ) -> (CrawlItem, Result<ProcessedPage, CrawlError>) {
        let outcome = self.fetch_and_extract(env, &item).await;
        (item, outcome)
    }

    async fn fetch_and_extract(
        &self,
        env: &PageEnv<'_>,
        item: &CrawlItem,
    ) -> Result<ProcessedPage, CrawlError> {
        env.gate.acquire(item.url.as_str())?;

        let page = self.fetcher.fetch(&item.url).await.map_err(|e| match e {
            FetchError::Body(reason) => CrawlError::Parse {
                url: item.url.to_string(),
                reason,
            },
            source => CrawlError::Fetch {
                url: item.url.to_string(),
                source,
            },
        })?;

        if !page.is_success() {
            debug!(url = %item.url, status = page.status, "non-success status, keeping body");
        }

        let processed = parse_page(&page.body, item, env);

        if let Some(delay) = self.config.politeness_delay() {
            tokio::time::sleep(delay).await;
        }

        Ok(processed)
    }
}

// Kept synchronous: scraper::Html is not Send, so it must never live across
// an await point.
fn parse_page(body: &str, item: &CrawlItem, env: &PageEnv<'_>) -> ProcessedPage {
    let mut document = Html::parse_document(body);
    sanitize(&mut document);

    let content = extract_content(&document);

    let links = if item.depth < env.options.crawl_depth {
        discover_links(&document, &item.url, &env.seed_host, &env.filter)
    } else {
        Vec::new()
    };

    ProcessedPage { content, links }
}
