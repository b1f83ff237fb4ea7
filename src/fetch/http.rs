// src/fetch/http.rs
// =============================================================================
// The default fetch transport: one GET per page with reqwest.
//
// - A single attempt; no retries
// - Redirects follow reqwest's default policy
// - Non-2xx responses are NOT errors here: the status comes back alongside
//   the body and the crawler decides what to do with it
// - Timeouts and connection failures are FetchErrors
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::{FetchedPage, Fetcher};
use crate::config::CrawlerConfig;
use crate::error::FetchError;

/// Fetches pages over HTTP(S). Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "response received");

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedPage {
            status: status.as_u16(),
            body,
        })
    }
}

// Timeouts get their own variant so logs read "request timed out" instead of
// reqwest's full error chain
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(error)
    }
}
