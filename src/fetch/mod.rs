// src/fetch/mod.rs
// =============================================================================
// The fetch transport the crawler pulls pages through.
//
// Crawler is generic over Fetcher so tests (and embedders) can swap the
// network for anything that maps a URL to a body.
//
// Submodules:
// - http: reqwest-backed implementation used by the CLI
// =============================================================================

mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// A fetched response: HTTP status plus the decoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// One attempt at `url`. Any failure costs only this page.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url).await
    }
}
