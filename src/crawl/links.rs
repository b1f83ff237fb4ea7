// src/crawl/links.rs
// =============================================================================
// Finds the links on a page that the crawler may follow next.
//
// A link is kept only if:
// 1. Its href resolves against the page URL
// 2. It is on the seed's host (host only; scheme and port are not compared)
// 3. It has no #fragment
// 4. It is not a mailto: link
// 5. The path filter allows its path
//
// Duplicates collapse to the first occurrence so the crawl order is stable.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, trace};
use url::Url;

use super::path_filter::PathFilter;

/// Returns the followable links of `document`, in first-seen order.
///
/// `page_url` resolves relative hrefs; `seed_host` is the host every kept
/// link must share.
pub fn discover_links(
    document: &Html,
    page_url: &Url,
    seed_host: &str,
    filter: &PathFilter,
) -> Vec<Url> {
    // "a[href]" is constant and known to be valid
    let anchors = Selector::parse("a[href]").expect("constant CSS selector must parse");

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    // Only anchors still attached to the tree; sanitize() detaches hidden
    // blocks but Html::select would still visit them.
    for element in document.root_element().select(&anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let url = match page_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(href, error = %e, "skipping unresolvable link");
                continue;
            }
        };

        if !is_followable(&url, seed_host, filter) {
            trace!(url = %url, "link filtered out");
            continue;
        }

        if seen.insert(url.as_str().to_string()) {
            links.push(url);
        }
    }

    links
}

fn is_followable(url: &Url, seed_host: &str, filter: &PathFilter) -> bool {
    url.scheme() != "mailto"
        && url.host_str() == Some(seed_host)
        && url.fragment().is_none()
        && filter.should_crawl(url.path())
}
