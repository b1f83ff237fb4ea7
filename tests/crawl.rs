use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

use site_scribe::error::FetchError;
use site_scribe::render::{render_html, RenderOptions};
use site_scribe::{
    ChannelSink, CrawlOptions, Crawler, CrawlerConfig, FetchedPage, Fetcher, NoopSink,
};

struct StaticSite {
    pages: HashMap<&'static str, (u16, &'static str)>,
}

#[async_trait]
impl Fetcher for StaticSite {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        match self.pages.get(url.as_str()) {
            Some((status, body)) => Ok(FetchedPage {
                status: *status,
                body: body.to_string(),
            }),
            None => Err(FetchError::Other(format!("no page at {}", url))),
        }
    }
}

fn site() -> StaticSite {
    let mut pages = HashMap::new();
    pages.insert(
        "https://example.com/",
        (
            200,
            r#"<html><head><title>Example</title><script>track()</script></head><body>
                <h1>Welcome</h1>
                <p>Start here.</p>
                <a href="/guide">Guide</a>
                <a href="/api">API</a>
                <a href="/faq">FAQ</a>
                <a href="https://elsewhere.org/partner">Partner</a>
                <div hidden><p>Internal notes.</p><a href="/secret">Secret</a></div>
                <section style="display: none"><h2>Draft</h2><a href="/draft">Draft</a></section>
            </body></html>"#,
        ),
    );
    pages.insert(
        "https://example.com/guide",
        (200, "<title>Guide</title><h2>Install</h2><p>cargo install</p>"),
    );
    pages.insert(
        "https://example.com/api",
        (200, "<title>API</title><h2>Endpoints</h2><p>GET /pages</p>"),
    );
    pages.insert(
        "https://example.com/faq",
        (404, "<title>Not Found</title><p>Nothing here.</p>"),
    );
    pages.insert(
        "https://example.com/secret",
        (200, "<title>Secret</title><p>should never be fetched</p>"),
    );
    pages.insert(
        "https://example.com/draft",
        (200, "<title>Draft</title><p>should never be fetched</p>"),
    );
    pages.insert(
        "https://elsewhere.org/partner",
        (200, "<title>Partner</title><p>should never be fetched</p>"),
    );
    StaticSite { pages }
}

fn options(depth: usize, max_pages: usize) -> CrawlOptions {
    CrawlOptions {
        crawl_depth: depth,
        max_pages,
        include_paths: Vec::new(),
        exclude_paths: Vec::new(),
    }
}

#[tokio::test]
async fn crawls_same_origin_links_one_level_down() {
    let crawler = Crawler::new(site(), CrawlerConfig::default());
    let pages = crawler
        .crawl("https://example.com/", &options(2, 10), &NoopSink)
        .await
        .unwrap();

    let urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/",
            "https://example.com/guide",
            "https://example.com/api",
            "https://example.com/faq",
        ]
    );
    assert_eq!(pages[0].content.title, "Example");
    assert_eq!(pages[0].content.paragraphs, vec!["Start here."]);
    assert!(pages[1..].iter().all(|p| p.depth == 2));

    // Error-status pages are kept with whatever body the server sent
    assert_eq!(pages[3].content.title, "Not Found");
}

#[tokio::test]
async fn hidden_content_and_its_links_are_left_out() {
    let crawler = Crawler::new(site(), CrawlerConfig::default());
    let pages = crawler
        .crawl("https://example.com/", &options(2, 10), &NoopSink)
        .await
        .unwrap();

    let home = &pages[0].content;
    assert!(home.headings.iter().all(|h| h.text != "Draft"));
    assert!(!home.paragraphs.iter().any(|p| p.contains("Internal notes")));
    assert!(pages
        .iter()
        .all(|p| !p.url.ends_with("/secret") && !p.url.ends_with("/draft")));
}

#[tokio::test]
async fn progress_events_match_results() {
    let crawler = Crawler::new(site(), CrawlerConfig::default());
    let (sink, mut rx) = ChannelSink::new(16);

    let pages = crawler
        .crawl("https://example.com/", &options(2, 3), &sink)
        .await
        .unwrap();
    drop(sink);

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    assert_eq!(pages.len(), 3);
    assert_eq!(events.len(), 3);
    for (n, (event, page)) in events.iter().zip(&pages).enumerate() {
        assert_eq!(event.pages_processed, n + 1);
        assert_eq!(event.current_url, page.url);
        assert_eq!(event.current_depth, page.depth);
    }
}

#[tokio::test]
async fn concurrent_crawls_share_a_fetcher_but_not_state() {
    let crawler = Arc::new(Crawler::new(Arc::new(site()), CrawlerConfig::default()));

    let a = {
        let crawler = crawler.clone();
        tokio::spawn(async move {
            crawler
                .crawl("https://example.com/", &options(2, 10), &NoopSink)
                .await
        })
    };
    let b = {
        let crawler = crawler.clone();
        tokio::spawn(async move {
            crawler
                .crawl("https://example.com/", &options(2, 2), &NoopSink)
                .await
        })
    };

    assert_eq!(a.await.unwrap().unwrap().len(), 4);
    assert_eq!(b.await.unwrap().unwrap().len(), 2);
}

#[tokio::test]
async fn crawl_result_renders_to_html() {
    let crawler = Crawler::new(site(), CrawlerConfig::default());
    let pages = crawler
        .crawl("https://example.com/", &options(2, 2), &NoopSink)
        .await
        .unwrap();

    let html = String::from_utf8(render_html(&pages, &RenderOptions::default())).unwrap();
    assert!(html.contains("Source: https://example.com/guide"));
    assert!(html.contains("<h2>Install</h2>"));
    assert!(!html.contains("track()"));
}
