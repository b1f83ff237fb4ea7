// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
//   site-scribe crawl https://example.com --depth 2 --max-pages 20 \
//       --exclude '/blog/**' --format html --output docs.html
// =============================================================================

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use site_scribe::render::{FontSize, Margin};
use site_scribe::{CrawlOptions, CrawlerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "site-scribe",
    version,
    about = "Crawl a website and extract its readable content",
    long_about = "site-scribe walks a website from a starting URL, staying on the same host, \
                  and collects each page's title, headings and paragraphs. The result can be \
                  printed as JSON or rendered into a single printable HTML document."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website starting from a URL
    ///
    /// Example: site-scribe crawl https://example.com --depth 2
    Crawl(CrawlArgs),
}

#[derive(clap::Args, Debug)]
pub struct CrawlArgs {
    /// Seed URL to start from (e.g., https://example.com)
    pub url: String,

    /// Maximum crawl depth; 1 = only the starting page
    #[arg(long, default_value_t = 1)]
    pub depth: usize,

    /// Maximum number of pages to collect
    #[arg(long, default_value_t = 10)]
    pub max_pages: usize,

    /// Path glob to include (accepted, not used for filtering). Repeatable.
    #[arg(long = "include", value_name = "PATTERN")]
    pub include_paths: Vec<String>,

    /// Path glob to skip, e.g. '/blog/**'. Repeatable.
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude_paths: Vec<String>,

    /// JSON file with crawlDepth / maxPages / includePaths / excludePaths;
    /// overrides the flags above
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Font size for --format html
    #[arg(long, value_enum, default_value_t = FontSize::Medium)]
    pub font_size: FontSize,

    /// Page margin for --format html
    #[arg(long, value_enum, default_value_t = Margin::Medium)]
    pub margin: Margin,

    /// Write output to this file instead of stdout. For --format html without
    /// this flag, a file named after the site (example-com.html) is written.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of pages fetched at once (1 keeps strict depth-first order)
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Pause after each fetched page, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table of crawled pages
    Summary,
    /// The full crawl result as JSON
    Json,
    /// A printable HTML document
    Html,
}

impl CrawlArgs {
    /// Options for this crawl, from --options if given, else from the flags.
    pub fn crawl_options(&self) -> anyhow::Result<CrawlOptions> {
        if let Some(path) = &self.options {
            return CrawlOptions::from_json_file(path);
        }

        Ok(CrawlOptions {
            crawl_depth: self.depth,
            max_pages: self.max_pages,
            include_paths: self.include_paths.clone(),
            exclude_paths: self.exclude_paths.clone(),
        })
    }

    pub fn crawler_config(&self) -> CrawlerConfig {
        CrawlerConfig {
            concurrency: self.concurrency,
            politeness_delay_ms: self.delay_ms,
            request_timeout_secs: self.timeout_secs,
            ..CrawlerConfig::default()
        }
    }
}
