// src/main.rs
// =============================================================================
// Entry point of the site-scribe CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Run the crawl, printing a progress line per page as it completes
// 4. Print or write the result (summary table, JSON, or HTML document)
// 5. Exit with proper code (0 = pages collected, 1 = nothing collected, 2 = error)
//
// Ctrl-C stops the crawl between pages; whatever was collected is still output.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, CrawlArgs, OutputFormat};
use site_scribe::render::{self, RenderOptions};
use site_scribe::{ChannelSink, Crawler, PageResult};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so JSON/HTML on stdout stays clean.
// RUST_LOG wins over --log-level when both are set.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("site_scribe={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Crawl(args) => handle_crawl(args).await,
    }
}

async fn handle_crawl(args: CrawlArgs) -> Result<i32> {
    let options = args.crawl_options()?;
    let crawler = Crawler::http(args.crawler_config()).context("Failed to create HTTP client")?;

    eprintln!("🔍 Crawling: {}", args.url);
    eprintln!(
        "📊 Max depth: {}, max pages: {}",
        options.crawl_depth, options.max_pages
    );

    // Progress events are drained on their own task
    let (sink, mut events) = ChannelSink::new(32);
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            eprintln!(
                "  [{}] depth {}: {}",
                event.pages_processed, event.current_depth, event.current_url
            );
        }
    });

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n⏹️  Stopping crawl...");
            on_ctrl_c.cancel();
        }
    });

    let pages = crawler
        .crawl_with_cancellation(&args.url, &options, &sink, cancel)
        .await?;

    // Closing the sink ends the printer task once it has drained
    drop(sink);
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "progress printer task failed");
    }

    eprintln!("📄 Crawled {} page(s)", pages.len());

    write_output(&args, &pages)?;

    if pages.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn write_output(args: &CrawlArgs, pages: &[PageResult]) -> Result<()> {
    match args.format {
        OutputFormat::Summary => {
            print_table(pages);
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({ "pages": pages }))?;
            match &args.output {
                Some(path) => write_file(path, json.as_bytes()),
                None => {
                    println!("{}", json);
                    Ok(())
                }
            }
        }
        OutputFormat::Html => {
            let render_options = RenderOptions {
                font_size: args.font_size,
                margin: args.margin,
            };
            let bytes = render::render_html(pages, &render_options);
            let path = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{}.html", render::file_stem_for(&args.url))));
            write_file(&path, &bytes)
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("💾 Wrote {}", path.display());
    Ok(())
}

// Prints crawled pages as a human-readable table
fn print_table(pages: &[PageResult]) {
    println!("{:<6} {:<60} {:<30}", "DEPTH", "URL", "TITLE");
    println!("{}", "=".repeat(96));

    for page in pages {
        println!(
            "{:<6} {:<60} {:<30}",
            page.depth,
            truncate(&page.url, 57),
            truncate(page.content.title.trim(), 27)
        );
    }

    println!();

    let headings: usize = pages.iter().map(|p| p.content.headings.len()).sum();
    let paragraphs: usize = pages.iter().map(|p| p.content.paragraphs.len()).sum();

    println!("📊 Summary:");
    println!("   📄 Pages: {}", pages.len());
    println!("   🔖 Headings: {}", headings);
    println!("   📝 Paragraphs: {}", paragraphs);
}

// Char-based so multi-byte titles don't get cut mid-character
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
