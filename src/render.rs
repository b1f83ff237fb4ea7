// src/render.rs
// =============================================================================
// Renders a crawl result as one printable HTML document.
//
// Each page becomes a block with its source URL, its title as <h1>, then its
// headings and paragraphs. Blocks are separated by CSS page breaks so a
// browser's "print to PDF" gives one section per crawled page.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use url::Url;

use crate::crawl::PageResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn css(self) -> &'static str {
        match self {
            FontSize::Small => "14px",
            FontSize::Medium => "16px",
            FontSize::Large => "18px",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Margin {
    None,
    Small,
    #[default]
    Medium,
    Large,
}

impl Margin {
    pub fn css(self) -> &'static str {
        match self {
            Margin::None => "0px",
            Margin::Small => "10px",
            Margin::Medium => "20px",
            Margin::Large => "40px",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub margin: Margin,
}

/// Renders `pages` into an HTML document, returned as UTF-8 bytes.
pub fn render_html(pages: &[PageResult], options: &RenderOptions) -> Vec<u8> {
    let mut out = String::new();

    // Writing into a String cannot fail, so the fmt::Results are ignored
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<style>
  @page {{ margin: {margin}; }}
  body {{ font-family: Arial, sans-serif; font-size: {font}; line-height: 1.6; color: #333; }}
  h1 {{ font-size: 2em; margin: 0.67em 0; }}
  h2 {{ font-size: 1.5em; margin: 0.75em 0; }}
  h3 {{ font-size: 1.17em; margin: 0.83em 0; }}
  .page-break {{ page-break-after: always; }}
  .url {{ color: #666; font-size: 0.9em; margin-bottom: 1em; }}
</style>
</head>
<body>
"#,
        margin = options.margin.css(),
        font = options.font_size.css(),
    );

    for (index, page) in pages.iter().enumerate() {
        let class = if index + 1 < pages.len() {
            "page page-break"
        } else {
            "page"
        };

        let _ = writeln!(out, r#"<div class="{}">"#, class);
        let _ = writeln!(out, r#"<div class="url">Source: {}</div>"#, escape(&page.url));
        let _ = writeln!(out, "<h1>{}</h1>", escape(&page.content.title));

        for heading in &page.content.headings {
            let level = heading.level.clamp(1, 6);
            let _ = writeln!(out, "<h{0}>{1}</h{0}>", level, escape(&heading.text));
        }
        for paragraph in &page.content.paragraphs {
            let _ = writeln!(out, "<p>{}</p>", escape(paragraph));
        }

        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out.into_bytes()
}

/// File name stem for a crawl of `url`: "https://www.example.com" -> "example-com".
pub fn file_stem_for(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .map(|host| {
            host.strip_prefix("www.")
                .unwrap_or(host.as_str())
                .replace('.', "-")
        })
        .unwrap_or_else(|| "website".to_string())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
