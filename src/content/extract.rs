// src/content/extract.rs
// =============================================================================
// Turns a parsed HTML page into plain structured text.
//
// Two passes:
// 1. sanitize(): detach everything a reader never sees (scripts, styles,
//    iframes, noscript blocks, [hidden] elements, inline display:none).
// 2. extract_content(): read the title, the h1-h6 headings and the non-empty
//    paragraphs, all in document order.
//
// We use the `scraper` crate for parsing and CSS selectors. scraper keeps the
// DOM in an ego_tree::Tree, which is what lets us detach nodes in place.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

// Elements removed before any text is read
const NOISE_SELECTOR: &str = "script, style, iframe, noscript, [hidden], \
     [style*=\"display:none\"], [style*=\"display: none\"]";

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// A heading as it appeared on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1 for <h1> through 6 for <h6>
    pub level: u8,
    pub text: String,
}

/// The readable content of one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Text of <title>, empty if the page has none
    pub title: String,
    pub headings: Vec<Heading>,
    /// Trimmed text of every non-empty <p>
    pub paragraphs: Vec<String>,
}

// Our selectors are constants, so a parse failure is a programmer error
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("constant CSS selector must parse")
}

/// Removes non-content nodes from the document in place.
pub fn sanitize(document: &mut Html) {
    let noise = selector(NOISE_SELECTOR);

    // Collect first: the tree can't be mutated while select() borrows it
    let ids: Vec<_> = document
        .root_element()
        .select(&noise)
        .map(|el| el.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Reads title, headings and paragraphs from an already-sanitized document.
pub fn extract_content(document: &Html) -> ExtractedContent {
    // Html::select walks the whole node arena, detached subtrees included;
    // selecting from the root element only reaches nodes still attached.
    let root = document.root_element();

    let title = root
        .select(&selector("title"))
        .map(|el| element_text(&el))
        .collect::<String>();

    let headings = root
        .select(&selector(HEADING_SELECTOR))
        .filter_map(|el| {
            let level = heading_level(el.value().name())?;
            Some(Heading {
                level,
                text: element_text(&el).trim().to_string(),
            })
        })
        .collect();

    let paragraphs = root
        .select(&selector("p"))
        .map(|el| element_text(&el).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    ExtractedContent {
        title,
        headings,
        paragraphs,
    }
}

/// Parses, sanitizes and extracts in one go.
pub fn extract_from_html(html: &str) -> ExtractedContent {
    let mut document = Html::parse_document(html);
    sanitize(&mut document);
    extract_content(&document)
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect()
}

// "h3" -> 3
fn heading_level(tag: &str) -> Option<u8> {
    let digit = tag.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&digit).then_some(digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_is_stripped() {
        let html = r#"<html><body>
            <script>var secret = "do not show";</script>
            <p>text</p>
        </body></html>"#;
        let content = extract_from_html(html);
        assert!(content.headings.is_empty());
        assert_eq!(content.paragraphs, vec!["text"]);
        assert!(!format!("{:?}", content).contains("do not show"));
    }

    #[test]
    fn test_title_and_headings_in_order() {
        let html = r#"<html><head><title>Docs Home</title></head><body>
            <h2>  Install </h2>
            <h1>Welcome</h1>
            <h6>Footnote</h6>
        </body></html>"#;
        let content = extract_from_html(html);
        assert_eq!(content.title, "Docs Home");
        assert_eq!(
            content.headings,
            vec![
                Heading { level: 2, text: "Install".to_string() },
                Heading { level: 1, text: "Welcome".to_string() },
                Heading { level: 6, text: "Footnote".to_string() },
            ]
        );
    }

    #[test]
    fn test_missing_title_is_empty() {
        let content = extract_from_html("<p>only a paragraph</p>");
        assert_eq!(content.title, "");
    }

    #[test]
    fn test_empty_paragraphs_are_dropped() {
        let html = "<p>   </p><p>first</p><p></p><p>\n second \n</p>";
        let content = extract_from_html(html);
        assert_eq!(content.paragraphs, vec!["first", "second"]);
    }

    #[test]
    fn test_hidden_elements_are_stripped() {
        let html = r#"<body>
            <div hidden><p>hidden attribute</p></div>
            <div style="display:none"><p>no space</p></div>
            <p style="color: red; display: none">with space</p>
            <h1 style="display:none">hidden heading</h1>
            <p>visible</p>
        </body>"#;
        let content = extract_from_html(html);
        assert_eq!(content.paragraphs, vec!["visible"]);
        assert!(content.headings.is_empty());
    }

    #[test]
    fn test_hidden_block_content_never_extracted() {
        let html = r#"<div hidden><p>secret</p><h2>hid</h2></div>
            <script>x()</script>
            <p>text</p>"#;
        let content = extract_from_html(html);
        assert!(content.headings.is_empty());
        assert_eq!(content.paragraphs, vec!["text"]);
    }

    #[test]
    fn test_hidden_title_is_dropped() {
        let html = r#"<html><head><title hidden>Secret</title></head><body><p>x</p></body></html>"#;
        assert_eq!(extract_from_html(html).title, "");
    }

    #[test]
    fn test_style_iframe_noscript_are_stripped() {
        let html = r#"<head><style>p { color: red }</style></head><body>
            <noscript><p>enable javascript</p></noscript>
            <iframe src="https://ads.example.com"></iframe>
            <p>kept</p>
        </body>"#;
        let content = extract_from_html(html);
        assert_eq!(content.paragraphs, vec!["kept"]);
    }

    #[test]
    fn test_nested_markup_text_is_flattened() {
        let html = "<p>Read the <a href='/docs'>docs</a> and <em>enjoy</em>.</p>";
        let content = extract_from_html(html);
        assert_eq!(content.paragraphs, vec!["Read the docs and enjoy."]);
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("header"), None);
    }
}
