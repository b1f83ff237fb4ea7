// src/content/mod.rs
// =============================================================================
// Readable-content extraction from HTML pages.
//
// Submodules:
// - extract: noise stripping plus title/heading/paragraph extraction
// =============================================================================

mod extract;

pub use extract::{extract_content, extract_from_html, sanitize, ExtractedContent, Heading};
