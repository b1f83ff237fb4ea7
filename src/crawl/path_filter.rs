// src/crawl/path_filter.rs
// =============================================================================
// Decides whether a discovered link's path should be crawled.
//
// Patterns are glob-style and anchored to the whole path:
//   **  any characters, across segments, possibly none
//   *   any characters, non-greedy
//   /   optional when matching ("/blog/**" also matches "/blog")
// Everything else matches literally. A trailing slash on either the path or
// the pattern is ignored.
//
// Only exclude patterns are consulted. includePaths is carried in
// CrawlOptions but does not allow-list anything.
// =============================================================================

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::error::PatternError;

// Keeps a pathological pattern from compiling into a huge automaton
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Compiled exclude rules for one crawl.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    // None = the pattern failed to compile and never matches
    excludes: Vec<(String, Option<Regex>)>,
}

impl PathFilter {
    /// Compiles every exclude pattern once, up front.
    ///
    /// A malformed pattern is logged and degrades to "never matches".
    pub fn new(exclude_paths: &[String]) -> Self {
        let excludes = exclude_paths
            .iter()
            .map(|pattern| {
                let matcher = match compile_pattern(pattern) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(error = %e, "ignoring exclude pattern");
                        None
                    }
                };
                (pattern.clone(), matcher)
            })
            .collect();

        Self { excludes }
    }

    /// Returns false if the first matching exclude pattern rejects the path.
    pub fn should_crawl(&self, path: &str) -> bool {
        let path = normalize_path(path);
        let path = strip_trailing_slash(&path);

        for (pattern, matcher) in &self.excludes {
            if matcher.as_ref().is_some_and(|re| re.is_match(path)) {
                debug!(path, pattern = %pattern, "path excluded");
                return false;
            }
        }

        true
    }
}

/// One-off form of `PathFilter::should_crawl`.
pub fn should_crawl_path(path: &str, exclude_paths: &[String]) -> bool {
    PathFilter::new(exclude_paths).should_crawl(path)
}

/// Tests a single path against a single glob pattern.
pub fn is_path_match(path: &str, pattern: &str) -> bool {
    match compile_pattern(pattern) {
        Ok(re) => re.is_match(strip_trailing_slash(path)),
        Err(_) => false,
    }
}

/// Translates a glob into an anchored regex.
pub fn compile_pattern(pattern: &str) -> Result<Regex, PatternError> {
    let source = glob_to_regex(strip_trailing_slash(pattern));

    RegexBuilder::new(&source)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| PatternError {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    out.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str(".*");
            }
            '*' => out.push_str(".*?"),
            '/' => out.push_str("/?"),
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }

    out.push('$');
    out
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}
