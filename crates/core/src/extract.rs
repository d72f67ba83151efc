//! Raw title extraction driven by a theater's declarative configuration.
//!
//! Sites come in two shapes. Most list one title per node, and the list
//! selector points straight at those nodes. Others write a sentence such as
//! `Now Playing: A, B, C` into a single node; for those a text search pattern
//! with one capture group pulls out the comma separated list.

use regex::Regex;
use scraper::Selector;
use tracing::debug;

use crate::error::ExtractError;
use crate::parse::{Document, compile_selector};
use crate::{MarqueeError, Result};

/// Separator used both to join node text and to split a captured title list.
pub const TITLE_SEPARATOR: &str = ", ";

/// A compiled list selector plus an optional text search pattern.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    selector_source: String,
    selector: Selector,
    text_search: Option<Regex>,
}

impl TitleExtractor {
    /// Compiles the selector and pattern.
    ///
    /// # Errors
    ///
    /// [`MarqueeError::InvalidSelector`] for unparsable CSS, and
    /// [`MarqueeError::InvalidPattern`] for an invalid regex or one without a
    /// capture group.
    pub fn new(list_selector: &str, text_search: Option<&str>) -> Result<Self> {
        let selector = compile_selector(list_selector)?;
        let text_search = text_search.map(compile_pattern).transpose()?;

        Ok(Self { selector_source: list_selector.to_string(), selector, text_search })
    }

    pub fn list_selector(&self) -> &str {
        &self.selector_source
    }

    pub fn text_search(&self) -> Option<&str> {
        self.text_search.as_ref().map(Regex::as_str)
    }

    /// Produces the raw, un-normalized titles found in `document`.
    ///
    /// Without a text search, each selected node contributes its single string
    /// in document order; nodes without one are dropped. With a text search,
    /// the nodes' strings are joined with [`TITLE_SEPARATOR`], the pattern is
    /// applied, and its first capture is split on the same separator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use marquee_core::{Document, TitleExtractor};
    ///
    /// let doc = Document::parse("<p><span>Now Playing: Alien, Brazil</span></p>").unwrap();
    /// let extractor = TitleExtractor::new("p > span", Some("Now Playing: (.+)")).unwrap();
    /// assert_eq!(extractor.extract(&doc).unwrap(), vec!["Alien", "Brazil"]);
    /// ```
    pub fn extract(&self, document: &Document) -> std::result::Result<Vec<String>, ExtractError> {
        let nodes = document.select_compiled(&self.selector);
        debug!(selector = %self.selector_source, count = nodes.len(), "selected title nodes");

        if nodes.is_empty() {
            return Err(ExtractError::NoMatches { selector: self.selector_source.clone() });
        }

        let strings: Vec<String> = nodes.iter().filter_map(|node| node.own_text()).collect();

        match &self.text_search {
            None => Ok(strings.into_iter().filter(|s| !s.is_empty()).collect()),
            Some(pattern) => split_capture(pattern, &strings.join(TITLE_SEPARATOR)),
        }
    }
}

/// Extracts raw titles from `document` with a one-off selector and pattern.
pub fn extract_titles(document: &Document, list_selector: &str, text_search: Option<&str>) -> Result<Vec<String>> {
    let extractor = TitleExtractor::new(list_selector, text_search)?;
    extractor.extract(document).map_err(MarqueeError::from)
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern)
        .map_err(|e| MarqueeError::InvalidPattern { pattern: pattern.to_string(), reason: e.to_string() })?;

    if regex.captures_len() < 2 {
        return Err(MarqueeError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "pattern needs a capture group".to_string(),
        });
    }

    Ok(regex)
}

fn split_capture(pattern: &Regex, text: &str) -> std::result::Result<Vec<String>, ExtractError> {
    debug!(pattern = %pattern.as_str(), text, "applying text search");

    // `$` also matches just before one final newline.
    let captures = pattern
        .captures(text)
        .or_else(|| text.strip_suffix('\n').and_then(|trimmed| pattern.captures(trimmed)))
        .ok_or_else(|| ExtractError::PatternMismatch { pattern: pattern.as_str().to_string() })?;
    let list = captures
        .get(1)
        .ok_or_else(|| ExtractError::MissingCapture { pattern: pattern.as_str().to_string() })?;

    Ok(list
        .as_str()
        .split(TITLE_SEPARATOR)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect())
}
