//! HTML parsing and CSS selection.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! title extractor.
//!
//! # Example
//!
//! ```rust
//! use marquee_core::parse::Document;
//!
//! let html = r#"<ul class="movies"><li>First</li><li>Second</li></ul>"#;
//! let doc = Document::parse(html).unwrap();
//! let items = doc.select("ul.movies > li").unwrap();
//! assert_eq!(items.len(), 2);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{MarqueeError, Result};

/// Compiles a CSS selector, mapping failures to [`MarqueeError::InvalidSelector`].
pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| MarqueeError::InvalidSelector { selector: selector.to_string(), reason: e.to_string() })
}

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup still produces a document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use marquee_core::parse::Document;
    ///
    /// let doc = Document::parse("<ul><li>Alien</li><li>Brazil</li></ul>").unwrap();
    /// assert_eq!(doc.select("li").unwrap().len(), 2);
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector string.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::InvalidSelector`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.select_compiled(&sel))
    }

    /// Selects elements using an already compiled selector, in document order.
    pub fn select_compiled(&'_ self, selector: &Selector) -> Vec<Element<'_>> {
        self.html.select(selector).map(|el| Element { element: el }).collect()
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the single string this element holds.
    ///
    /// When the element has exactly one child, that child's text is returned,
    /// descending through single-child elements. Elements with no children,
    /// or with several, have no single string and yield `None`.
    ///
    /// ```rust
    /// use marquee_core::parse::Document;
    ///
    /// let doc = Document::parse("<p><a><b>Title</b></a></p><p>One <i>two</i></p>").unwrap();
    /// let paragraphs = doc.select("p").unwrap();
    /// assert_eq!(paragraphs[0].own_text(), Some("Title".to_string()));
    /// assert_eq!(paragraphs[1].own_text(), None);
    /// ```
    pub fn own_text(&self) -> Option<String> {
        single_string(self.element)
    }
}

fn single_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    if let Some(text) = only.value().as_text() {
        return Some(String::from(&**text));
    }

    ElementRef::wrap(only).and_then(single_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>Test Theater</title>
        </head>
        <body>
            <ul class="movie_titles">
                <li><a href="/movie_detail?id=1">First</a></li>
                <li><a href="/movie_detail?id=2"><b>Second</b></a></li>
                <li><a href="/movie_detail?id=3"></a></li>
                <li><a href="/movie_detail?id=4">Fourth <em>Part</em></a></li>
            </ul>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let items = doc.select("ul.movie_titles > li").unwrap();
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_select_elements_in_document_order() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let links = doc.select("ul.movie_titles > li > a").unwrap();

        assert_eq!(links.len(), 4);
        assert_eq!(links[0].text(), "First");
        assert_eq!(links[3].text(), "Fourth Part");
    }

    #[test]
    fn test_own_text() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let links = doc.select("ul.movie_titles > li > a").unwrap();

        assert_eq!(links[0].own_text(), Some("First".to_string()));
        assert_eq!(links[1].own_text(), Some("Second".to_string()));
        assert_eq!(links[2].own_text(), None);
        assert_eq!(links[3].own_text(), None);
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(MarqueeError::InvalidSelector { .. })));
    }
}
