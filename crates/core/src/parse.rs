//! HTML parsing and DOM queries.
//!
//! This module provides the [`Document`] and [`Element`] types used by the
//! index and chapter fetchers: CSS selection, `<meta property>` lookup and
//! direct text-node extraction.
//!
//! # Example
//!
//! ```rust
//! use chapbook_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <head><meta property="og:title" content="The Book"></head>
//!         <body><div id="content">First<br>Second</div></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.meta_property("og:title"), Some("The Book".to_string()));
//! assert_eq!(doc.text_nodes("div#content").unwrap(), vec!["First", "Second"]);
//! ```

use scraper::{Html, Selector};

use crate::{ChapbookError, Result};

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from any malformed markup, so parsing itself never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ChapbookError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chapbook_core::parse::Document;
    ///
    /// let html = r#"<dl><dd><a href="/1.html">One</a></dd><dd><a href="/2.html">Two</a></dd></dl>"#;
    /// let doc = Document::parse(html);
    /// let links = doc.select("dd > a").unwrap();
    /// assert_eq!(links.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the `content` of the first `<meta property="...">` with the given property.
    ///
    /// Returns `None` when the tag is missing or its content is blank.
    pub fn meta_property(&self, property: &str) -> Option<String> {
        let selector = Selector::parse(&format!("meta[property=\"{}\"]", property)).ok()?;
        self.html
            .select(&selector)
            .filter_map(|el| el.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(str::to_string)
    }

    /// Collects the text nodes that are direct children of every element
    /// matching `selector`, in document order.
    ///
    /// Text inside nested elements (`<p>`, `<script>`, ...) is not included.
    pub fn text_nodes(&self, selector: &str) -> Result<Vec<String>> {
        Ok(self.select(selector)?.iter().flat_map(Element::own_text).collect())
    }
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element, including descendants.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text nodes that are direct children of this element.
    pub fn own_text(&self) -> Vec<String> {
        self.element
            .children()
            .filter_map(|child| child.value().as_text())
            .map(|text| {
                let fragment: &str = text;
                fragment.to_string()
            })
            .collect()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ChapbookError::HtmlParseError(format!("Invalid selector: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="zh">
        <head>
            <meta charset="UTF-8">
            <meta property="og:title" content="Test Novel">
            <meta property="og:novel:author" content="  ">
            <title>Test Page</title>
        </head>
        <body>
            <div id="content">Line one<br>Line two<p>nested</p>Line three</div>
            <a href="/book/1.html">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_meta_property() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.meta_property("og:title"), Some("Test Novel".to_string()));
    }

    #[test]
    fn test_blank_meta_property_is_missing() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.meta_property("og:novel:author"), None);
        assert_eq!(doc.meta_property("og:description"), None);
    }

    #[test]
    fn test_text_nodes_skip_nested_elements() {
        let doc = Document::parse(SAMPLE_HTML);
        let nodes = doc.text_nodes("div#content").unwrap();
        assert_eq!(nodes, vec!["Line one", "Line two", "Line three"]);
    }

    #[test]
    fn test_text_nodes_missing_container() {
        let doc = Document::parse(SAMPLE_HTML);
        assert!(doc.text_nodes("div#missing").unwrap().is_empty());
    }

    #[test]
    fn test_element_attributes() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select("a").unwrap();

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].attr("href"), Some("/book/1.html"));
        assert_eq!(elements[0].text(), "Link");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(ChapbookError::HtmlParseError(_))));
    }
}
