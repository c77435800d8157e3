//! Table-of-contents retrieval.
//!
//! The index page carries the book title and author in Open Graph `<meta>`
//! tags and lists every chapter as an anchor inside the chapter list
//! container. [`fetch_index`] turns that page into a [`BookMeta`] whose
//! chapter order is the order of the anchors on the page.

use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::PageSelectors;
use crate::fetch::PageSource;
use crate::parse::Document;
use crate::sanitize::Sanitizer;
use crate::{ChapbookError, Result};

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRef {
    /// Sanitized chapter title.
    pub name: String,
    /// Absolute chapter URL.
    pub url: Url,
}

/// A book as described by its index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookMeta {
    pub name: String,
    pub author: String,
    /// Chapters in reading order; position `i` has chapter id `i + 1`.
    pub chapters: Vec<ChapterRef>,
}

/// Fetches and parses the index page at `index_url`.
///
/// # Errors
///
/// - [`ChapbookError::IndexFetch`] if the page cannot be retrieved.
/// - [`ChapbookError::IndexParse`] if the title, author or chapter list is missing.
pub async fn fetch_index<S: PageSource>(
    source: &S,
    index_url: &Url,
    selectors: &PageSelectors,
    sanitizer: &Sanitizer,
) -> Result<BookMeta> {
    let html = source
        .get(index_url)
        .await
        .map_err(|e| ChapbookError::IndexFetch { url: index_url.to_string(), source: Box::new(e) })?;

    parse_index(&html, index_url, selectors, sanitizer)
}

/// Parses an already retrieved index page.
///
/// Chapter links are resolved against `index_url`.
pub fn parse_index(html: &str, index_url: &Url, selectors: &PageSelectors, sanitizer: &Sanitizer) -> Result<BookMeta> {
    let doc = Document::parse(html);

    let name = doc
        .meta_property(&selectors.title_property)
        .ok_or_else(|| missing_meta(&selectors.title_property))?;
    let author = doc
        .meta_property(&selectors.author_property)
        .ok_or_else(|| missing_meta(&selectors.author_property))?;

    let anchors = doc.select(&selectors.chapter_links)?;
    if anchors.is_empty() {
        return Err(ChapbookError::IndexParse(format!(
            "no chapter links match {:?}",
            selectors.chapter_links
        )));
    }

    let mut chapters = Vec::with_capacity(anchors.len());
    for anchor in &anchors {
        let Some(href) = anchor.attr("href") else {
            warn!(text = %anchor.text(), "chapter link without href, skipping");
            continue;
        };

        let url = match index_url.join(href.trim()) {
            Ok(url) => url,
            Err(e) => {
                warn!(href, error = %e, "unresolvable chapter link, skipping");
                continue;
            }
        };

        chapters.push(ChapterRef { name: sanitizer.sanitize_inline(&anchor.text()), url });
    }

    debug!(book = %name, chapters = chapters.len(), "parsed index page");

    Ok(BookMeta { name, author, chapters })
}

fn missing_meta(property: &str) -> ChapbookError {
    ChapbookError::IndexParse(format!("missing <meta property=\"{}\">", property))
}
