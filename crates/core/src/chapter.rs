//! Chapter retrieval with bounded retry.
//!
//! The target site answers throttled requests with a page that lacks the
//! content block. [`fetch_chapter`] treats an empty content block as a
//! transient condition and re-requests the page a bounded number of times.
//! When every attempt comes back empty the chapter degrades to a title-only
//! [`ChapterOutput`] instead of failing the book.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use url::Url;

use crate::fetch::PageSource;
use crate::parse::Document;
use crate::sanitize::Sanitizer;
use crate::Result;

/// LaTeX for one chapter: a `\chapter` directive followed by body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterOutput {
    /// 1-based position in the table of contents.
    pub id: usize,
    /// Sanitized chapter title.
    pub title: String,
    /// Sanitized body lines, without line-break markers.
    pub lines: Vec<String>,
    /// Requests made for this chapter.
    pub attempts: u32,
    /// True when every attempt returned empty content.
    pub degraded: bool,
}

impl ChapterOutput {
    /// Title-only output for a chapter whose content never arrived.
    pub fn degraded(id: usize, title: &str, attempts: u32) -> Self {
        Self { id, title: title.to_string(), lines: Vec::new(), attempts, degraded: true }
    }

    /// File name of this chapter inside the chapter directory.
    pub fn file_name(&self) -> String {
        chapter_file_name(self.id)
    }

    /// Renders the chapter; every body line ends with a hard line break (`\\`).
    pub fn render(&self) -> String {
        let mut out = format!("\\chapter{{{}}}\n", self.title);
        for line in &self.lines {
            out.push_str(line);
            out.push_str("\\\\\n");
        }
        out
    }

    /// Writes the rendered chapter into `dir`, replacing any previous file.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        fs::write(&path, self.render())?;
        Ok(path)
    }
}

/// File name for chapter `id`.
pub fn chapter_file_name(id: usize) -> String {
    format!("{}.tex", id)
}

/// Fetches chapter `id` from `url`, making at most `max_retries` requests.
///
/// An empty content block uses up one attempt. Once all attempts are spent
/// the result is [`ChapterOutput::degraded`]; `max_retries == 0` degrades
/// without making a request.
///
/// # Errors
///
/// Transport errors from `source` and invalid selectors are returned as-is;
/// they are fatal for the run.
pub async fn fetch_chapter<S: PageSource>(
    source: &S,
    id: usize,
    name: &str,
    url: &Url,
    max_retries: u32,
    content_selector: &str,
    sanitizer: &Sanitizer,
) -> Result<ChapterOutput> {
    let mut remaining = max_retries;
    let mut attempts = 0;

    while remaining > 0 {
        info!(chapter = id, "Fetching chapter {}: {}", id, name);
        attempts += 1;

        let html = source.get(url).await?;
        let fragments = Document::parse(&html).text_nodes(content_selector)?;

        if !fragments.is_empty() {
            let lines = body_lines(&fragments, sanitizer);
            return Ok(ChapterOutput { id, title: name.to_string(), lines, attempts, degraded: false });
        }

        remaining -= 1;
        warn!(chapter = id, remaining, "Empty content for chapter {}: {}", id, name);
    }

    warn!(chapter = id, attempts, %url, "Giving up on chapter {}: {}, writing title only", id, name);
    Ok(ChapterOutput::degraded(id, name, attempts))
}

/// Sanitizes extracted fragments into body lines.
///
/// Script remnants are only ever found at the start of the content block, so
/// only the first fragment is scrubbed.
fn body_lines(fragments: &[String], sanitizer: &Sanitizer) -> Vec<String> {
    let mut lines = Vec::with_capacity(fragments.len());
    for (i, fragment) in fragments.iter().enumerate() {
        if i == 0 {
            lines.extend(sanitizer.sanitize_lines(&sanitizer.strip_script_remnants(fragment)));
        } else {
            lines.extend(sanitizer.sanitize_lines(fragment));
        }
    }
    lines
}
