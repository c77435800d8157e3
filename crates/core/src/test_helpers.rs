//! Shared fixtures for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use url::Url;

use crate::fetch::PageSource;
use crate::{ChapbookError, Result};

/// In-memory [`PageSource`] serving scripted responses per URL.
///
/// Each URL answers with its queued bodies in order; the last body repeats
/// once the queue is down to one. Unknown URLs fail like a timed-out request.
#[derive(Default)]
pub(crate) struct FakeSource {
    pages: RefCell<HashMap<String, VecDeque<String>>>,
    requests: RefCell<Vec<String>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues one more response for `url`.
    pub(crate) fn page(self, url: &str, body: &str) -> Self {
        self.pages
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(body.to_string());
        self
    }

    /// URLs requested so far, in order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub(crate) fn request_count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| *u == url).count()
    }
}

impl PageSource for FakeSource {
    async fn get(&self, url: &Url) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());

        let mut pages = self.pages.borrow_mut();
        let queue = pages
            .get_mut(url.as_str())
            .ok_or(ChapbookError::Timeout { timeout: 30 })?;

        let body = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
        body.ok_or(ChapbookError::Timeout { timeout: 30 })
    }
}

/// Index page in the layout of the target site.
pub(crate) fn index_html(title: &str, author: &str, chapters: &[(&str, &str)]) -> String {
    let links: String = chapters
        .iter()
        .map(|(name, href)| format!("<dd><a href=\"{}\">{}</a></dd>\n", href, name))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta property="og:title" content="{}">
<meta property="og:novel:author" content="{}">
</head>
<body>
<div id="list"><dl>
<dt>正文</dt>
{}</dl></div>
</body>
</html>"#,
        title, author, links
    )
}

/// Chapter page whose content block holds `lines` separated by `<br>`.
pub(crate) fn chapter_html(lines: &[&str]) -> String {
    format!(
        "<html><body><div id=\"content\">{}</div></body></html>",
        lines.join("<br />\n")
    )
}

/// Chapter page whose content block is missing, as served while the site is throttling.
pub(crate) fn empty_chapter_html() -> String {
    "<html><body><div class=\"notice\">please wait</div></body></html>".to_string()
}
