//! Run configuration.
//!
//! Everything the original downloader hard-coded (directory names, fonts,
//! timeouts, retry counts, page selectors) lives in [`BookConfig`], which is
//! passed to the [`Assembler`](crate::Assembler) at startup.
//!
//! # Example
//!
//! ```rust
//! use chapbook_core::{BookConfig, EscapeTable};
//!
//! let config = BookConfig::builder()
//!     .output_dir("out")
//!     .max_retries(5)
//!     .timeout(10)
//!     .escape_table(EscapeTable::standard())
//!     .build();
//! assert_eq!(config.max_retries, 5);
//! ```

use std::path::PathBuf;

use crate::fetch::FetchConfig;
use crate::sanitize::{EscapeTable, SanitizeConfig};
use crate::template::{FontConfig, Preamble};

/// Where the book metadata and chapter list live on the index and chapter pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelectors {
    /// `<meta property>` holding the book title.
    pub title_property: String,
    /// `<meta property>` holding the author.
    pub author_property: String,
    /// CSS selector for the chapter anchors, in reading order.
    pub chapter_links: String,
    /// CSS selector for the chapter body container.
    pub content: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            title_property: "og:title".to_string(),
            author_property: "og:novel:author".to_string(),
            chapter_links: "div#list > dl > dd > a".to_string(),
            content: "div#content".to_string(),
        }
    }
}

/// Configuration for one book download.
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Directory receiving the master document, chapters and template output (default: `.`).
    pub output_dir: PathBuf,
    /// Chapter directory, relative to `output_dir` (default: `chapters`).
    pub chapters_dir: PathBuf,
    /// Template directory, relative to `output_dir` (default: `template`).
    pub template_dir: PathBuf,
    /// Preamble of the master document.
    pub preamble: Preamble,
    /// Fonts substituted into the font settings template.
    pub fonts: FontConfig,
    /// Attempts per chapter while its content comes back empty (default: 3).
    pub max_retries: u32,
    /// HTTP settings.
    pub fetch: FetchConfig,
    /// Sanitization rules.
    pub sanitize: SanitizeConfig,
    /// Page structure of the target site.
    pub selectors: PageSelectors,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            chapters_dir: PathBuf::from("chapters"),
            template_dir: PathBuf::from("template"),
            preamble: Preamble::default(),
            fonts: FontConfig::default(),
            max_retries: 3,
            fetch: FetchConfig::default(),
            sanitize: SanitizeConfig::default(),
            selectors: PageSelectors::default(),
        }
    }
}

impl BookConfig {
    /// Creates a new builder for BookConfig.
    pub fn builder() -> BookConfigBuilder {
        BookConfigBuilder::new()
    }
}

/// Builder for BookConfig.
pub struct BookConfigBuilder {
    config: BookConfig,
}

impl BookConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: BookConfig::default() }
    }

    /// Sets the output directory.
    pub fn output_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.output_dir = value.into();
        self
    }

    /// Sets the chapter directory (relative to the output directory).
    pub fn chapters_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.chapters_dir = value.into();
        self
    }

    /// Sets the template directory (relative to the output directory).
    pub fn template_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.template_dir = value.into();
        self
    }

    /// Sets the preamble.
    pub fn preamble(mut self, value: Preamble) -> Self {
        self.config.preamble = value;
        self
    }

    /// Sets the fonts.
    pub fn fonts(mut self, value: FontConfig) -> Self {
        self.config.fonts = value;
        self
    }

    /// Sets the per-chapter attempt budget.
    pub fn max_retries(mut self, value: u32) -> Self {
        self.config.max_retries = value;
        self
    }

    /// Sets the per-request timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the HTTP settings.
    pub fn fetch(mut self, value: FetchConfig) -> Self {
        self.config.fetch = value;
        self
    }

    /// Sets the reserved-character table.
    pub fn escape_table(mut self, value: EscapeTable) -> Self {
        self.config.sanitize.table = value;
        self
    }

    /// Sets the sanitization rules.
    pub fn sanitize(mut self, value: SanitizeConfig) -> Self {
        self.config.sanitize = value;
        self
    }

    /// Sets the page selectors.
    pub fn selectors(mut self, value: PageSelectors) -> Self {
        self.config.selectors = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> BookConfig {
        self.config
    }
}

impl Default for BookConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BookConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.fetch.timeout, 30);
        assert_eq!(config.chapters_dir, PathBuf::from("chapters"));
        assert_eq!(config.template_dir, PathBuf::from("template"));
        assert_eq!(config.selectors.chapter_links, "div#list > dl > dd > a");
    }

    #[test]
    fn test_builder_overrides() {
        let config = BookConfig::builder()
            .output_dir("/tmp/book")
            .chapters_dir("parts")
            .max_retries(1)
            .timeout(5)
            .escape_table(EscapeTable::standard())
            .build();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/book"));
        assert_eq!(config.chapters_dir, PathBuf::from("parts"));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.fetch.timeout, 5);
        assert_eq!(config.sanitize.table, EscapeTable::standard());
    }
}
