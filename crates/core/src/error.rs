//! Error types for chapbook operations.
//!
//! This module defines the main error type [`ChapbookError`]. Only failures
//! that abort a run surface here: an unreachable or unparseable index page,
//! transport errors, invalid configuration and output I/O. A chapter whose
//! content keeps coming back empty is not an error; it degrades to a
//! title-only [`ChapterOutput`](crate::ChapterOutput).
//!
//! # Example
//!
//! ```rust
//! use chapbook_core::{ChapbookError, Result};
//!
//! fn require_title(title: Option<&str>) -> Result<String> {
//!     title
//!         .map(str::to_string)
//!         .ok_or_else(|| ChapbookError::IndexParse("missing og:title".to_string()))
//! }
//! # assert!(require_title(None).is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for chapbook operations.
#[derive(Error, Debug)]
pub enum ChapbookError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport problems that outlived the transport retries.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration
    /// on every transport attempt.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector in the configuration.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The index page could not be retrieved.
    #[error("Failed to fetch index page {url}: {source}")]
    IndexFetch {
        url: String,
        #[source]
        source: Box<ChapbookError>,
    },

    /// The index page was retrieved but the book title, author or chapter
    /// list could not be located in it.
    #[error("Failed to parse index page: {0}")]
    IndexParse(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A local page exists but could not be read.
    #[error("Failed to read file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Invalid configuration, such as a malformed sanitizer pattern.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for ChapbookError.
pub type Result<T> = std::result::Result<T, ChapbookError>;
