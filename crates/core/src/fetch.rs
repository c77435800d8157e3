//! Page retrieval.
//!
//! [`PageSource`] is the seam between the fetchers and the network. The
//! production implementation, [`HttpSource`], keeps one reqwest client (and
//! its connection pool) for the whole run, retries connection-level failures
//! a bounded number of times, and reads `file://` URLs straight from disk.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use tracing::{debug, warn};
use url::Url;

use crate::{ChapbookError, Result};

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout: u64,
    /// Extra attempts after a connection failure or timeout.
    pub transport_retries: u32,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            transport_retries: 3,
            user_agent: "Mozilla/5.0 (compatible; chapbook/1.0)".to_string(),
        }
    }
}

/// Something that can return the body of a page.
///
/// Implementations decide how transport failures are retried; an `Err` is
/// final for the caller.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches `url` and returns its body decoded as text.
    async fn get(&self, url: &Url) -> Result<String>;
}

/// Parses a user-supplied URL, accepting `http`, `https` and `file`.
pub fn parse_url(input: &str) -> Result<Url> {
    let url = Url::parse(input).map_err(|e| ChapbookError::InvalidUrl(format!("{}: {}", input, e)))?;

    match url.scheme() {
        "http" | "https" | "file" => Ok(url),
        other => Err(ChapbookError::InvalidUrl(format!(
            "unsupported scheme {:?} (expected http, https or file)",
            other
        ))),
    }
}

/// Reads a `file://` URL from disk.
///
/// Bytes are decoded as UTF-8, replacing invalid sequences.
pub fn fetch_file(url: &Url) -> Result<String> {
    let path: PathBuf = url
        .to_file_path()
        .map_err(|_| ChapbookError::InvalidUrl(format!("not a local file path: {}", url)))?;

    if !path.exists() {
        return Err(ChapbookError::FileNotFound(path));
    }

    let bytes = fs::read(&path).map_err(|source| ChapbookError::ReadError { path: path.clone(), source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// reqwest-backed [`PageSource`] sharing one connection pool across requests.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl HttpSource {
    /// Builds the shared client.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ChapbookError::HttpError)?;

        Ok(Self { client, config: config.clone() })
    }

    async fn send(&self, url: &Url) -> reqwest::Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "non-success status, returning body as-is");
        }

        // The target site mislabels its charset; the bytes are always UTF-8.
        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(feature = "fetch")]
impl PageSource for HttpSource {
    async fn get(&self, url: &Url) -> Result<String> {
        if url.scheme() == "file" {
            return fetch_file(url);
        }

        let mut remaining = self.config.transport_retries;
        loop {
            match self.send(url).await {
                Ok(body) => return Ok(body),
                Err(e) if remaining > 0 && (e.is_connect() || e.is_timeout()) => {
                    remaining -= 1;
                    warn!(%url, error = %e, remaining, "transport failure, retrying");
                }
                Err(e) if e.is_timeout() => return Err(ChapbookError::Timeout { timeout: self.config.timeout }),
                Err(e) => return Err(ChapbookError::HttpError(e)),
            }
        }
    }
}
