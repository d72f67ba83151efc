//! Retrieving theater pages from URLs and local files.
//!
//! A [`SourceProvider`] turns a locator into raw markup. Transport failures
//! are returned to the caller unchanged; nothing here retries or swallows them.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{MarqueeError, Result};

/// Supplies the raw HTML for a theater's locator.
pub trait SourceProvider {
    fn fetch(&self, locator: &str) -> Result<String>;
}

impl<T: SourceProvider + ?Sized> SourceProvider for &T {
    fn fetch(&self, locator: &str) -> Result<String> {
        (**self).fetch(locator)
    }
}

/// Whether a locator names an HTTP(S) resource rather than a local file.
pub fn is_remote(locator: &str) -> bool {
    Url::parse(locator)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// HTTP client configuration for fetching theater pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Marquee/0.1)".to_string() }
    }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects, respects the configured timeout and treats a
/// non-success status as an error.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| MarqueeError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(MarqueeError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                MarqueeError::Timeout { timeout: config.timeout }
            } else {
                MarqueeError::HttpError(e)
            }
        })?
        .error_for_status()?;

    let content = response.text().await?;

    Ok(content)
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(MarqueeError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(MarqueeError::from)
    }
}

/// Reads local files only; URLs are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl SourceProvider for FileSource {
    fn fetch(&self, locator: &str) -> Result<String> {
        if is_remote(locator) {
            return Err(MarqueeError::InvalidUrl(format!("{} (network fetching is disabled)", locator)));
        }
        debug!(path = locator, "reading local source");
        fetch_file(locator)
    }
}

/// Fetches URLs over HTTP and everything else from disk.
///
/// Requests are blocking: each call drives [`fetch_url`] to completion on a
/// private current-thread runtime before returning.
#[cfg(feature = "fetch")]
#[derive(Debug)]
pub struct WebSource {
    config: FetchConfig,
    runtime: tokio::runtime::Runtime,
}

#[cfg(feature = "fetch")]
impl WebSource {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        Ok(Self { config, runtime })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[cfg(feature = "fetch")]
impl SourceProvider for WebSource {
    fn fetch(&self, locator: &str) -> Result<String> {
        if is_remote(locator) {
            debug!(url = locator, "fetching remote source");
            self.runtime.block_on(fetch_url(locator, &self.config))
        } else {
            debug!(path = locator, "reading local source");
            fetch_file(locator)
        }
    }
}
