//! Document loading from URLs and local files.
//!
//! A source identifier starting with `http://` or `https://` (any case) is
//! fetched over the network; anything else is read from the filesystem.
//!
//! [`Loader::new`] creates a fresh HTTP client for every network load and
//! drops it before returning, on success, on error and when the future is
//! cancelled. [`Loader::with_client`] borrows a caller-owned client that is
//! shared with other requests; the loader never closes or reconfigures it and
//! applies timeout and headers to its own request only.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use url::Url;

use crate::{Result, VerkehrError};

static RE_HTTP_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("invalid regex: http scheme"));

/// HTTP client configuration for fetching the traffic page.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Total request timeout in seconds.
    pub timeout: u64,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 20, user_agent: "verkehr/1.0 (traffic-scraper)".to_string() }
    }
}

/// Where a source identifier points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An `http://` or `https://` URL
    Url(String),
    /// A local filesystem path
    File(PathBuf),
}

impl Source {
    /// Classify a source identifier by its scheme prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verkehr_core::fetch::Source;
    ///
    /// assert!(matches!(Source::classify("HTTPS://example.com"), Source::Url(_)));
    /// assert!(matches!(Source::classify("fixtures/verkehr.html"), Source::File(_)));
    /// assert!(matches!(Source::classify("ftp://example.com/x.html"), Source::File(_)));
    /// ```
    pub fn classify(source: &str) -> Self {
        if RE_HTTP_SCHEME.is_match(source) {
            Source::Url(source.to_string())
        } else {
            Source::File(PathBuf::from(source))
        }
    }
}

/// Who owns the HTTP client a [`Loader`] uses.
#[derive(Debug, Clone)]
enum Session {
    /// A client is built per network load and dropped with it
    Owned,
    /// A caller-owned client, shared and left untouched
    Shared(Client),
}

/// Resolves source identifiers to raw HTML.
#[derive(Debug, Clone)]
pub struct Loader {
    config: FetchConfig,
    session: Session,
}

impl Loader {
    /// Loader that creates (and releases) its own client for every network load.
    pub fn new(config: FetchConfig) -> Self {
        Self { config, session: Session::Owned }
    }

    /// Loader that issues requests through a caller-owned client.
    ///
    /// The client stays usable for other concurrent requests after every load.
    pub fn with_client(client: Client, config: FetchConfig) -> Self {
        Self { config, session: Session::Shared(client) }
    }

    /// Gets the fetch configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Returns `true` when the loader uses a caller-owned client.
    pub fn is_shared(&self) -> bool {
        matches!(self.session, Session::Shared(_))
    }

    /// Load raw HTML from a URL or a local path.
    ///
    /// # Errors
    ///
    /// Network: [`VerkehrError::InvalidUrl`], [`VerkehrError::Timeout`],
    /// [`VerkehrError::HttpStatus`] or [`VerkehrError::HttpError`].
    /// Filesystem: [`VerkehrError::FileNotFound`] or [`VerkehrError::ReadError`].
    pub async fn load(&self, source: &str) -> Result<String> {
        match Source::classify(source) {
            Source::Url(url) => {
                tracing::debug!(url = %url, shared = self.is_shared(), "fetching traffic page");
                let html = match &self.session {
                    Session::Owned => {
                        let client = build_client(&self.config)?;
                        fetch_with_client(&client, &url, &self.config).await?
                    }
                    Session::Shared(client) => fetch_with_client(client, &url, &self.config).await?,
                };
                tracing::debug!(bytes = html.len(), "fetched traffic page");
                Ok(html)
            }
            Source::File(path) => {
                tracing::debug!(path = %path.display(), "reading traffic page from file");
                read_file_async(path).await
            }
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}

fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(VerkehrError::HttpError)
}

/// Perform the GET and decode the body.
///
/// The timeout is set on the request itself so a shared client keeps its own
/// defaults.
async fn fetch_with_client(client: &Client, url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| VerkehrError::InvalidUrl(e.to_string()))?;
    let map_err = |e: reqwest::Error| {
        if e.is_timeout() { VerkehrError::Timeout { timeout: config.timeout } } else { VerkehrError::HttpError(e) }
    };

    let response = client
        .get(parsed_url)
        .timeout(Duration::from_secs(config.timeout))
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "de-DE,de;q=0.9")
        .send()
        .await
        .map_err(map_err)?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(VerkehrError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    response.text().await.map_err(map_err)
}

fn map_read_error(err: std::io::Error, path: PathBuf) -> VerkehrError {
    if err.kind() == ErrorKind::NotFound { VerkehrError::FileNotFound(path) } else { VerkehrError::ReadError(err) }
}

async fn read_file_async(path: PathBuf) -> Result<String> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| map_read_error(e, path))
}

/// Reads HTML content from a local file.
///
/// The file must be valid UTF-8.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);
    fs::read_to_string(&path_buf).map_err(|e| map_read_error(e, path_buf))
}
