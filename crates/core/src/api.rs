//! Fetch-and-parse entry point.
//!
//! [`TrafficApi`] ties the [`Loader`] to [`extract_incidents`](crate::extract_incidents): one call loads
//! the page and returns the incidents in page order. Loader errors propagate
//! unchanged; an empty or unrecognised page is an empty result, not an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use verkehr_core::TrafficApi;
//!
//! # #[tokio::main]
//! # async fn main() -> verkehr_core::Result<()> {
//! let api = TrafficApi::new();
//! for incident in api.run(None).await? {
//!     println!("{:?}: {:?}", incident.kind, incident.title);
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::Client;

use crate::Result;
use crate::extract::{ExtractConfig, extract_incidents_with_config};
use crate::fetch::{FetchConfig, Loader};
use crate::incident::Incident;

/// Traffic page of the Bremen Vier radio station.
pub const TRAFFIC_URL: &str = "https://www.bremenvier.de/verkehr";

/// Loads the traffic page and extracts its incidents.
#[derive(Debug, Clone)]
pub struct TrafficApi {
    loader: Loader,
    extract: ExtractConfig,
    default_source: String,
}

impl TrafficApi {
    /// Creates an API instance that owns its HTTP client per request.
    pub fn new() -> Self {
        Self::with_loader(Loader::default())
    }

    /// Creates an API instance with custom fetch settings.
    pub fn with_config(config: FetchConfig) -> Self {
        Self::with_loader(Loader::new(config))
    }

    /// Creates an API instance that sends requests through a shared client.
    pub fn with_client(client: Client, config: FetchConfig) -> Self {
        Self::with_loader(Loader::with_client(client, config))
    }

    /// Creates an API instance around an existing loader.
    pub fn with_loader(loader: Loader) -> Self {
        Self { loader, extract: ExtractConfig::default(), default_source: TRAFFIC_URL.to_string() }
    }

    /// Replaces the source used when [`run`](Self::run) gets `None`.
    pub fn default_source(mut self, source: impl Into<String>) -> Self {
        self.default_source = source.into();
        self
    }

    /// Replaces the structural signatures used for extraction.
    pub fn extract_config(mut self, config: ExtractConfig) -> Self {
        self.extract = config;
        self
    }

    /// Gets the loader.
    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    /// Loads `source` (or the default traffic URL) and extracts all incidents.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when the document cannot be fetched or read.
    pub async fn run(&self, source: Option<&str>) -> Result<Vec<Incident>> {
        let source = source.unwrap_or(self.default_source.as_str());
        let html = self.loader.load(source).await?;
        let incidents = extract_incidents_with_config(&html, &self.extract);
        tracing::debug!(source, incidents = incidents.len(), "extracted traffic incidents");
        Ok(incidents)
    }
}

impl Default for TrafficApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function: load with default settings and extract.
pub async fn fetch_and_extract(source: Option<&str>) -> Result<Vec<Incident>> {
    TrafficApi::new().run(source).await
}
