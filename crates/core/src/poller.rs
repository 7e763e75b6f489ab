//! Periodic refresh of the traffic incidents.
//!
//! A [`Poller`] runs the fetch-and-parse pipeline on a fixed interval and
//! keeps the last successful result. A failed refresh never ends polling:
//! it marks the snapshot unavailable and leaves the cached incidents in
//! place until the next successful refresh replaces them as a whole.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use verkehr_core::{Poller, PollerConfig, TrafficApi};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = PollerConfig::builder().interval(Duration::from_secs(120)).build();
//! let mut poller = Poller::new(TrafficApi::new(), config);
//! poller
//!     .watch(|snapshot| println!("{} incidents", snapshot.incidents.len()))
//!     .await;
//! # }
//! ```

use std::time::Duration;

use serde::Serialize;
use tokio::time::{MissedTickBehavior, interval};

use crate::api::TrafficApi;
use crate::incident::Incident;

/// Shortest refresh interval; shorter ones, zero included, are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration for the Poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between refreshes (default: 60 seconds, at least [`MIN_INTERVAL`]).
    pub interval: Duration,

    /// Source to poll; the API's default traffic URL when `None`.
    pub source: Option<String>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(60), source: None }
    }
}

impl PollerConfig {
    /// Creates a new builder for PollerConfig.
    pub fn builder() -> PollerConfigBuilder {
        PollerConfigBuilder::new()
    }
}

/// Builder for PollerConfig.
pub struct PollerConfigBuilder {
    config: PollerConfig,
}

impl PollerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: PollerConfig::default() }
    }

    /// Sets the refresh interval, raised to [`MIN_INTERVAL`] if shorter.
    pub fn interval(mut self, value: Duration) -> Self {
        self.config.interval = value.max(MIN_INTERVAL);
        self
    }

    /// Sets the polled source.
    pub fn source(mut self, value: impl Into<String>) -> Self {
        self.config.source = Some(value.into());
        self
    }

    /// Builds the config.
    pub fn build(self) -> PollerConfig {
        self.config
    }
}

impl Default for PollerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The poller's current view of the traffic page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    /// Incidents of the last successful refresh, in page order.
    pub incidents: Vec<Incident>,

    /// `false` after a failed refresh, until the next success.
    pub available: bool,

    /// Message of the most recent failure, cleared on success.
    pub last_error: Option<String>,

    /// Number of successful refreshes so far.
    pub refreshes: u64,
}

impl Snapshot {
    /// Returns `true` once at least one refresh succeeded.
    pub fn has_data(&self) -> bool {
        self.refreshes > 0
    }
}

/// Result of a single refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cached incidents were replaced.
    Updated { incidents: usize },
    /// The pipeline failed; the previous incidents are kept.
    Unavailable { reason: String },
}

/// Runs the fetch-and-parse pipeline periodically and caches the result.
pub struct Poller {
    api: TrafficApi,
    config: PollerConfig,
    snapshot: Snapshot,
}

impl Poller {
    /// Creates a poller. Nothing is fetched until the first refresh.
    pub fn new(api: TrafficApi, config: PollerConfig) -> Self {
        Self { api, config, snapshot: Snapshot::default() }
    }

    /// Gets the current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Gets the poller configuration.
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Runs the pipeline once and updates the snapshot.
    ///
    /// Errors are logged and recorded, never returned.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        match self.api.run(self.config.source.as_deref()).await {
            Ok(incidents) => {
                if !self.snapshot.available && self.snapshot.last_error.is_some() {
                    tracing::info!("traffic data available again");
                }

                let count = incidents.len();
                self.snapshot.incidents = incidents;
                self.snapshot.available = true;
                self.snapshot.last_error = None;
                self.snapshot.refreshes += 1;
                tracing::debug!(incidents = count, "refreshed traffic incidents");
                RefreshOutcome::Updated { incidents: count }
            }
            Err(err) => {
                tracing::warn!(error = %err, fetch = err.is_fetch_error(), "traffic data unavailable");
                let reason = err.to_string();
                self.snapshot.available = false;
                self.snapshot.last_error = Some(reason.clone());
                RefreshOutcome::Unavailable { reason }
            }
        }
    }

    /// Refreshes immediately and then once per interval, handing every new
    /// snapshot to `on_update`.
    ///
    /// Runs until the returned future is dropped.
    pub async fn watch<F>(&mut self, mut on_update: F)
    where
        F: FnMut(&Snapshot),
    {
        let mut ticker = interval(self.config.interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.refresh().await;
            on_update(&self.snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<ul>
        <li class="traffic-section-entry"><div class="traffic-event-title">A1 gesperrt</div></li>
        <li class="traffic-section-entry"><div class="traffic-event-title">A27 Stau</div></li>
    </ul>"#;

    #[test]
    fn test_poller_config_builder() {
        let config = PollerConfig::builder()
            .interval(Duration::from_secs(5))
            .source("/tmp/verkehr.html")
            .build();

        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.source.as_deref(), Some("/tmp/verkehr.html"));
        assert_eq!(PollerConfig::default().interval, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_interval_is_raised() {
        let config = PollerConfig::builder().interval(Duration::ZERO).build();
        assert_eq!(config.interval, MIN_INTERVAL);
    }

    #[tokio::test]
    async fn test_watch_with_zero_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verkehr.html");
        std::fs::write(&path, PAGE).unwrap();

        let config = PollerConfig { interval: Duration::ZERO, source: Some(path.to_str().unwrap().to_string()) };
        let mut poller = Poller::new(TrafficApi::new(), config);

        let mut updates = 0;
        let result = tokio::time::timeout(Duration::from_millis(100), poller.watch(|_| updates += 1)).await;

        assert!(result.is_err());
        assert!(updates >= 1);
        assert!(poller.snapshot().available);
    }

    #[tokio::test]
    async fn test_refresh_success_replaces_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verkehr.html");
        std::fs::write(&path, PAGE).unwrap();

        let config = PollerConfig::builder().source(path.to_str().unwrap()).build();
        let mut poller = Poller::new(TrafficApi::new(), config);
        assert!(!poller.snapshot().has_data());

        assert_eq!(poller.refresh().await, RefreshOutcome::Updated { incidents: 2 });
        assert!(poller.snapshot().available);
        assert_eq!(poller.snapshot().incidents.len(), 2);

        std::fs::write(&path, "<ul></ul>").unwrap();
        assert_eq!(poller.refresh().await, RefreshOutcome::Updated { incidents: 0 });
        assert!(poller.snapshot().incidents.is_empty());
        assert_eq!(poller.snapshot().refreshes, 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_last_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verkehr.html");
        std::fs::write(&path, PAGE).unwrap();

        let config = PollerConfig::builder().source(path.to_str().unwrap()).build();
        let mut poller = Poller::new(TrafficApi::new(), config);
        poller.refresh().await;

        std::fs::remove_file(&path).unwrap();
        let outcome = poller.refresh().await;
        assert!(matches!(outcome, RefreshOutcome::Unavailable { .. }));

        let snapshot = poller.snapshot();
        assert!(!snapshot.available);
        assert!(snapshot.last_error.as_deref().unwrap().contains("File not found"));
        assert_eq!(snapshot.incidents.len(), 2);

        std::fs::write(&path, PAGE).unwrap();
        poller.refresh().await;
        assert!(poller.snapshot().available);
        assert!(poller.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_watch_ticks_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verkehr.html");
        std::fs::write(&path, PAGE).unwrap();

        let config = PollerConfig::builder()
            .interval(Duration::from_millis(20))
            .source(path.to_str().unwrap())
            .build();
        let mut poller = Poller::new(TrafficApi::new(), config);

        let mut seen = Vec::new();
        let result = tokio::time::timeout(
            Duration::from_millis(200),
            poller.watch(|snapshot| seen.push(snapshot.incidents.len())),
        )
        .await;

        assert!(result.is_err());
        assert!(seen.len() >= 2);
        assert!(seen.iter().all(|count| *count == 2));
    }
}
