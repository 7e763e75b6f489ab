#[cfg(feature = "fetch")]
pub mod api;
pub mod date;
pub mod dom_tree;
pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod formatters;
pub mod incident;
pub mod parse;
#[cfg(feature = "fetch")]
pub mod poller;
pub mod signals;

#[cfg(feature = "fetch")]
pub use api::{TRAFFIC_URL, TrafficApi, fetch_and_extract};
pub use date::{german_month, normalize_german_datetime};
#[doc(hidden)]
pub use dom_tree::{DomNode, DomTree, Matcher, build_dom_tree};
pub use error::{Result, VerkehrError};
pub use extract::{ExtractConfig, extract_incidents, extract_incidents_with_config};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, Loader, Source, fetch_file};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter};
pub use formatters::{incidents_to_json, incidents_to_text, signals_to_json, signals_to_text};
pub use incident::Incident;
pub use parse::Document;
#[cfg(feature = "fetch")]
pub use poller::{MIN_INTERVAL, Poller, PollerConfig, PollerConfigBuilder, RefreshOutcome, Snapshot};
#[cfg(feature = "fetch")]
pub use signals::signal_slots;
pub use signals::{DEFAULT_SLOTS, Signal, SignalState, signals_for};
