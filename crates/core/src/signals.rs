//! Fixed-count on/off signals over the incident list.
//!
//! Every slot is bound to a 1-based position. A slot whose position is
//! within the incident list is on and carries that incident as attributes;
//! slots past the end are off with no attributes. The set is always padded
//! or trimmed to exactly the configured number of slots.

use serde::Serialize;

use crate::incident::Incident;
#[cfg(feature = "fetch")]
use crate::poller::Snapshot;

/// Default number of exposed slots.
pub const DEFAULT_SLOTS: usize = 14;

/// Name prefix of every slot.
const SIGNAL_NAME: &str = "Bremen Vier - Verkehrsmeldung";

/// State of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalState {
    On,
    Off,
    Unavailable,
}

/// One presentation slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    /// 1-based position in the incident list
    pub position: usize,
    pub name: String,
    pub unique_id: String,
    pub state: SignalState,
    /// The incident at `position`, only while on
    pub attributes: Option<Incident>,
}

impl Signal {
    fn new(position: usize, state: SignalState, attributes: Option<Incident>) -> Self {
        Self {
            position,
            name: format!("{SIGNAL_NAME} {position}"),
            unique_id: format!("traffic-{position}"),
            state,
            attributes,
        }
    }

    pub fn is_on(&self) -> bool {
        self.state == SignalState::On
    }
}

/// Map an incident list onto exactly `slots` signals.
///
/// # Example
///
/// ```rust
/// use verkehr_core::{Incident, SignalState, signals_for};
///
/// let incidents = vec![Incident { title: Some("A1 gesperrt".into()), ..Default::default() }];
/// let signals = signals_for(&incidents, 3);
///
/// assert_eq!(signals.len(), 3);
/// assert_eq!(signals[0].state, SignalState::On);
/// assert_eq!(signals[1].state, SignalState::Off);
/// assert!(signals[2].attributes.is_none());
/// ```
pub fn signals_for(incidents: &[Incident], slots: usize) -> Vec<Signal> {
    (1..=slots)
        .map(|position| match incidents.get(position - 1) {
            Some(incident) => Signal::new(position, SignalState::On, Some(incident.clone())),
            None => Signal::new(position, SignalState::Off, None),
        })
        .collect()
}

/// Map a poller snapshot onto exactly `slots` signals.
///
/// While the snapshot is unavailable every slot reports
/// [`SignalState::Unavailable`], whatever is cached.
#[cfg(feature = "fetch")]
pub fn signal_slots(snapshot: &Snapshot, slots: usize) -> Vec<Signal> {
    if !snapshot.available {
        return (1..=slots)
            .map(|position| Signal::new(position, SignalState::Unavailable, None))
            .collect();
    }

    signals_for(&snapshot.incidents, slots)
}
