//! Balance snapshot events as delivered by the event source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed balance at a point in time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// When the balance was observed
    pub timestamp: DateTime<Utc>,
    /// Running balance after this event. May be negative or fractional.
    pub balance: f64,
}

impl Event {
    pub fn new(timestamp: DateTime<Utc>, balance: f64) -> Self {
        Self { timestamp, balance }
    }
}

/// Sorted copy of `events`, ascending by timestamp.
///
/// The sort is stable, so entries sharing a timestamp keep their input order
/// and the last one seen wins wherever "latest" is asked for.
pub(crate) fn chronological(events: &[Event]) -> Vec<Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.timestamp);
    sorted
}
