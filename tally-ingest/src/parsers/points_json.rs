//! Points-history JSON parser
//!
//! Expected upstream payload:
//!   {
//!     "user_info": { ... },
//!     "points_history": [
//!       { "id": 1, "created_at": "2026-02-18T10:00:00Z", "running_balance": 120 },
//!       ...
//!     ]
//!   }
//!
//! Records may arrive in any order. One bad record fails the whole parse.

use anyhow::{Context, Result};
use tally_core::{DayClock, Event};
use tracing::{debug, warn};

use crate::types::{PointsPayload, RawRecord};

/// Parse a full upstream payload. A payload without `points_history` is an
/// account with no history yet and yields no events. Naive timestamps are
/// local to `clock`.
pub fn parse_points_payload(json: &str, clock: &DayClock) -> Result<Vec<Event>> {
    let payload: PointsPayload =
        serde_json::from_str(json).context("parse points payload")?;

    let Some(records) = payload.points_history else {
        warn!("points payload has no points_history; treating as empty");
        return Ok(Vec::new());
    };

    to_events(&records, clock)
}

/// Parse a bare JSON array of history records.
pub fn parse_event_records(json: &str, clock: &DayClock) -> Result<Vec<Event>> {
    let records: Vec<RawRecord> =
        serde_json::from_str(json).context("parse event records")?;
    to_events(&records, clock)
}

fn to_events(records: &[RawRecord], clock: &DayClock) -> Result<Vec<Event>> {
    let events = records
        .iter()
        .enumerate()
        .map(|(i, r)| r.to_event(i, clock))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(records = events.len(), "parsed points history");
    Ok(events)
}
