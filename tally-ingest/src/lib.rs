//! tally-ingest: turn upstream balance history (JSON payloads, CSV exports) into events.

pub mod types;
pub mod parsers;

pub use types::{PointsPayload, RawRecord};
pub use parsers::points_json::{parse_event_records, parse_points_payload};
pub use parsers::snapshot_csv::{parse_snapshot_csv, parse_snapshot_csv_path};
