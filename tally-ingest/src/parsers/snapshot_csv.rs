//! Balance snapshot CSV parser
//!
//! Expected header (column order free, extra columns ignored):
//!   timestamp,balance            or
//!   id,created_at,running_balance
//!
//! When both spellings are present the upstream `created_at` /
//! `running_balance` columns win.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tally_core::{DayClock, Event, SeriesError};
use tracing::debug;

use crate::types::record_label;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    running_balance: Option<String>,
    #[serde(default)]
    balance: Option<String>,
}

impl CsvRow {
    fn timestamp(&self) -> Option<&str> {
        non_empty(&self.created_at).or(non_empty(&self.timestamp))
    }

    fn balance(&self) -> Option<&str> {
        non_empty(&self.running_balance).or(non_empty(&self.balance))
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// Parse snapshot rows from any reader. Records are numbered from 0 after the
/// header; the file line is included in error labels. Naive timestamps are
/// local to `clock`.
pub fn parse_snapshot_csv<R: Read>(reader: R, clock: &DayClock) -> Result<Vec<Event>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("read CSV header")?.clone();
    let mut out = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                if let csv::ErrorKind::UnequalLengths { pos, expected_len, len } = err.kind() {
                    let line = pos.as_ref().map(|p| p.line()).unwrap_or_default();
                    return Err(SeriesError::malformed(
                        format!("#{i} (line {line})"),
                        format!("expected {expected_len} fields, found {len}"),
                    )
                    .into());
                }
                return Err(err).with_context(|| format!("read CSV record #{i}"));
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: CsvRow = record
            .deserialize(Some(&headers))
            .with_context(|| format!("decode CSV record #{i}"))?;

        let label = format!("{} (line {line})", record_label(i, row.id.as_deref()));
        out.push(row_to_event(&row, &label, clock)?);
    }

    debug!(records = out.len(), "parsed snapshot CSV");
    Ok(out)
}

/// Parse a snapshot CSV file.
pub fn parse_snapshot_csv_path(path: impl AsRef<Path>, clock: &DayClock) -> Result<Vec<Event>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_snapshot_csv(file, clock).with_context(|| format!("parsing {}", path.as_ref().display()))
}

fn row_to_event(row: &CsvRow, label: &str, clock: &DayClock) -> Result<Event, SeriesError> {
    let ts_raw = row
        .timestamp()
        .ok_or_else(|| SeriesError::malformed(label, "missing timestamp"))?;
    let timestamp = clock
        .parse_instant(ts_raw)
        .map_err(|reason| SeriesError::malformed(label, reason))?;

    let bal_raw = row
        .balance()
        .ok_or_else(|| SeriesError::malformed(label, "missing balance"))?;
    let balance: f64 = bal_raw
        .parse()
        .map_err(|_| SeriesError::malformed(label, format!("unparsable balance '{bal_raw}'")))?;
    if !balance.is_finite() {
        return Err(SeriesError::malformed(
            label,
            format!("balance '{bal_raw}' is not finite"),
        ));
    }

    Ok(Event::new(timestamp, balance))
}
