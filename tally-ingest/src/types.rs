use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tally_core::{DayClock, Event, SeriesError};

/// Upstream points payload. Only the history is used; other top-level fields
/// (user info and the like) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsPayload {
    #[serde(default)]
    pub points_history: Option<Vec<RawRecord>>,
}

/// One history record as it arrives, before validation.
///
/// Fields stay loosely typed so a bad record can be reported precisely
/// instead of failing the whole document with a serde message. The short
/// names `timestamp` / `balance` are read as fallbacks; when a record carries
/// both spellings the upstream `created_at` / `running_balance` win.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub running_balance: Option<Value>,
    #[serde(default)]
    pub balance: Option<Value>,
}

impl RawRecord {
    /// Validate into an [`Event`]; `index` is the record's position in its list.
    /// Naive timestamp strings are read as local time on `clock`.
    pub fn to_event(&self, index: usize, clock: &DayClock) -> Result<Event, SeriesError> {
        let label = record_label(index, self.id.as_ref().map(value_text).as_deref());
        let timestamp = match present(&self.created_at).or(present(&self.timestamp)) {
            None => {
                return Err(SeriesError::malformed(label, "missing created_at"));
            }
            Some(Value::String(s)) => clock
                .parse_instant(s)
                .map_err(|reason| SeriesError::malformed(&label, format!("created_at: {reason}")))?,
            // epoch milliseconds
            Some(Value::Number(n)) => match n.as_i64() {
                Some(ms) => DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| {
                    SeriesError::malformed(&label, format!("created_at {n} is out of range"))
                })?,
                None if n.is_f64() => {
                    return Err(SeriesError::malformed(
                        label,
                        format!("created_at {n} must be an integer epoch-millis value"),
                    ));
                }
                None => {
                    return Err(SeriesError::malformed(
                        label,
                        format!("created_at {n} is out of range"),
                    ));
                }
            },
            Some(other) => {
                return Err(SeriesError::malformed(
                    label,
                    format!("created_at must be a string or number, got {other}"),
                ));
            }
        };

        let balance = match present(&self.running_balance).or(present(&self.balance)) {
            None => {
                return Err(SeriesError::malformed(label, "missing running_balance"));
            }
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                SeriesError::malformed(&label, format!("running_balance {n} is not a finite number"))
            })?,
            Some(other) => {
                return Err(SeriesError::malformed(
                    label,
                    format!("running_balance must be a number, got {other}"),
                ));
            }
        };

        Ok(Event::new(timestamp, balance))
    }
}

/// `null` counts as absent.
fn present(v: &Option<Value>) -> Option<&Value> {
    v.as_ref().filter(|v| !v.is_null())
}

/// "#3", or "#3 (id=abc)" when the record carries an id.
pub fn record_label(index: usize, id: Option<&str>) -> String {
    match id {
        Some(id) if !id.is_empty() => format!("#{index} (id={id})"),
        _ => format!("#{index}"),
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
