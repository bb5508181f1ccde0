use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building a balance series.
///
/// Every variant is a deterministic failure of the input itself: retrying the
/// same call cannot change the outcome, and no partial series is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// The window starts after it ends.
    #[error("invalid window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    /// A source record lacks a usable timestamp or balance.
    #[error("malformed event {record}: {reason}")]
    MalformedEvent {
        /// Which record failed, e.g. "#3" or "#3 (id=abc)".
        record: String,
        reason: String,
    },

    /// The configured IANA zone name is unknown.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Series configuration outside its allowed range.
    #[error("invalid series config: {0}")]
    InvalidConfig(String),
}

impl SeriesError {
    pub fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        SeriesError::MalformedEvent {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SeriesError>;
