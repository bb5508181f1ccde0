//! Time utilities: calendar-day bucketing in one explicit zone, and instant parsing.
//!
//! Every "which day does this belong to" question goes through [`DayClock`], so
//! a series never mixes zones and never depends on the host locale.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SeriesError};

/// Zone used when nothing is configured.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Truncates instants to calendar days in a fixed IANA zone.
///
/// A day covers `[00:00, next 00:00)` local time. DST shifts are resolved by
/// the zone database, never by adding fixed millisecond offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClock {
    tz: Tz,
}

impl DayClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn utc() -> Self {
        Self::new(Tz::UTC)
    }

    /// Build a clock from an IANA name like "America/Chicago".
    pub fn from_name(name: &str) -> Result<Self> {
        let tz: Tz = name
            .trim()
            .parse()
            .map_err(|_| SeriesError::InvalidTimezone(name.to_string()))?;
        Ok(Self::new(tz))
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Calendar day containing `ts` in this clock's zone.
    pub fn day_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.tz).date_naive()
    }

    /// "Today" as seen from `anchor`.
    pub fn today(&self, anchor: DateTime<Utc>) -> NaiveDate {
        self.day_of(anchor)
    }

    /// Parse an instant as it appears in upstream records.
    ///
    /// Accepts RFC 3339 with an offset ("2026-02-20T05:59:00Z",
    /// "2026-02-19T23:59:00-06:00") and naive "YYYY-MM-DD[T| ]HH:MM:SS[.fff]",
    /// which is local time in this clock's zone. A naive time that DST makes
    /// ambiguous or skips is an error. `Err` carries a human-readable reason.
    pub fn parse_instant(&self, raw: &str) -> std::result::Result<DateTime<Utc>, String> {
        let s = raw.trim();
        if s.is_empty() {
            return Err("empty timestamp".to_string());
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }

        let ndt = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .ok_or_else(|| format!("unparsable timestamp '{s}'"))?;

        self.tz
            .from_local_datetime(&ndt)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| format!("ambiguous or invalid local time (DST?): {s} {}", self.tz))
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::utc()
    }
}

/// Helper: format a UTC time into RFC3339.
pub fn to_rfc3339_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
