//! Caller-selected series configuration.
//!
//! The trailing `window_days` window ending on the anchor's day is the default
//! mode; `full_history = true` asks for the replay instead. A key left out of
//! a config file keeps its default, so an empty section still means 14 days.
//! The anchor defaults to the `now` the caller passes in, which keeps
//! resolution pure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeriesError};
use crate::event::Event;
use crate::resample::Resampler;
use crate::series::DenseSeries;
use crate::time::{DayClock, DEFAULT_TIMEZONE};
use crate::window::{Window, DEFAULT_WINDOW_DAYS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Trailing window length in days (>= 1).
    #[serde(default = "default_window_days", alias = "windowDays")]
    pub window_days: u32,

    /// One point per event day instead of a fixed window; `window_days` is
    /// ignored when set.
    #[serde(default, alias = "fullHistory", skip_serializing_if = "is_false")]
    pub full_history: bool,

    /// Last day of the window is the day containing this instant.
    #[serde(default, alias = "anchorEnd", skip_serializing_if = "Option::is_none")]
    pub anchor_end: Option<DateTime<Utc>>,

    /// IANA zone used to cut instants into days.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            full_history: false,
            anchor_end: None,
            timezone: default_timezone(),
        }
    }
}

impl SeriesConfig {
    pub fn full_history() -> Self {
        Self {
            full_history: true,
            ..Self::default()
        }
    }

    pub fn trailing(days: u32) -> Self {
        Self {
            window_days: days,
            ..Self::default()
        }
    }

    /// Window length in effect, or `None` in full-history mode.
    pub fn trailing_days(&self) -> Option<u32> {
        (!self.full_history).then_some(self.window_days)
    }

    pub fn with_anchor(mut self, anchor_end: DateTime<Utc>) -> Self {
        self.anchor_end = Some(anchor_end);
        self
    }

    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = tz.into();
        self
    }

    /// Check ranges without building anything.
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(SeriesError::InvalidConfig(
                "window_days must be at least 1".to_string(),
            ));
        }
        DayClock::from_name(&self.timezone)?;
        Ok(())
    }

    /// Resolve into a resampler and, for the fixed-window variant, its window.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<(Resampler, Option<Window>)> {
        self.validate()?;
        let clock = DayClock::from_name(&self.timezone)?;
        let window = self
            .trailing_days()
            .map(|days| Window::trailing(days, self.anchor_end.unwrap_or(now), &clock))
            .transpose()?;
        Ok((Resampler::new(clock), window))
    }

    /// Resolve and run in one step.
    pub fn run(&self, events: &[Event], now: DateTime<Utc>) -> Result<DenseSeries> {
        let (resampler, window) = self.resolve(now)?;
        Ok(resampler.series(events, window.as_ref()))
    }
}
