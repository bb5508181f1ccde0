//! Calendar windows: inclusive, contiguous runs of whole days.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{Result, SeriesError};
use crate::event::Event;
use crate::time::DayClock;

/// Length of the trailing window used when the caller asks for the default.
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

/// Inclusive `[start, end]` range of calendar days. Always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Window {
    start: NaiveDate,
    end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SeriesError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// The `days`-long window ending on the day that contains `anchor_end`.
    ///
    /// `days = 14` with an anchor of 2026-02-20 gives 2026-02-07..=2026-02-20.
    pub fn trailing(days: u32, anchor_end: DateTime<Utc>, clock: &DayClock) -> Result<Self> {
        if days == 0 {
            return Err(SeriesError::InvalidConfig(
                "window_days must be at least 1".to_string(),
            ));
        }
        let end = clock.today(anchor_end);
        let start = end
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .ok_or_else(|| {
                SeriesError::InvalidConfig(format!("{days}-day window ending {end} underflows"))
            })?;
        Self::new(start, end)
    }

    /// Smallest window covering every event's day, or `None` without events.
    pub fn spanning(events: &[Event], clock: &DayClock) -> Option<Self> {
        let mut days = events.iter().map(|e| clock.day_of(e.timestamp));
        let first = days.next()?;
        let (start, end) = days.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the window, `(end - start) + 1`.
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// A window always holds at least one day.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Every day in the window, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.len())
    }
}
