//! Resampler — sparse balance snapshots to one value per calendar day.
//!
//! Two configurations of the same component:
//! - fixed window: every day in a [`Window`] gets a value, carrying the last
//!   known balance forward (including one known only from before the window);
//! - full history: every distinct day that has events, nothing synthesized.
//!
//! In both, a day's value is the balance of the chronologically latest event on
//! that day. Same-day events are never aggregated.
//!
//! Cost: one sort of a copy of the input (`O(n log n)`), one pass to bucket,
//! one walk over the window. The caller's slice is never reordered.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::error::Result;
use crate::event::{chronological, Event};
use crate::series::DenseSeries;
use crate::time::DayClock;
use crate::window::Window;

/// Day-bucketing resampler. Stateless apart from the zone it buckets in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resampler {
    clock: DayClock,
}

impl Resampler {
    pub fn new(clock: DayClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &DayClock {
        &self.clock
    }

    /// Fixed-window variant with forward fill.
    ///
    /// The value entering the first day is the balance of the latest event
    /// strictly before `window.start()`, or 0 when there is none.
    pub fn resample(&self, events: &[Event], window: &Window) -> DenseSeries {
        let sorted = chronological(events);

        let mut seed = 0.0;
        let mut latest: HashMap<NaiveDate, f64> = HashMap::new();
        for e in &sorted {
            let day = self.clock.day_of(e.timestamp);
            if day < window.start() {
                seed = e.balance;
            } else if day <= window.end() {
                // ascending order: later same-day entries overwrite earlier ones
                latest.insert(day, e.balance);
            }
        }

        debug!(
            events = events.len(),
            days = window.len(),
            active_days = latest.len(),
            seed,
            "resampling fixed window {}..={}",
            window.start(),
            window.end()
        );

        let mut out = DenseSeries::with_capacity(window.len());
        let mut running = seed;
        for day in window.days() {
            if let Some(&balance) = latest.get(&day) {
                running = balance;
            }
            out.push(day, running);
        }
        out
    }

    /// Fixed-window variant from raw bounds; rejects `start > end`.
    pub fn resample_days(
        &self,
        events: &[Event],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DenseSeries> {
        let window = Window::new(start, end)?;
        Ok(self.resample(events, &window))
    }

    /// Full-history variant: one point per distinct event day, latest balance
    /// of that day, no gap filling.
    pub fn replay(&self, events: &[Event]) -> DenseSeries {
        let sorted = chronological(events);
        let mut out = DenseSeries::with_capacity(sorted.len());

        let mut current: Option<(NaiveDate, f64)> = None;
        for e in &sorted {
            let day = self.clock.day_of(e.timestamp);
            match current {
                Some((d, b)) if d != day => {
                    out.push(d, b);
                    current = Some((day, e.balance));
                }
                _ => current = Some((day, e.balance)),
            }
        }
        if let Some((d, b)) = current {
            out.push(d, b);
        }

        debug!(events = events.len(), days = out.len(), "replayed full history");
        out
    }

    /// Pick the variant by whether a window is supplied.
    pub fn series(&self, events: &[Event], window: Option<&Window>) -> DenseSeries {
        match window {
            Some(w) => self.resample(events, w),
            None => self.replay(events),
        }
    }
}
