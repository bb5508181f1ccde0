//! tally-core: turn sparse balance snapshots into dense, calendar-aligned series

pub mod config;
pub mod error;
pub mod event;
pub mod resample;
pub mod series;
pub mod time;
pub mod window;

pub use config::SeriesConfig;
pub use error::{Result, SeriesError};
pub use event::Event;
pub use resample::Resampler;
pub use series::{DenseSeries, LABEL_FORMAT};
pub use time::{DayClock, DEFAULT_TIMEZONE};
pub use window::{Window, DEFAULT_WINDOW_DAYS};
