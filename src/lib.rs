//! wxflow - rolling time-window statistics for weather telemetry streams
//!
//! Maintains running total, average, minimum/maximum (with the instants they
//! occurred), and newest-minus-oldest change over a configurable rolling
//! period, updated incrementally as samples arrive.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use std::rc::Rc;
//! use wxflow::{Rainfall, RollingStats, SampleHistory, StatsConfig};
//!
//! let config = StatsConfig::default(); // 24-hour window
//! let history = SampleHistory::new().into_shared();
//! let mut stats = RollingStats::new(config.rolling_period_hours, Rc::clone(&history)).unwrap();
//!
//! let at = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
//! let sample = Rainfall::millimeters(1.2);
//! history.borrow_mut().insert(at, sample);
//! stats.add_value(at, sample);
//!
//! assert_eq!(stats.maximum(), sample);
//! ```


mod config;
pub mod stats_core;

pub use config::{StatsConfig, DEFAULT_ROLLING_PERIOD_HOURS};
pub use stats_core::{
    load_snapshot, save_snapshot, HistoryRead, Quantity, QuantityError, Rainfall, RainfallUnit,
    RollingStats, SampleHistory, SharedHistory, SnapshotError, StatsError, StatsSnapshot,
    Temperature, TemperatureUnit,
};
