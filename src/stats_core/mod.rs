//! Stats Core - Rolling Window Statistics Engine
//!
//! Incremental sliding-time-window aggregation for streams of timestamped
//! physical-quantity samples (rainfall, temperature, ...) arriving at
//! irregular intervals.
//!
//! # Architecture
//!
//! ```text
//! caller ──insert──▶ SampleHistory (caller-owned, append-only)
//!     │                    ▲ read-only (HistoryRead)
//!     └──add_value──▶ RollingStats
//!                          │
//!                          ├─ total / average   (lazy cache over accumulator)
//!                          ├─ minimum / maximum (lazy invalidation + rescan)
//!                          ├─ change            (newest − earliest in window)
//!                          └─ snapshot          (serde persistence surface)
//! ```
//!
//! The engine is generic over the [`Quantity`] capability, so the same
//! window algorithms serve any quantity kind; `units` ships the common
//! weather kinds.

pub mod history;
pub mod quantity;
pub mod snapshot;
pub mod units;
pub mod window;

pub use history::{HistoryRead, SampleHistory, SharedHistory};
pub use quantity::{Quantity, QuantityError};
pub use snapshot::{load_snapshot, save_snapshot, SnapshotError, StatsSnapshot};
pub use units::{Rainfall, RainfallUnit, Temperature, TemperatureUnit};
pub use window::{RollingStats, StatsError};
