//! Rolling time-window statistics over a shared sample history
//!
//! Uses strict time-cutoff windows: the window ending at reference instant
//! `t` covers `(t - period, t]`, so a sample exactly `period` old has already
//! rolled off. Totals are maintained incrementally (only entries that just
//! left the window are touched) and extrema use lazy invalidation: a rescan
//! of the window happens only when a rolled-off entry matches the incumbent.

use std::cell::{Cell, RefCell};
use std::ops::Bound;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

use super::history::{HistoryRead, SampleHistory};
use super::quantity::{Quantity, QuantityError};
use super::snapshot::StatsSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// The rolling period must be a positive number of hours
    InvalidPeriod(i64),
}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsError::InvalidPeriod(hours) => {
                write!(f, "rolling period must be positive, got {} hours", hours)
            }
        }
    }
}

impl std::error::Error for StatsError {}

/// Incremental rolling-window aggregator for one quantity kind
///
/// Holds a read-only shared reference to the caller-owned [`SampleHistory`];
/// the caller inserts each observation into the history first, then calls
/// [`add_value`](Self::add_value) with the same pair. All accessors are plain
/// reads apart from lazy cache population in [`total`](Self::total) and
/// [`average`](Self::average).
///
/// Single-threaded by design: no locking, every operation completes
/// synchronously.
pub struct RollingStats<Q: Quantity, H: HistoryRead<Q> = SampleHistory<Q>> {
    rolling_period_hours: i64,
    rolling_period: Duration,
    history: Rc<RefCell<H>>,
    /// Sum of in-window sample magnitudes, in the canonical unit
    total_magnitude: f64,
    /// Number of samples represented in `total_magnitude`
    sample_count: usize,
    cached_total: Cell<Option<Q>>,
    cached_average: Cell<Option<Q>>,
    minimum: Q,
    minimum_time: DateTime<Utc>,
    maximum: Q,
    maximum_time: DateTime<Utc>,
    change: Q,
    last_sample: DateTime<Utc>,
    /// False until the first update with a non-empty window has set the
    /// extrema from a real sample
    seeded: bool,
}

impl<Q: Quantity, H: HistoryRead<Q>> RollingStats<Q, H> {
    /// Create an aggregator over `history` with the given window width
    ///
    /// The reference instant starts at the newest entry already in the
    /// history, or at the construction instant if the history is empty.
    pub fn new(rolling_period_hours: i64, history: Rc<RefCell<H>>) -> Result<Self, StatsError> {
        if rolling_period_hours <= 0 {
            return Err(StatsError::InvalidPeriod(rolling_period_hours));
        }

        let now = Utc::now();
        let last_sample = history.borrow().latest_timestamp().unwrap_or(now);

        Ok(Self {
            rolling_period_hours,
            rolling_period: Duration::hours(rolling_period_hours),
            history,
            total_magnitude: 0.0,
            sample_count: 0,
            cached_total: Cell::new(Some(Q::zero())),
            cached_average: Cell::new(Some(Q::zero())),
            minimum: Q::zero(),
            minimum_time: now,
            maximum: Q::zero(),
            maximum_time: now,
            change: Q::zero(),
            last_sample,
            seeded: false,
        })
    }

    /// Fold a new observation into the window statistics
    ///
    /// The caller must have inserted `(timestamp, sample)` into the shared
    /// history before this call. Timestamps are expected to be
    /// non-decreasing; earlier timestamps are tolerated but window
    /// correctness is only guaranteed for in-order input.
    pub fn add_value(&mut self, timestamp: DateTime<Utc>, sample: Q) {
        if timestamp < self.last_sample {
            log::warn!(
                "sample at {} is older than the last sample at {}; \
                 window math assumes non-decreasing timestamps",
                timestamp,
                self.last_sample
            );
        }

        let rolled_off = self.rolled_off_entries(timestamp);
        self.update_total(&rolled_off, sample);
        self.update_extrema_and_change(timestamp, sample, &rolled_off);
        self.last_sample = timestamp;
    }

    /// Entries that aged out between the previous and the new reference
    /// instant: timestamps in `(last_sample - period, timestamp - period]`
    fn rolled_off_entries(&self, timestamp: DateTime<Utc>) -> Vec<(DateTime<Utc>, Q)> {
        let old_start = self.last_sample - self.rolling_period;
        let new_start = timestamp - self.rolling_period;

        // Empty when the reference instant does not advance (repeated or
        // out-of-order timestamps).
        if new_start <= old_start {
            return Vec::new();
        }

        self.history
            .borrow()
            .entries_in((Bound::Excluded(old_start), Bound::Included(new_start)))
    }

    fn update_total(&mut self, rolled_off: &[(DateTime<Utc>, Q)], sample: Q) {
        let unit = Q::canonical_unit();

        for (_, old_value) in rolled_off {
            self.total_magnitude -= old_value.magnitude_in(unit);
            self.sample_count = self.sample_count.saturating_sub(1);
        }

        self.total_magnitude += sample.magnitude_in(unit);
        self.sample_count += 1;

        // Total and average share the accumulator; both caches go stale
        // together.
        self.cached_total.set(None);
        self.cached_average.set(None);
    }

    fn update_extrema_and_change(
        &mut self,
        timestamp: DateTime<Utc>,
        sample: Q,
        rolled_off: &[(DateTime<Utc>, Q)],
    ) {
        let window_start = timestamp - self.rolling_period;
        let window = self
            .history
            .borrow()
            .entries_in((Bound::Excluded(window_start), Bound::Included(timestamp)));

        // Empty window: minimum/maximum/change keep their previous values.
        let Some((_, earliest)) = window.first() else {
            return;
        };

        self.change = sample.subtract(earliest);

        if !self.seeded {
            self.minimum = sample;
            self.minimum_time = self.last_sample;
            self.maximum = sample;
            self.maximum_time = self.last_sample;
            self.seeded = true;
            return;
        }

        // A fresh extremum records the previous reference instant, not its
        // own timestamp; kept for output compatibility with existing
        // consumers.
        if sample > self.maximum {
            self.maximum = sample;
            self.maximum_time = self.last_sample;
        } else if rolled_off.iter().any(|(_, value)| *value == self.maximum) {
            // The incumbent maximum may have just left the window.
            log::debug!("maximum invalidated at {}; rescanning window", timestamp);
            self.maximum = sample;
            self.maximum_time = self.last_sample;
            for (entry_time, value) in &window {
                if *value > self.maximum {
                    self.maximum = *value;
                    self.maximum_time = *entry_time;
                }
            }
        }

        if sample < self.minimum {
            self.minimum = sample;
            self.minimum_time = self.last_sample;
        } else if rolled_off.iter().any(|(_, value)| *value == self.minimum) {
            log::debug!("minimum invalidated at {}; rescanning window", timestamp);
            self.minimum = sample;
            self.minimum_time = self.last_sample;
            for (entry_time, value) in &window {
                if *value < self.minimum {
                    self.minimum = *value;
                    self.minimum_time = *entry_time;
                }
            }
        }
    }

    /// Running total over the window, recomputed lazily from the accumulator
    pub fn total(&self) -> Result<Q, QuantityError> {
        if let Some(total) = self.cached_total.get() {
            return Ok(total);
        }

        let total = Q::from_magnitude(self.total_magnitude, Q::canonical_unit())?;
        self.cached_total.set(Some(total));
        Ok(total)
    }

    /// Running average over the window; the zero quantity when the window
    /// holds no samples
    pub fn average(&self) -> Result<Q, QuantityError> {
        if let Some(average) = self.cached_average.get() {
            return Ok(average);
        }

        let average = if self.sample_count == 0 {
            Q::zero()
        } else {
            Q::from_magnitude(
                self.total_magnitude / self.sample_count as f64,
                Q::canonical_unit(),
            )?
        };
        self.cached_average.set(Some(average));
        Ok(average)
    }

    pub fn minimum(&self) -> Q {
        self.minimum
    }

    /// Instant the current minimum was recorded (see the reference-instant
    /// note on [`add_value`](Self::add_value))
    pub fn minimum_time(&self) -> DateTime<Utc> {
        self.minimum_time
    }

    pub fn maximum(&self) -> Q {
        self.maximum
    }

    pub fn maximum_time(&self) -> DateTime<Utc> {
        self.maximum_time
    }

    /// Newest sample minus the earliest sample still inside the window
    pub fn change(&self) -> Q {
        self.change
    }

    /// Timestamp of the most recent update; also the reference instant of
    /// the current window
    pub fn last_sample(&self) -> DateTime<Utc> {
        self.last_sample
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn rolling_period_hours(&self) -> i64 {
        self.rolling_period_hours
    }

    /// Externally visible state intended for persistence
    pub fn snapshot(&self) -> StatsSnapshot<Q> {
        StatsSnapshot {
            rolling_period_hours: self.rolling_period_hours,
            total_magnitude: self.total_magnitude,
            minimum: self.minimum,
            minimum_time: self.minimum_time,
            maximum: self.maximum,
            maximum_time: self.maximum_time,
            change: self.change,
            last_sample: self.last_sample,
        }
    }

    /// Rebuild an aggregator from a snapshot and the history it was taken
    /// against
    ///
    /// The sample count is recomputed from the history window ending at the
    /// snapshot's last-sample instant, so the history must cover at least
    /// that window for the restored totals to stay consistent.
    pub fn restore(snapshot: StatsSnapshot<Q>, history: Rc<RefCell<H>>) -> Result<Self, StatsError> {
        if snapshot.rolling_period_hours <= 0 {
            return Err(StatsError::InvalidPeriod(snapshot.rolling_period_hours));
        }

        let rolling_period = Duration::hours(snapshot.rolling_period_hours);
        let window_start = snapshot.last_sample - rolling_period;
        let sample_count = history
            .borrow()
            .entries_in((
                Bound::Excluded(window_start),
                Bound::Included(snapshot.last_sample),
            ))
            .len();

        log::debug!(
            "restored rolling stats: {} samples in the window ending at {}",
            sample_count,
            snapshot.last_sample
        );

        Ok(Self {
            rolling_period_hours: snapshot.rolling_period_hours,
            rolling_period,
            history,
            total_magnitude: snapshot.total_magnitude,
            sample_count,
            cached_total: Cell::new(None),
            cached_average: Cell::new(None),
            minimum: snapshot.minimum,
            minimum_time: snapshot.minimum_time,
            maximum: snapshot.maximum,
            maximum_time: snapshot.maximum_time,
            change: snapshot.change,
            last_sample: snapshot.last_sample,
            seeded: sample_count > 0,
        })
    }
}
