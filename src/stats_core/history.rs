//! Shared sample history store
//!
//! The history is owned by the caller and shared with the aggregator by
//! reference. The caller inserts each new observation *before* handing it to
//! [`RollingStats::add_value`](super::window::RollingStats::add_value); the
//! aggregator only ever reads, and never trims. Pruning, if any, is the
//! caller's business and happens outside this module.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::rc::Rc;

use chrono::{DateTime, Utc};

/// Read-only capability the aggregator needs from a history store
///
/// Abstracting the store behind a trait lets the caller's storage layer pick
/// its own representation; [`SampleHistory`] is the in-memory default.
pub trait HistoryRead<Q> {
    /// Entries whose timestamp lies inside `range`, ascending by timestamp
    fn entries_in(
        &self,
        range: (Bound<DateTime<Utc>>, Bound<DateTime<Utc>>),
    ) -> Vec<(DateTime<Utc>, Q)>;

    /// Timestamp of the newest entry, if any
    fn latest_timestamp(&self) -> Option<DateTime<Utc>>;
}

/// Append-only, time-ordered sample store backed by a `BTreeMap`
#[derive(Debug, Clone, Default)]
pub struct SampleHistory<Q> {
    samples: BTreeMap<DateTime<Utc>, Q>,
}

/// Single-threaded shared handle to a history store
pub type SharedHistory<Q> = Rc<RefCell<SampleHistory<Q>>>;

impl<Q: Copy> SampleHistory<Q> {
    pub fn new() -> Self {
        Self {
            samples: BTreeMap::new(),
        }
    }

    /// Wrap this store in the shared handle the aggregator holds
    pub fn into_shared(self) -> SharedHistory<Q> {
        Rc::new(RefCell::new(self))
    }

    /// Record an observation; timestamps are unique keys
    pub fn insert(&mut self, timestamp: DateTime<Utc>, value: Q) {
        self.samples.insert(timestamp, value);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl<Q: Copy> HistoryRead<Q> for SampleHistory<Q> {
    fn entries_in(
        &self,
        range: (Bound<DateTime<Utc>>, Bound<DateTime<Utc>>),
    ) -> Vec<(DateTime<Utc>, Q)> {
        self.samples
            .range(range)
            .map(|(timestamp, value)| (*timestamp, *value))
            .collect()
    }

    fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.samples.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0).unwrap()
    }

    #[test]
    fn test_entries_in_half_open_range() {
        let mut history = SampleHistory::new();
        history.insert(ts(0), 1.0f64);
        history.insert(ts(5), 2.0);
        history.insert(ts(10), 3.0);

        let entries = history.entries_in((Bound::Excluded(ts(0)), Bound::Included(ts(10))));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (ts(5), 2.0));
        assert_eq!(entries[1], (ts(10), 3.0));
    }

    #[test]
    fn test_entries_ascending() {
        let mut history = SampleHistory::new();
        history.insert(ts(10), 3.0f64);
        history.insert(ts(0), 1.0);
        history.insert(ts(5), 2.0);

        let entries = history.entries_in((Bound::Unbounded, Bound::Unbounded));
        let times: Vec<_> = entries.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![ts(0), ts(5), ts(10)]);
    }

    #[test]
    fn test_latest_timestamp() {
        let mut history = SampleHistory::new();
        assert_eq!(history.latest_timestamp(), None);

        history.insert(ts(5), 1.0f64);
        history.insert(ts(2), 2.0);
        assert_eq!(history.latest_timestamp(), Some(ts(5)));
    }
}
