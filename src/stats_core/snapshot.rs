//! Snapshot surface for rolling statistics
//!
//! Only the externally visible state is persisted; cache flags, the
//! canonical unit, and the sample count are recomputed on restore (see
//! [`RollingStats::restore`](super::window::RollingStats::restore)). The
//! JSON helpers here are a convenience; the snapshot struct itself is plain
//! serde, so callers can pick any format.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        SnapshotError::Io(err)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Serialization(err)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Persisted state of a [`RollingStats`](super::window::RollingStats)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot<Q> {
    pub rolling_period_hours: i64,
    /// Window total in the quantity kind's canonical unit
    pub total_magnitude: f64,
    pub minimum: Q,
    pub minimum_time: DateTime<Utc>,
    pub maximum: Q,
    pub maximum_time: DateTime<Utc>,
    pub change: Q,
    pub last_sample: DateTime<Utc>,
}

/// Save a snapshot as pretty-printed JSON
pub fn save_snapshot<Q: Serialize>(
    snapshot: &StatsSnapshot<Q>,
    file_path: &Path,
) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(file_path, json)?;

    log::debug!("Saved rolling stats snapshot to {}", file_path.display());
    Ok(())
}

/// Load a snapshot from a JSON file; `None` when the file does not exist
pub fn load_snapshot<Q: DeserializeOwned>(
    file_path: &Path,
) -> Result<Option<StatsSnapshot<Q>>, SnapshotError> {
    if !file_path.exists() {
        log::info!("No existing snapshot file found: {}", file_path.display());
        return Ok(None);
    }

    let json = fs::read_to_string(file_path)?;
    let snapshot: StatsSnapshot<Q> = serde_json::from_str(&json)?;

    log::info!("Loaded rolling stats snapshot from {}", file_path.display());
    Ok(Some(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats_core::units::Rainfall;
    use chrono::TimeZone;

    fn sample_snapshot() -> StatsSnapshot<Rainfall> {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
        StatsSnapshot {
            rolling_period_hours: 24,
            total_magnitude: 4.5,
            minimum: Rainfall::millimeters(0.5),
            minimum_time: at,
            maximum: Rainfall::millimeters(2.0),
            maximum_time: at,
            change: Rainfall::millimeters(1.5),
            last_sample: at,
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let snapshot = sample_snapshot();
        save_snapshot(&snapshot, &path).unwrap();

        let loaded: StatsSnapshot<Rainfall> = load_snapshot(&path).unwrap().unwrap();
        assert_eq!(loaded.rolling_period_hours, 24);
        assert!((loaded.total_magnitude - 4.5).abs() < 1e-9);
        assert_eq!(loaded.maximum, snapshot.maximum);
        assert_eq!(loaded.last_sample, snapshot.last_sample);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let loaded = load_snapshot::<Rainfall>(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"rolling_period_hours\":").unwrap();

        assert!(matches!(
            load_snapshot::<Rainfall>(&path),
            Err(SnapshotError::Serialization(_))
        ));
    }
}
