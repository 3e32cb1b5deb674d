//! Common test utilities and helpers for shoestat tests
//!
//! Builders for run records and small helpers for writing run snapshots to
//! temporary files.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use shoestat::types::{ISOTimestamp, RunId, RunRecord, ShoeId};
use tempfile::TempDir;
use tokio::fs;

/// Shoes used across tests
pub const TEST_SHOES: &[&str] = &["pegasus-40", "vaporfly-3", "ghost-15"];

/// Builder for creating test RunRecord instances
pub struct RunBuilder {
    id: String,
    shoe_id: String,
    date: DateTime<Utc>,
    distance: f64,
}

impl RunBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            id: "run".to_string(),
            shoe_id: TEST_SHOES[0].to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            distance: 5.0,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_shoe(mut self, shoe_id: &str) -> Self {
        self.shoe_id = shoe_id.to_string();
        self
    }

    /// Noon UTC on the given day
    pub fn on(mut self, year: i32, month: u32, day: u32) -> Self {
        self.date = Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
        self
    }

    /// Exact instant from an RFC3339 string
    pub fn at(mut self, timestamp: &str) -> Self {
        self.date = DateTime::parse_from_rfc3339(timestamp)
            .unwrap()
            .with_timezone(&Utc);
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    pub fn build(self) -> RunRecord {
        RunRecord::new(
            RunId::new(self.id),
            ShoeId::new(self.shoe_id),
            ISOTimestamp::new(self.date),
            self.distance,
        )
    }
}

impl Default for RunBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a run at noon UTC
pub fn run(id: &str, year: i32, month: u32, day: u32, distance: f64) -> RunRecord {
    RunBuilder::new()
        .with_id(id)
        .on(year, month, day)
        .with_distance(distance)
        .build()
}

/// Write runs as JSONL into a fresh temp directory
pub async fn write_runs_jsonl(runs: &[RunRecord]) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("runs.jsonl");

    let content = runs
        .iter()
        .map(|run| serde_json::to_string(run).unwrap())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&path, content).await.unwrap();

    (dir, path)
}

/// Assert two distances are equal up to floating point noise
pub fn assert_distance_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected distance {expected}, got {actual}"
    );
}
