//! Data loader for run snapshots
//!
//! Reads run records exported by the persistence layer. Two layouts are
//! accepted: a JSON array of records, or JSONL with one record per line.
//! Each record looks like:
//!
//! ```json
//! {"id": "run-1", "shoe_id": "pegasus-40", "date": "2024-01-01T07:00:00Z", "distance": 5.0}
//! ```
//!
//! The aggregation engine assumes well-formed input, so contract violations
//! (negative or non-finite distances) are rejected here.
//!
//! Without an explicit path the loader looks for `shoestat/runs.jsonl` in the
//! platform data directory (e.g. `~/.local/share` on Linux).
//!
//! # Examples
//!
//! ```no_run
//! use shoestat::data_loader::DataLoader;
//!
//! # async fn example() -> shoestat::Result<()> {
//! let loader = DataLoader::new(Some("runs.jsonl".into()))?;
//! let runs = loader.load_runs().await?;
//! println!("Loaded {} runs", runs.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, ShoestatError};
use crate::types::RunRecord;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file name inside the data directory
const DEFAULT_RUNS_FILE: &str = "runs.jsonl";

/// Loader for run record snapshots
#[derive(Debug, Clone)]
pub struct DataLoader {
    path: PathBuf,
}

impl DataLoader {
    /// Create a loader for an explicit path, or the default location
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no path is given and the platform
    /// data directory cannot be determined.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        debug!("Reading runs from {}", path.display());
        Ok(Self { path })
    }

    /// Default snapshot location
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("shoestat").join(DEFAULT_RUNS_FILE))
            .ok_or_else(|| {
                ShoestatError::Config(
                    "Could not determine data directory; pass --file".to_string(),
                )
            })
    }

    /// Path this loader reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate every run in the file
    pub async fn load_runs(&self) -> Result<Vec<RunRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let runs = parse_runs(&content).map_err(|e| match e {
            ShoestatError::Json(err) => ShoestatError::Parse {
                file: self.path.clone(),
                error: err.to_string(),
            },
            other => other,
        })?;

        debug!("Loaded {} runs from {}", runs.len(), self.path.display());
        Ok(runs)
    }
}

/// Parse run records from a JSON array or JSONL document
///
/// JSONL records that fail to decode are reported as `InvalidRun` with their
/// 1-based line number.
pub fn parse_runs(content: &str) -> Result<Vec<RunRecord>> {
    let trimmed = content.trim_start();

    let runs: Vec<(usize, RunRecord)> = if trimmed.starts_with('[') {
        let runs: Vec<RunRecord> = serde_json::from_str(trimmed)?;
        runs.into_iter()
            .enumerate()
            .map(|(index, run)| (index + 1, run))
            .collect()
    } else {
        let mut runs = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let run = serde_json::from_str::<RunRecord>(line).map_err(|err| {
                ShoestatError::InvalidRun {
                    line: index + 1,
                    reason: format!("malformed record: {err}"),
                }
            })?;
            runs.push((index + 1, run));
        }
        runs
    };

    runs.into_iter()
        .map(|(line, run)| validate_run(line, run))
        .collect()
}

fn validate_run(line: usize, run: RunRecord) -> Result<RunRecord> {
    if !run.distance.is_finite() {
        return Err(ShoestatError::InvalidRun {
            line,
            reason: format!("distance of run '{}' is not a finite number", run.id),
        });
    }
    if run.distance < 0.0 {
        return Err(ShoestatError::InvalidRun {
            line,
            reason: format!("run '{}' has negative distance {}", run.id, run.distance),
        });
    }
    Ok(run)
}
