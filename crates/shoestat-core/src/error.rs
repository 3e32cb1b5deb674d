//! Error types for shoestat
//!
//! The aggregation engine is infallible; everything here is raised at the
//! boundary, while reading run snapshots or interpreting user input.
//!
//! # Example
//!
//! ```
//! use shoestat_core::error::{ShoestatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // io::Error converts into ShoestatError automatically
//!     let _file = std::fs::read_to_string("nonexistent.json")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for shoestat operations
#[derive(Error, Debug)]
pub enum ShoestatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A run record violated the input contract
    #[error("Invalid run record at line {line}: {reason}")]
    InvalidRun {
        /// 1-based line (or array position) of the offending record
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in shoestat
pub type Result<T> = std::result::Result<T, ShoestatError>;
