//! Core types and calendar arithmetic for shoestat
//!
//! This crate provides the run and bucket types, the calendar bucketing
//! functions, and the error type shared by the shoestat library and binary.

pub mod aggregation_types;
pub mod calendar;
pub mod error;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, ShoestatError};
pub use types::{DailyDate, FirstDayOfWeek, ISOTimestamp, RunId, RunRecord, ShoeId, SortOrder};
