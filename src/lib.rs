//! shoestat - Mileage history for running shoes
//!
//! This library turns run records (date, distance, owning shoe) into:
//! - Gap-filled weekly buckets for charts
//! - Monthly sections with year-end totals for history lists
//! - Scalar statistics (totals, averages, longest and shortest runs, year to date)
//!
//! All aggregation is synchronous and side-effect free.
//!
//! # Examples
//!
//! ```
//! use shoestat::{
//!     aggregation::Aggregator,
//!     calendar::CalendarConfig,
//!     statistics::StatisticsCalculator,
//!     types::{FirstDayOfWeek, ISOTimestamp, RunId, RunRecord, ShoeId, SortOrder},
//! };
//! use chrono::{TimeZone, Utc};
//!
//! let runs = vec![
//!     RunRecord::new(
//!         RunId::new("r1"),
//!         ShoeId::new("pegasus-40"),
//!         ISOTimestamp::new(Utc.with_ymd_and_hms(2024, 1, 5, 7, 0, 0).unwrap()),
//!         10.0,
//!     ),
//! ];
//!
//! let aggregator = Aggregator::new(CalendarConfig::utc(FirstDayOfWeek::Sunday));
//! let months = aggregator.group_monthly(&runs, SortOrder::Descending);
//! assert_eq!(months.len(), 1);
//!
//! let stats = StatisticsCalculator::summarize(&runs);
//! assert_eq!(stats.total_runs, 1);
//! ```

pub mod aggregation;
pub mod cli;
pub mod data_loader;
pub mod filters;
pub mod output;
pub mod statistics;

// Core modules live in shoestat-core
pub use shoestat_core::{aggregation_types, calendar, error, types};

// Re-export commonly used types
pub use shoestat_core::{
    DailyDate, FirstDayOfWeek, ISOTimestamp, Result, RunId, RunRecord, ShoeId, ShoestatError,
    SortOrder,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
