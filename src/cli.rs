//! CLI interface for shoestat
//!
//! This module defines the command-line interface using clap.
//!
//! # Example
//!
//! ```bash
//! # Weekly mileage for one shoe, weeks starting Monday
//! shoestat weekly --shoe pegasus-40 --week-start monday
//!
//! # History list, most recent month first, with year totals
//! shoestat monthly --order desc
//!
//! # Statistics for January 2024 as JSON
//! shoestat stats --since 2024-01-01 --until 2024-01-31 --json
//! ```

use crate::error::{Result, ShoestatError};
use crate::types::{FirstDayOfWeek, SortOrder};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mileage summaries for running shoes
#[derive(Parser, Debug, Clone)]
#[command(name = "shoestat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Run records to read (JSON array or JSONL)
    #[arg(long, short = 'f', env = "SHOESTAT_RUNS_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Filter by start date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub since: Option<String>,

    /// Filter by end date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub until: Option<String>,

    /// Only include runs logged against this shoe (default: all shoes)
    #[arg(long, short = 's', global = true)]
    pub shoe: Option<String>,

    /// Timezone for date grouping (e.g. "America/New_York", "Europe/Berlin", "UTC")
    /// If not specified, uses the system's local timezone
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC for date grouping (overrides --timezone)
    #[arg(long, global = true)]
    pub utc: bool,

    /// First day of the week (sunday or monday; default: sunday)
    #[arg(long, env = "SHOESTAT_WEEK_START", global = true)]
    pub week_start: Option<FirstDayOfWeek>,

    /// Ordering of buckets (asc or desc)
    #[arg(long, default_value = "asc", global = true)]
    pub order: SortOrder,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show weekly mileage with empty weeks filled in
    Weekly,
    /// Show monthly sections with year-end totals
    Monthly,
    /// Show totals, averages and extremes
    Stats,
    /// Show totals per shoe
    Shoes,
}

/// Parse date filter from string
///
/// Accepts dates in YYYY-MM-DD or YYYY-MM format.
/// For YYYY-MM format, defaults to the first day of the month.
///
/// # Example
///
/// ```
/// use shoestat::cli::parse_date_filter;
/// use chrono::Datelike;
///
/// let date = parse_date_filter("2024-01-15").unwrap();
/// assert_eq!(date.day(), 15);
///
/// let date = parse_date_filter("2024-01").unwrap();
/// assert_eq!(date.day(), 1);
/// ```
pub fn parse_date_filter(date_str: &str) -> Result<chrono::NaiveDate> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    let (year, month) = parse_month_filter(date_str)?;
    chrono::NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ShoestatError::InvalidDate(format!("Invalid date: {date_str}")))
}

/// Parse an end-of-range date filter
///
/// Like [`parse_date_filter`], but YYYY-MM resolves to the last day of the
/// month so `--until 2024-01` includes all of January.
pub fn parse_until_filter(date_str: &str) -> Result<chrono::NaiveDate> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    let (year, month) = parse_month_filter(date_str)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    chrono::NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .ok_or_else(|| ShoestatError::InvalidDate(format!("Invalid date: {date_str}")))
}

/// Parse an optional `--since`/`--until` pair into an inclusive date range
///
/// # Errors
///
/// Returns `InvalidArgument` when the range is empty (since after until).
pub fn parse_date_range(
    since: Option<&str>,
    until: Option<&str>,
) -> Result<(Option<chrono::NaiveDate>, Option<chrono::NaiveDate>)> {
    let since = since.map(parse_date_filter).transpose()?;
    let until = until.map(parse_until_filter).transpose()?;

    if let Some((start, end)) = since.zip(until).filter(|(start, end)| start > end) {
        return Err(ShoestatError::InvalidArgument(format!(
            "--since {start} is after --until {end}"
        )));
    }

    Ok((since, until))
}

/// Parse a YYYY-MM month filter into (year, month)
pub fn parse_month_filter(month_str: &str) -> Result<(i32, u32)> {
    let parts: Vec<&str> = month_str.split('-').collect();
    if parts.len() != 2 {
        return Err(ShoestatError::InvalidDate(format!(
            "Invalid date format '{month_str}', expected YYYY-MM-DD or YYYY-MM"
        )));
    }

    let year = parts[0]
        .parse::<i32>()
        .map_err(|_| ShoestatError::InvalidDate(format!("Invalid year in '{month_str}'")))?;
    let month = parts[1]
        .parse::<u32>()
        .map_err(|_| ShoestatError::InvalidDate(format!("Invalid month in '{month_str}'")))?;

    if !(1..=12).contains(&month) {
        return Err(ShoestatError::InvalidDate(format!(
            "Month must be between 1-12, got {month}"
        )));
    }

    Ok((year, month))
}
