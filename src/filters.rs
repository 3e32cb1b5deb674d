//! Filtering module for run records
//!
//! Selects which runs feed the aggregation engine: a local date range and
//! either one shoe or every shoe. Month filtering applies to monthly
//! sections after grouping.
//!
//! # Examples
//!
//! ```
//! use shoestat::filters::{RunFilter, ShoeSelection};
//! use shoestat::types::ShoeId;
//! use chrono::NaiveDate;
//!
//! // January 2024 on a single shoe
//! let filter = RunFilter::new()
//!     .with_since(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .with_until(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
//!     .with_shoes(ShoeSelection::Shoe(ShoeId::new("pegasus-40")));
//! ```

use crate::aggregation_types::MonthlySection;
use crate::types::{RunRecord, ShoeId};
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

/// Which shoes' runs to include
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ShoeSelection {
    /// Aggregate across every shoe
    #[default]
    AllShoes,
    /// Only runs logged against this shoe
    Shoe(ShoeId),
}

impl ShoeSelection {
    /// Selection from an optional shoe id
    pub fn from_option(shoe: Option<ShoeId>) -> Self {
        shoe.map_or(Self::AllShoes, Self::Shoe)
    }

    /// Whether a shoe is selected
    pub fn includes(&self, shoe_id: &ShoeId) -> bool {
        match self {
            Self::AllShoes => true,
            Self::Shoe(selected) => selected == shoe_id,
        }
    }
}

/// Filter configuration for run records
///
/// Date bounds are inclusive and compare the run's local calendar date.
#[derive(Debug, Default, Clone)]
pub struct RunFilter {
    /// Start date filter (inclusive)
    pub since_date: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub until_date: Option<NaiveDate>,
    /// Shoe selection
    pub shoes: ShoeSelection,
    /// Timezone used to derive a run's local date (UTC if unset)
    pub timezone: Option<Tz>,
}

impl RunFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start date filter
    pub fn with_since(mut self, date: NaiveDate) -> Self {
        self.since_date = Some(date);
        self
    }

    /// Set the end date filter
    pub fn with_until(mut self, date: NaiveDate) -> Self {
        self.until_date = Some(date);
        self
    }

    /// Set the shoe selection
    pub fn with_shoes(mut self, shoes: ShoeSelection) -> Self {
        self.shoes = shoes;
        self
    }

    /// Set the timezone used for date comparisons
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = Some(tz);
        self
    }

    /// Check if a run passes the filter
    pub fn matches(&self, run: &RunRecord) -> bool {
        if !self.shoes.includes(&run.shoe_id) {
            return false;
        }

        let local_date = run.date.to_local_date(&self.timezone.unwrap_or(Tz::UTC));
        let run_date = local_date.inner();

        if self.since_date.is_some_and(|since| *run_date < since) {
            return false;
        }
        if self.until_date.is_some_and(|until| *run_date > until) {
            return false;
        }

        true
    }

    /// Matching runs, in input order
    pub fn apply(&self, runs: &[RunRecord]) -> Vec<RunRecord> {
        runs.iter().filter(|run| self.matches(run)).cloned().collect()
    }
}

/// Month filter for monthly sections
///
/// # Example
///
/// ```
/// use shoestat::filters::MonthFilter;
///
/// // Q1 2024
/// let filter = MonthFilter::new()
///     .with_since(2024, 1)
///     .with_until(2024, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MonthFilter {
    /// Start month (year and month)
    pub since: Option<(i32, u32)>,
    /// End month (year and month)
    pub until: Option<(i32, u32)>,
}

impl MonthFilter {
    /// Create a new month filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start month
    pub fn with_since(mut self, year: i32, month: u32) -> Self {
        self.since = Some((year, month));
        self
    }

    /// Set the end month
    pub fn with_until(mut self, year: i32, month: u32) -> Self {
        self.until = Some((year, month));
        self
    }

    /// Check if a date falls within the month filter
    pub fn matches_date(&self, date: &NaiveDate) -> bool {
        let key = (date.year(), date.month());

        if self.since.is_some_and(|since| key < since) {
            return false;
        }
        if self.until.is_some_and(|until| key > until) {
            return false;
        }

        true
    }

    /// Keep only sections whose month passes the filter
    pub fn retain_sections(&self, sections: &mut Vec<MonthlySection>) {
        sections.retain(|section| self.matches_date(section.month_date().inner()));
    }
}
