//! Aggregation data types for shoestat
//!
//! Pure data structures produced by the aggregation engine. Every value here
//! is built once from a snapshot of run records and never mutated afterwards;
//! annotating a section produces a modified copy.

use crate::types::{DailyDate, ISOTimestamp, RunRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Distance logged during one calendar week
///
/// `week_start` is always a week boundary for the configured first day of the
/// week. Buckets with `run_count == 0` are gap fillers between active weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// First day of the week
    pub week_start: DailyDate,
    /// Sum of run distances in this week
    pub total_distance: f64,
    /// Number of runs in this week
    pub run_count: u32,
}

impl WeeklyBucket {
    /// Zero-activity bucket for a week with no runs
    pub fn empty(week_start: DailyDate) -> Self {
        Self {
            week_start,
            total_distance: 0.0,
            run_count: 0,
        }
    }

    /// Whether this bucket was inserted to fill a gap
    pub fn is_gap(&self) -> bool {
        self.run_count == 0
    }
}

/// Runs logged during one calendar month, for section-style history lists
///
/// The running total always equals the sum of the member runs' distances, so
/// the fields are only reachable through accessors. Sections are built with
/// [`MonthlySection::from_runs`] and are serialize-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySection {
    month_date: DailyDate,
    run_total: f64,
    runs: Vec<RunRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    yearly_total: Option<f64>,
}

impl MonthlySection {
    /// Build a section from its member runs
    ///
    /// `month_date` may be any day inside the month; by convention it is the
    /// local date of the first run walked.
    pub fn from_runs(month_date: DailyDate, runs: Vec<RunRecord>) -> Self {
        let run_total = runs.iter().map(|run| run.distance).sum();
        Self {
            month_date,
            run_total,
            runs,
            yearly_total: None,
        }
    }

    /// A copy of this section carrying a closing yearly total
    pub fn with_yearly_total(&self, yearly_total: f64) -> Self {
        Self {
            yearly_total: Some(yearly_total),
            ..self.clone()
        }
    }

    /// A date inside the month this section covers
    pub fn month_date(&self) -> DailyDate {
        self.month_date
    }

    /// Calendar year of the section
    pub fn year(&self) -> i32 {
        self.month_date.year()
    }

    /// Calendar month of the section, 1-based
    pub fn month(&self) -> u32 {
        self.month_date.month()
    }

    /// Sum of member run distances
    pub fn run_total(&self) -> f64 {
        self.run_total
    }

    /// Member runs in walk order
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Year total, present only on the section that closes out a past year
    pub fn yearly_total(&self) -> Option<f64> {
        self.yearly_total
    }
}

/// Total distance per calendar year
///
/// A lookup structure; iteration order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyTotals(HashMap<i32, f64>);

impl YearlyTotals {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `year`, creating the entry when it does not exist yet
    pub fn commit(&mut self, year: i32, amount: f64) {
        *self.0.entry(year).or_insert(0.0) += amount;
    }

    /// Total for a year, if that year was seen
    pub fn get(&self, year: i32) -> Option<f64> {
        self.0.get(&year).copied()
    }

    /// Number of distinct years
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no year was seen
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(year, total)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.0.iter().map(|(year, total)| (*year, *total))
    }
}

/// Scalar statistics over a run collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Number of runs
    pub total_runs: usize,
    /// Sum of all distances
    pub total_distance: f64,
    /// Mean distance, 0.0 when there are no runs
    pub average_distance: f64,
    /// First run with the greatest distance
    pub longest_run: Option<RunRecord>,
    /// First run with the smallest distance
    pub shortest_run: Option<RunRecord>,
    /// Earliest run date
    pub first_run_date: Option<ISOTimestamp>,
    /// Latest run date
    pub last_run_date: Option<ISOTimestamp>,
}

/// Report footer totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_distance: f64,
    pub run_count: usize,
}

impl Totals {
    pub fn from_runs(runs: &[RunRecord]) -> Self {
        Self {
            total_distance: runs.iter().map(|run| run.distance).sum(),
            run_count: runs.len(),
        }
    }

    pub fn from_weekly(buckets: &[WeeklyBucket]) -> Self {
        let mut totals = Self::default();
        for bucket in buckets {
            totals.total_distance += bucket.total_distance;
            totals.run_count += bucket.run_count as usize;
        }
        totals
    }

    pub fn from_monthly(sections: &[MonthlySection]) -> Self {
        let mut totals = Self::default();
        for section in sections {
            totals.total_distance += section.run_total();
            totals.run_count += section.runs().len();
        }
        totals
    }
}
