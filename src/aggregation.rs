//! Aggregation module for summarizing run history
//!
//! This module turns an unordered snapshot of run records into calendar
//! buckets: gap-filled weekly buckets for charts, monthly sections for
//! history lists, and per-year rollups used to close out past years.
//!
//! Every operation is a pure function of its inputs. Accumulators live only
//! for the duration of a single pass and are turned into immutable values as
//! each bucket is finalized.
//!
//! # Examples
//!
//! ```
//! use shoestat::aggregation::Aggregator;
//! use shoestat::calendar::CalendarConfig;
//! use shoestat::types::{FirstDayOfWeek, ISOTimestamp, RunId, RunRecord, ShoeId, SortOrder};
//! use chrono::{TimeZone, Utc};
//!
//! let run = |id: &str, day: u32, distance: f64| RunRecord::new(
//!     RunId::new(id),
//!     ShoeId::new("pegasus-40"),
//!     ISOTimestamp::new(Utc.with_ymd_and_hms(2024, 1, day, 7, 0, 0).unwrap()),
//!     distance,
//! );
//!
//! let aggregator = Aggregator::new(CalendarConfig::utc(FirstDayOfWeek::Monday));
//! let weeks = aggregator.collate_weekly(&[run("a", 1, 5.0), run("b", 22, 7.0)], SortOrder::Ascending);
//!
//! let distances: Vec<f64> = weeks.iter().map(|w| w.total_distance).collect();
//! assert_eq!(distances, vec![5.0, 0.0, 0.0, 7.0]);
//! ```

use crate::aggregation_types::{MonthlySection, Totals, WeeklyBucket, YearlyTotals};
use crate::calendar::CalendarConfig;
use crate::types::{DailyDate, RunRecord, ShoeId, SortOrder};
use chrono::Days;
use std::collections::BTreeMap;
use tracing::debug;

/// Accumulator for the week currently being walked
struct WeekAccumulator {
    week_start: DailyDate,
    distance: f64,
    run_count: u32,
}

impl WeekAccumulator {
    fn new(week_start: DailyDate) -> Self {
        Self {
            week_start,
            distance: 0.0,
            run_count: 0,
        }
    }

    fn add_run(&mut self, run: &RunRecord) {
        self.distance += run.distance;
        self.run_count += 1;
    }

    fn into_weekly_bucket(self) -> WeeklyBucket {
        WeeklyBucket {
            week_start: self.week_start,
            total_distance: self.distance,
            run_count: self.run_count,
        }
    }
}

/// Accumulator for the month currently being walked
struct MonthAccumulator {
    key: (i32, u32),
    month_date: DailyDate,
    runs: Vec<RunRecord>,
}

impl MonthAccumulator {
    fn new(month_date: DailyDate) -> Self {
        Self {
            key: (month_date.year(), month_date.month()),
            month_date,
            runs: Vec::new(),
        }
    }

    fn add_run(&mut self, run: &RunRecord) {
        self.runs.push(run.clone());
    }

    fn into_monthly_section(self) -> MonthlySection {
        MonthlySection::from_runs(self.month_date, self.runs)
    }
}

/// Main aggregation engine
#[derive(Debug, Clone)]
pub struct Aggregator {
    calendar: CalendarConfig,
}

impl Aggregator {
    /// Create a new Aggregator
    pub fn new(calendar: CalendarConfig) -> Self {
        Self { calendar }
    }

    /// Get the calendar configuration
    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    /// Sort runs by date in the requested direction
    ///
    /// The sort is stable, so runs sharing a date keep their input order in
    /// both directions.
    pub fn sorted_runs(runs: &[RunRecord], order: SortOrder) -> Vec<&RunRecord> {
        let mut sorted: Vec<&RunRecord> = runs.iter().collect();
        match order {
            SortOrder::Ascending => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::Descending => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        sorted
    }

    /// Collate runs into consecutive weekly buckets
    ///
    /// Weeks with no runs between the first and last active week are filled
    /// with zero buckets, so consecutive `week_start`s are always exactly seven
    /// days apart. Nothing is extrapolated before the first or after the last
    /// run. Empty input yields no buckets.
    pub fn collate_weekly(&self, runs: &[RunRecord], order: SortOrder) -> Vec<WeeklyBucket> {
        let mut buckets: Vec<WeeklyBucket> = Vec::new();
        let mut current: Option<WeekAccumulator> = None;

        for run in Self::sorted_runs(runs, order) {
            let week_start = self.calendar.week_start_for(&run.date);

            match current.as_mut() {
                Some(acc) if acc.week_start == week_start => acc.add_run(run),
                _ => {
                    if let Some(acc) = current.take() {
                        let previous = acc.week_start;
                        buckets.push(acc.into_weekly_bucket());
                        push_gap_weeks(&mut buckets, previous, week_start, order);
                    }
                    let mut acc = WeekAccumulator::new(week_start);
                    acc.add_run(run);
                    current = Some(acc);
                }
            }
        }

        if let Some(acc) = current {
            buckets.push(acc.into_weekly_bucket());
        }

        debug!(
            "Collated {} runs into {} weekly buckets ({} gap weeks, week starts {})",
            runs.len(),
            buckets.len(),
            buckets.iter().filter(|b| b.is_gap()).count(),
            self.calendar.first_day_of_week
        );

        buckets
    }

    /// Group runs into monthly sections
    ///
    /// Only months containing at least one run appear; there is no gap
    /// filling. Each section keeps its runs in walk order.
    pub fn group_monthly(&self, runs: &[RunRecord], order: SortOrder) -> Vec<MonthlySection> {
        let mut sections: Vec<MonthlySection> = Vec::new();
        let mut current: Option<MonthAccumulator> = None;

        for run in Self::sorted_runs(runs, order) {
            let local_date = self.calendar.local_date(&run.date);
            let key = (local_date.year(), local_date.month());

            match current.as_mut() {
                Some(acc) if acc.key == key => acc.add_run(run),
                _ => {
                    if let Some(acc) = current.take() {
                        sections.push(acc.into_monthly_section());
                    }
                    let mut acc = MonthAccumulator::new(local_date);
                    acc.add_run(run);
                    current = Some(acc);
                }
            }
        }

        if let Some(acc) = current {
            sections.push(acc.into_monthly_section());
        }

        debug!(
            "Grouped {} runs into {} monthly sections",
            runs.len(),
            sections.len()
        );

        sections
    }

    /// Roll monthly sections up into per-year totals
    ///
    /// Sections are walked in the order given. Consecutive sections of the
    /// same year accumulate; a year change commits the running total (even
    /// when it is zero) before starting the next year.
    pub fn yearly_totals(sections: &[MonthlySection]) -> YearlyTotals {
        let mut totals = YearlyTotals::new();
        let mut current: Option<(i32, f64)> = None;

        for section in sections {
            current = match current {
                Some((year, amount)) if year == section.year() => {
                    Some((year, amount + section.run_total()))
                }
                Some((year, amount)) => {
                    totals.commit(year, amount);
                    Some((section.year(), section.run_total()))
                }
                None => Some((section.year(), section.run_total())),
            };
        }

        if let Some((year, amount)) = current {
            totals.commit(year, amount);
        }

        totals
    }

    /// Attach year totals to the December section of every closed year
    ///
    /// Sections in `current_year` are never annotated, nor are non-December
    /// sections of past years. Returns a new list; the input is untouched.
    pub fn annotate_year_end(
        sections: &[MonthlySection],
        totals: &YearlyTotals,
        current_year: i32,
    ) -> Vec<MonthlySection> {
        sections
            .iter()
            .map(|section| {
                if section.year() == current_year || section.month() != 12 {
                    return section.clone();
                }
                match totals.get(section.year()) {
                    Some(total) => section.with_yearly_total(total),
                    None => section.clone(),
                }
            })
            .collect()
    }

    /// Monthly sections with year-end totals, as shown in a history list
    pub fn monthly_history(
        &self,
        runs: &[RunRecord],
        order: SortOrder,
        today: DailyDate,
    ) -> Vec<MonthlySection> {
        let sections = self.group_monthly(runs, order);
        let totals = Self::yearly_totals(&sections);
        Self::annotate_year_end(&sections, &totals, today.year())
    }

    /// Totals per shoe, keyed by shoe id
    pub fn totals_by_shoe(runs: &[RunRecord]) -> BTreeMap<ShoeId, Totals> {
        let mut shoes: BTreeMap<ShoeId, Totals> = BTreeMap::new();
        for run in runs {
            let totals = shoes.entry(run.shoe_id.clone()).or_default();
            totals.total_distance += run.distance;
            totals.run_count += 1;
        }
        shoes
    }
}

/// Next week boundary in walk direction
fn step_week(week_start: DailyDate, order: SortOrder) -> Option<DailyDate> {
    let day = week_start.inner();
    match order {
        SortOrder::Ascending => day.checked_add_days(Days::new(7)),
        SortOrder::Descending => day.checked_sub_days(Days::new(7)),
    }
    .map(DailyDate::new)
}

/// Push zero buckets for every week strictly between `previous` and `next`
fn push_gap_weeks(
    buckets: &mut Vec<WeeklyBucket>,
    previous: DailyDate,
    next: DailyDate,
    order: SortOrder,
) {
    let mut cursor = step_week(previous, order);
    while let Some(week) = cursor.filter(|week| match order {
        SortOrder::Ascending => *week < next,
        SortOrder::Descending => *week > next,
    }) {
        buckets.push(WeeklyBucket::empty(week));
        cursor = step_week(week, order);
    }
}
