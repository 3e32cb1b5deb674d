//! Scalar statistics over run collections
//!
//! These functions are independent of bucketing and accept any run
//! collection: a single shoe, every shoe, or the result of a date filter.
//! Empty input is a normal case and yields zeros and absent extrema.

use crate::aggregation_types::RunStatistics;
use crate::calendar::CalendarConfig;
use crate::types::{DailyDate, ISOTimestamp, RunRecord};

/// Calculator for run statistics
pub struct StatisticsCalculator;

impl StatisticsCalculator {
    /// Sum of all distances, 0.0 for no runs
    pub fn total_distance(runs: &[RunRecord]) -> f64 {
        runs.iter().map(|run| run.distance).sum()
    }

    /// Mean distance, 0.0 for no runs
    pub fn average_distance(runs: &[RunRecord]) -> f64 {
        if runs.is_empty() {
            return 0.0;
        }
        Self::total_distance(runs) / runs.len() as f64
    }

    /// The first run with the greatest distance
    pub fn longest_run(runs: &[RunRecord]) -> Option<&RunRecord> {
        runs.iter().fold(None, |best: Option<&RunRecord>, run| match best {
            Some(current) if run.distance <= current.distance => Some(current),
            _ => Some(run),
        })
    }

    /// The first run with the smallest distance
    pub fn shortest_run(runs: &[RunRecord]) -> Option<&RunRecord> {
        runs.iter().fold(None, |best: Option<&RunRecord>, run| match best {
            Some(current) if run.distance >= current.distance => Some(current),
            _ => Some(run),
        })
    }

    /// Runs with `start <= date <= end`, in input order
    pub fn runs_in_date_range(
        runs: &[RunRecord],
        start: ISOTimestamp,
        end: ISOTimestamp,
    ) -> Vec<RunRecord> {
        runs.iter()
            .filter(|run| start <= run.date && run.date <= end)
            .cloned()
            .collect()
    }

    /// Distance logged in `today`'s calendar year up to and including `today`
    pub fn year_to_date_distance(
        runs: &[RunRecord],
        today: DailyDate,
        calendar: &CalendarConfig,
    ) -> f64 {
        runs.iter()
            .filter(|run| {
                let date = calendar.local_date(&run.date);
                date.year() == today.year() && date <= today
            })
            .map(|run| run.distance)
            .sum()
    }

    /// All statistics in a single pass
    pub fn summarize(runs: &[RunRecord]) -> RunStatistics {
        let mut stats = RunStatistics::default();

        for run in runs {
            stats.total_runs += 1;
            stats.total_distance += run.distance;

            if stats
                .longest_run
                .as_ref()
                .is_none_or(|longest| run.distance > longest.distance)
            {
                stats.longest_run = Some(run.clone());
            }
            if stats
                .shortest_run
                .as_ref()
                .is_none_or(|shortest| run.distance < shortest.distance)
            {
                stats.shortest_run = Some(run.clone());
            }
            if stats.first_run_date.is_none_or(|first| run.date < first) {
                stats.first_run_date = Some(run.date);
            }
            if stats.last_run_date.is_none_or(|last| run.date > last) {
                stats.last_run_date = Some(run.date);
            }
        }

        if stats.total_runs > 0 {
            stats.average_distance = stats.total_distance / stats.total_runs as f64;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FirstDayOfWeek, RunId, ShoeId};
    use chrono::{TimeZone, Utc};

    fn run(id: &str, month: u32, day: u32, distance: f64) -> RunRecord {
        RunRecord::new(
            RunId::new(id),
            ShoeId::new("shoe-1"),
            ISOTimestamp::new(Utc.with_ymd_and_hms(2024, month, day, 8, 0, 0).unwrap()),
            distance,
        )
    }

    fn ts(month: u32, day: u32, hour: u32) -> ISOTimestamp {
        ISOTimestamp::new(Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_statistics() {
        let stats = StatisticsCalculator::summarize(&[]);

        assert_eq!(stats.total_runs, 0);
        assert_eq!(stats.total_distance, 0.0);
        assert_eq!(stats.average_distance, 0.0);
        assert!(stats.longest_run.is_none());
        assert!(stats.shortest_run.is_none());
        assert!(stats.first_run_date.is_none());
        assert_eq!(StatisticsCalculator::average_distance(&[]), 0.0);
        assert!(StatisticsCalculator::longest_run(&[]).is_none());
    }

    #[test]
    fn test_basic_statistics() {
        let runs = vec![run("a", 1, 1, 4.0), run("b", 1, 2, 6.0), run("c", 1, 3, 8.0)];
        let stats = StatisticsCalculator::summarize(&runs);

        assert_eq!(stats.total_runs, 3);
        assert!((stats.total_distance - 18.0).abs() < f64::EPSILON);
        assert!((stats.average_distance - 6.0).abs() < f64::EPSILON);
        assert_eq!(stats.longest_run.as_ref().unwrap().distance, 8.0);
        assert_eq!(stats.shortest_run.as_ref().unwrap().distance, 4.0);
        assert_eq!(stats.first_run_date, Some(ts(1, 1, 8)));
        assert_eq!(stats.last_run_date, Some(ts(1, 3, 8)));
    }

    #[test]
    fn test_extrema_ties_pick_first_occurrence() {
        let runs = vec![
            run("short-1", 1, 1, 2.0),
            run("long-1", 1, 2, 9.0),
            run("long-2", 1, 3, 9.0),
            run("short-2", 1, 4, 2.0),
        ];

        assert_eq!(
            StatisticsCalculator::longest_run(&runs).unwrap().id.as_str(),
            "long-1"
        );
        assert_eq!(
            StatisticsCalculator::shortest_run(&runs).unwrap().id.as_str(),
            "short-1"
        );

        let stats = StatisticsCalculator::summarize(&runs);
        assert_eq!(stats.longest_run.unwrap().id.as_str(), "long-1");
        assert_eq!(stats.shortest_run.unwrap().id.as_str(), "short-1");
    }

    #[test]
    fn test_runs_in_date_range_is_inclusive() {
        let runs = vec![run("a", 1, 1, 1.0), run("b", 1, 5, 2.0), run("c", 1, 9, 3.0)];

        let inside = StatisticsCalculator::runs_in_date_range(&runs, ts(1, 1, 8), ts(1, 5, 8));
        let ids: Vec<&str> = inside.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let none = StatisticsCalculator::runs_in_date_range(&runs, ts(1, 2, 0), ts(1, 4, 0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_year_to_date_distance() {
        let mut last_year = run("old", 12, 31, 50.0);
        last_year.date = ISOTimestamp::new(Utc.with_ymd_and_hms(2023, 12, 31, 8, 0, 0).unwrap());
        let runs = vec![
            last_year,
            run("a", 1, 10, 5.0),
            run("b", 3, 1, 7.0),
            run("future", 6, 1, 9.0),
        ];

        let calendar = CalendarConfig::utc(FirstDayOfWeek::Sunday);
        let today = DailyDate::from_ymd(2024, 3, 1).unwrap();
        let ytd = StatisticsCalculator::year_to_date_distance(&runs, today, &calendar);

        assert!((ytd - 12.0).abs() < f64::EPSILON);
    }
}
