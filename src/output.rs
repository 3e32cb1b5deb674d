//! Output formatting module for shoestat
//!
//! Renders aggregation results for the terminal:
//! - Table format for human-readable output
//! - JSON format for scripts and other tools
//!
//! Distances are printed as they were logged, with two decimals. No unit
//! conversion happens here.
//!
//! # Examples
//!
//! ```
//! use shoestat::output::get_formatter;
//! use shoestat::aggregation_types::{Totals, WeeklyBucket};
//! use shoestat::types::DailyDate;
//! use chrono_tz::Tz;
//!
//! let weeks = vec![WeeklyBucket {
//!     week_start: DailyDate::from_ymd(2024, 1, 1).unwrap(),
//!     total_distance: 8.0,
//!     run_count: 2,
//! }];
//! let totals = Totals::from_weekly(&weeks);
//!
//! let table = get_formatter(false, Tz::UTC).format_weekly(&weeks, &totals);
//! assert!(table.contains("2024-01-01"));
//!
//! let json = get_formatter(true, Tz::UTC).format_weekly(&weeks, &totals);
//! assert!(json.contains("\"weekly\""));
//! ```

use crate::aggregation_types::{MonthlySection, RunStatistics, Totals, WeeklyBucket};
use crate::types::{RunRecord, ShoeId};
use chrono_tz::Tz;
use prettytable::{Cell, Row, Table, format, row};
use serde_json::json;
use std::collections::BTreeMap;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format weekly buckets with totals
    fn format_weekly(&self, data: &[WeeklyBucket], totals: &Totals) -> String;

    /// Format monthly sections with totals
    fn format_monthly(&self, data: &[MonthlySection], totals: &Totals) -> String;

    /// Format a statistics summary and the year-to-date distance
    fn format_statistics(&self, stats: &RunStatistics, year_to_date: f64) -> String;

    /// Format per-shoe totals
    fn format_shoes(&self, data: &BTreeMap<ShoeId, Totals>) -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Timezone used to print run dates
    pub tz: Tz,
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Format a distance with two decimals
    fn format_distance(distance: f64) -> String {
        format!("{distance:.2}")
    }

    /// Describe a run as "distance on local date"
    fn format_run(&self, run: Option<&RunRecord>) -> String {
        match run {
            Some(run) => format!(
                "{} on {} ({})",
                Self::format_distance(run.distance),
                run.date.to_local_date(&self.tz),
                run.id
            ),
            None => "-".to_string(),
        }
    }

    /// Create a totals row for tables
    fn format_totals_row(totals: &Totals) -> Row {
        row![
            b -> "TOTAL",
            b -> totals.run_count,
            b -> Self::format_distance(totals.total_distance)
        ]
    }
}

impl OutputFormatter for TableFormatter {
    fn format_weekly(&self, data: &[WeeklyBucket], totals: &Totals) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Week Of", b -> "Runs", b -> "Distance"]);

        for bucket in data {
            table.add_row(row![
                bucket.week_start.format("%Y-%m-%d"),
                c -> bucket.run_count,
                r -> Self::format_distance(bucket.total_distance)
            ]);
        }

        table.add_row(Row::new(vec![Cell::new(""); 3]));
        table.add_row(Self::format_totals_row(totals));

        table.to_string()
    }

    fn format_monthly(&self, data: &[MonthlySection], totals: &Totals) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Month", b -> "Runs", b -> "Distance"]);

        for section in data {
            table.add_row(row![
                section.month_date().format("%Y-%m"),
                c -> section.runs().len(),
                r -> Self::format_distance(section.run_total())
            ]);

            if let Some(yearly_total) = section.yearly_total() {
                table.add_row(row![
                    b -> format!("Total for {}", section.year()),
                    "",
                    br -> Self::format_distance(yearly_total)
                ]);
            }
        }

        table.add_row(Row::new(vec![Cell::new(""); 3]));
        table.add_row(Self::format_totals_row(totals));

        table.to_string()
    }

    fn format_statistics(&self, stats: &RunStatistics, year_to_date: f64) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Statistic", b -> "Value"]);

        table.add_row(row!["Runs", r -> stats.total_runs]);
        table.add_row(row![
            "Total distance",
            r -> Self::format_distance(stats.total_distance)
        ]);
        table.add_row(row![
            "Average distance",
            r -> Self::format_distance(stats.average_distance)
        ]);
        table.add_row(row![
            "Longest run",
            r -> self.format_run(stats.longest_run.as_ref())
        ]);
        table.add_row(row![
            "Shortest run",
            r -> self.format_run(stats.shortest_run.as_ref())
        ]);
        table.add_row(row![
            "Year to date",
            r -> Self::format_distance(year_to_date)
        ]);

        table.to_string()
    }

    fn format_shoes(&self, data: &BTreeMap<ShoeId, Totals>) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Shoe", b -> "Runs", b -> "Distance"]);

        let mut overall = Totals::default();
        for (shoe_id, totals) in data {
            table.add_row(row![
                shoe_id.as_str(),
                c -> totals.run_count,
                r -> Self::format_distance(totals.total_distance)
            ]);
            overall.run_count += totals.run_count;
            overall.total_distance += totals.total_distance;
        }

        table.add_row(Row::new(vec![Cell::new(""); 3]));
        table.add_row(Self::format_totals_row(&overall));

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: serde_json::Value) -> String {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_weekly(&self, data: &[WeeklyBucket], totals: &Totals) -> String {
        Self::render(json!({
            "weekly": data.iter().map(|w| json!({
                "week_start": w.week_start.format("%Y-%m-%d"),
                "total_distance": w.total_distance,
                "run_count": w.run_count,
            })).collect::<Vec<_>>(),
            "totals": totals,
        }))
    }

    fn format_monthly(&self, data: &[MonthlySection], totals: &Totals) -> String {
        Self::render(json!({
            "monthly": data.iter().map(|m| {
                let mut month_json = json!({
                    "month": m.month_date().format("%Y-%m"),
                    "run_total": m.run_total(),
                    "runs": m.runs(),
                });
                if let Some(yearly_total) = m.yearly_total() {
                    month_json["yearly_total"] = json!(yearly_total);
                }
                month_json
            }).collect::<Vec<_>>(),
            "totals": totals,
        }))
    }

    fn format_statistics(&self, stats: &RunStatistics, year_to_date: f64) -> String {
        Self::render(json!({
            "statistics": stats,
            "year_to_date_distance": year_to_date,
        }))
    }

    fn format_shoes(&self, data: &BTreeMap<ShoeId, Totals>) -> String {
        Self::render(json!({
            "shoes": data.iter().map(|(shoe_id, totals)| json!({
                "shoe_id": shoe_id,
                "run_count": totals.run_count,
                "total_distance": totals.total_distance,
            })).collect::<Vec<_>>(),
        }))
    }
}

/// Get appropriate formatter based on JSON flag
///
/// Tables print run dates in `tz`; JSON keeps full UTC timestamps.
pub fn get_formatter(json: bool, tz: Tz) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(tz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DailyDate, ISOTimestamp, RunId};
    use chrono::{TimeZone, Utc};

    fn run(id: &str, year: i32, month: u32, day: u32, distance: f64) -> RunRecord {
        RunRecord::new(
            RunId::new(id),
            ShoeId::new("pegasus"),
            ISOTimestamp::new(Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()),
            distance,
        )
    }

    fn sections() -> Vec<MonthlySection> {
        vec![
            MonthlySection::from_runs(
                DailyDate::from_ymd(2023, 1, 4).unwrap(),
                vec![run("b", 2023, 1, 4, 6.25)],
            ),
            MonthlySection::from_runs(
                DailyDate::from_ymd(2022, 12, 2).unwrap(),
                vec![run("a", 2022, 12, 2, 10.0)],
            )
            .with_yearly_total(42.5),
        ]
    }

    #[test]
    fn test_distance_formatting() {
        assert_eq!(TableFormatter::format_distance(12.345), "12.35");
        assert_eq!(TableFormatter::format_distance(0.0), "0.00");
        assert_eq!(TableFormatter::new(Tz::UTC).format_run(None), "-");
    }

    #[test]
    fn test_table_formatter_weekly() {
        let weeks = vec![
            WeeklyBucket {
                week_start: DailyDate::from_ymd(2024, 1, 1).unwrap(),
                total_distance: 5.0,
                run_count: 1,
            },
            WeeklyBucket::empty(DailyDate::from_ymd(2024, 1, 8).unwrap()),
        ];
        let formatter = TableFormatter::new(Tz::UTC);
        let output = formatter.format_weekly(&weeks, &Totals::from_weekly(&weeks));

        assert!(output.contains("2024-01-01"));
        assert!(output.contains("2024-01-08"));
        assert!(output.contains("0.00"));
        assert!(output.contains("TOTAL"));
    }

    #[test]
    fn test_table_formatter_monthly_shows_year_total_row() {
        let data = sections();
        let formatter = TableFormatter::new(Tz::UTC);
        let output = formatter.format_monthly(&data, &Totals::from_monthly(&data));

        assert!(output.contains("2023-01"));
        assert!(output.contains("2022-12"));
        assert!(output.contains("Total for 2022"));
        assert!(output.contains("42.50"));
        assert!(output.contains("16.25"));
    }

    #[test]
    fn test_table_formatter_statistics() {
        let runs = vec![run("a", 2024, 1, 1, 4.0), run("b", 2024, 1, 2, 8.0)];
        let stats = crate::statistics::StatisticsCalculator::summarize(&runs);
        let output = TableFormatter::new(Tz::UTC).format_statistics(&stats, 12.0);

        assert!(output.contains("Average distance"));
        assert!(output.contains("6.00"));
        assert!(output.contains("8.00 on 2024-01-02 (b)"));
    }

    #[test]
    fn test_table_formatter_prints_local_run_dates() {
        let late_evening = RunRecord::new(
            RunId::new("late"),
            ShoeId::new("pegasus"),
            ISOTimestamp::new(Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap()),
            10.0,
        );
        let stats = crate::statistics::StatisticsCalculator::summarize(&[late_evening]);

        let utc = TableFormatter::new(Tz::UTC).format_statistics(&stats, 0.0);
        assert!(utc.contains("10.00 on 2024-01-01 (late)"));

        let new_york = get_formatter(false, Tz::America__New_York).format_statistics(&stats, 0.0);
        assert!(new_york.contains("10.00 on 2023-12-31 (late)"));
    }

    #[test]
    fn test_json_formatter_monthly() {
        let data = sections();
        let output = JsonFormatter.format_monthly(&data, &Totals::from_monthly(&data));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["monthly"][0]["month"], "2023-01");
        assert!(value["monthly"][0].get("yearly_total").is_none());
        assert_eq!(value["monthly"][1]["yearly_total"], 42.5);
        assert_eq!(value["monthly"][1]["runs"][0]["id"], "a");
        assert_eq!(value["totals"]["run_count"], 2);
    }

    #[test]
    fn test_json_formatter_statistics_empty() {
        let output = JsonFormatter.format_statistics(&RunStatistics::default(), 0.0);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["statistics"]["total_runs"], 0);
        assert!(value["statistics"]["longest_run"].is_null());
        assert_eq!(value["year_to_date_distance"], 0.0);
    }

    #[test]
    fn test_json_formatter_shoes() {
        let mut data = BTreeMap::new();
        data.insert(
            ShoeId::new("pegasus"),
            Totals {
                total_distance: 12.0,
                run_count: 3,
            },
        );
        let output = get_formatter(true, Tz::UTC).format_shoes(&data);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["shoes"][0]["shoe_id"], "pegasus");
        assert_eq!(value["shoes"][0]["run_count"], 3);
    }
}
