use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shoestat::{
    aggregation::Aggregator,
    calendar::CalendarConfig,
    statistics::StatisticsCalculator,
    types::{FirstDayOfWeek, ISOTimestamp, RunId, RunRecord, ShoeId, SortOrder},
};
use std::hint::black_box;

const SIZES: &[usize] = &[1_000, 10_000];

fn create_test_runs(count: usize) -> Vec<RunRecord> {
    let mut runs = Vec::with_capacity(count);
    let base_time = Utc.with_ymd_and_hms(2015, 1, 1, 6, 30, 0).unwrap();

    for i in 0..count {
        // Roughly every other day, with occasional multi-week breaks
        let days = (i * 2 + (i / 50) * 21) as i64;
        let timestamp = base_time + Duration::days(days) + Duration::minutes((i % 90) as i64);

        runs.push(RunRecord::new(
            RunId::new(format!("run-{i}")),
            ShoeId::new(format!("shoe-{}", i % 4)),
            ISOTimestamp::new(timestamp),
            3.0 + (i % 17) as f64 * 0.75,
        ));
    }

    // Snapshots arrive unordered
    runs.reverse();
    runs
}

fn benchmark_weekly_collation(c: &mut Criterion) {
    let mut group = c.benchmark_group("weekly_collation");
    group.sample_size(20);

    let aggregator = Aggregator::new(CalendarConfig::utc(FirstDayOfWeek::Monday));

    for &size in SIZES {
        let runs = create_test_runs(size);
        group.bench_with_input(BenchmarkId::new("ascending", size), &runs, |b, runs| {
            b.iter(|| aggregator.collate_weekly(black_box(runs), SortOrder::Ascending));
        });
        group.bench_with_input(BenchmarkId::new("descending", size), &runs, |b, runs| {
            b.iter(|| aggregator.collate_weekly(black_box(runs), SortOrder::Descending));
        });
    }

    group.finish();
}

fn benchmark_monthly_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("monthly_history");
    group.sample_size(20);

    let calendar =
        CalendarConfig::with_timezone(chrono_tz::Tz::Europe__Berlin, FirstDayOfWeek::Sunday);
    let aggregator = Aggregator::new(calendar);
    let today = aggregator.calendar().today(Utc::now());

    for &size in SIZES {
        let runs = create_test_runs(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &runs, |b, runs| {
            b.iter(|| aggregator.monthly_history(black_box(runs), SortOrder::Descending, today));
        });
    }

    group.finish();
}

fn benchmark_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for &size in SIZES {
        let runs = create_test_runs(size);
        group.bench_with_input(BenchmarkId::new("summarize", size), &runs, |b, runs| {
            b.iter(|| StatisticsCalculator::summarize(black_box(runs)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_weekly_collation,
    benchmark_monthly_history,
    benchmark_statistics
);
criterion_main!(benches);
