//! shoestat - Mileage history for running shoes

use chrono::Datelike;
use clap::Parser;
use shoestat::{
    aggregation::Aggregator,
    aggregation_types::Totals,
    calendar::CalendarConfig,
    cli::{Cli, Command, parse_date_range},
    data_loader::DataLoader,
    error::Result,
    filters::{MonthFilter, RunFilter, ShoeSelection},
    output::get_formatter,
    statistics::StatisticsCalculator,
    types::{RunRecord, ShoeId},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shoe and timezone part of the run filter
fn shoe_filter(cli: &Cli, calendar: &CalendarConfig) -> RunFilter {
    RunFilter::new()
        .with_shoes(ShoeSelection::from_option(cli.shoe.clone().map(ShoeId::new)))
        .with_timezone(calendar.tz)
}

/// Full run filter including the --since/--until date range
fn build_run_filter(cli: &Cli, calendar: &CalendarConfig) -> Result<RunFilter> {
    let mut filter = shoe_filter(cli, calendar);
    let (since, until) = parse_date_range(cli.since.as_deref(), cli.until.as_deref())?;

    if let Some(since) = since {
        filter = filter.with_since(since);
    }
    if let Some(until) = until {
        filter = filter.with_until(until);
    }

    Ok(filter)
}

/// Month window for the monthly report
fn build_month_filter(cli: &Cli) -> Result<MonthFilter> {
    let mut filter = MonthFilter::new();
    let (since, until) = parse_date_range(cli.since.as_deref(), cli.until.as_deref())?;

    if let Some(since) = since {
        filter = filter.with_since(since.year(), since.month());
    }
    if let Some(until) = until {
        filter = filter.with_until(until.year(), until.month());
    }

    Ok(filter)
}

fn select_runs(filter: &RunFilter, all_runs: &[RunRecord]) -> Vec<RunRecord> {
    let runs = filter.apply(all_runs);
    if runs.is_empty() && !all_runs.is_empty() {
        warn!("No runs matched the given filters");
    }
    info!("Aggregating {} of {} runs", runs.len(), all_runs.len());
    runs
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose overrides RUST_LOG
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("shoestat=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let calendar = CalendarConfig::from_cli(cli.timezone.as_deref(), cli.utc, cli.week_start)?;
    info!(
        "Using timezone {} with weeks starting {}",
        calendar.display_name(),
        calendar.first_day_of_week
    );

    let loader = DataLoader::new(cli.file.clone())?;
    let all_runs = loader.load_runs().await?;

    let today = calendar.today(chrono::Utc::now());
    let aggregator = Aggregator::new(calendar.clone());
    let formatter = get_formatter(cli.json, calendar.tz);

    match cli.command.clone().unwrap_or(Command::Stats) {
        Command::Weekly => {
            info!("Running weekly report");
            let runs = select_runs(&build_run_filter(&cli, &calendar)?, &all_runs);
            let weekly = aggregator.collate_weekly(&runs, cli.order);
            let totals = Totals::from_weekly(&weekly);
            println!("{}", formatter.format_weekly(&weekly, &totals));
        }
        Command::Monthly => {
            info!("Running monthly report");
            // Year totals cover the whole history; the date range only picks sections
            let runs = select_runs(&shoe_filter(&cli, &calendar), &all_runs);
            let mut monthly = aggregator.monthly_history(&runs, cli.order, today);
            build_month_filter(&cli)?.retain_sections(&mut monthly);
            let totals = Totals::from_monthly(&monthly);
            println!("{}", formatter.format_monthly(&monthly, &totals));
        }
        Command::Stats => {
            info!("Running statistics report");
            let runs = select_runs(&build_run_filter(&cli, &calendar)?, &all_runs);
            let stats = StatisticsCalculator::summarize(&runs);
            let year_to_date = StatisticsCalculator::year_to_date_distance(&runs, today, &calendar);
            println!("{}", formatter.format_statistics(&stats, year_to_date));
        }
        Command::Shoes => {
            info!("Running per-shoe report");
            let runs = select_runs(&build_run_filter(&cli, &calendar)?, &all_runs);
            let by_shoe = Aggregator::totals_by_shoe(&runs);
            println!("{}", formatter.format_shoes(&by_shoe));
        }
    }

    Ok(())
}
