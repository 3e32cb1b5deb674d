//! Calendar bucketing
//!
//! Pure date arithmetic for week and month boundaries, plus the calendar
//! configuration (time zone and first day of the week) that decides which
//! local date a run falls on.
//!
//! # Examples
//!
//! ```
//! use shoestat_core::calendar::start_of_week;
//! use shoestat_core::types::{DailyDate, FirstDayOfWeek};
//!
//! // Wednesday 2024-01-03
//! let wed = DailyDate::from_ymd(2024, 1, 3).unwrap();
//! assert_eq!(start_of_week(wed, FirstDayOfWeek::Monday).to_string(), "2024-01-01");
//! assert_eq!(start_of_week(wed, FirstDayOfWeek::Sunday).to_string(), "2023-12-31");
//! ```

use crate::types::{DailyDate, FirstDayOfWeek, ISOTimestamp};
use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Start of the week containing `date`
///
/// Returns the most recent occurrence of the configured first weekday at or
/// before `date`. The result is a calendar date, so it denotes that day's
/// midnight.
pub fn start_of_week(date: DailyDate, first_day_of_week: FirstDayOfWeek) -> DailyDate {
    let day = date.inner();
    let days_back = match first_day_of_week {
        FirstDayOfWeek::Sunday => day.weekday().num_days_from_sunday(),
        FirstDayOfWeek::Monday => day.weekday().num_days_from_monday(),
    };

    DailyDate::new(
        day.checked_sub_days(Days::new(u64::from(days_back)))
            .unwrap_or(NaiveDate::MIN),
    )
}

/// First day of the month containing `date`
pub fn start_of_month(date: DailyDate) -> DailyDate {
    let day = date.inner();
    DailyDate::new(NaiveDate::from_ymd_opt(day.year(), day.month(), 1).unwrap_or(*day))
}

/// Calendar configuration used for bucketing
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// The timezone whose wall clock decides a run's calendar date
    pub tz: Tz,
    /// Whether the timezone is UTC
    pub is_utc: bool,
    /// Anchor weekday for weekly buckets
    pub first_day_of_week: FirstDayOfWeek,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        let tz = get_local_timezone();
        Self {
            is_utc: tz == Tz::UTC,
            tz,
            first_day_of_week: FirstDayOfWeek::default(),
        }
    }
}

impl CalendarConfig {
    /// UTC calendar with the given week anchor
    pub fn utc(first_day_of_week: FirstDayOfWeek) -> Self {
        Self {
            tz: Tz::UTC,
            is_utc: true,
            first_day_of_week,
        }
    }

    /// Calendar in an explicit timezone
    pub fn with_timezone(tz: Tz, first_day_of_week: FirstDayOfWeek) -> Self {
        Self {
            is_utc: tz == Tz::UTC,
            tz,
            first_day_of_week,
        }
    }

    /// Create a calendar configuration from CLI arguments
    ///
    /// `--utc` wins over `--timezone`; with neither, the system timezone is used.
    /// A missing week preference resolves to Sunday.
    pub fn from_cli(
        timezone_str: Option<&str>,
        use_utc: bool,
        first_day_of_week: Option<FirstDayOfWeek>,
    ) -> crate::error::Result<Self> {
        let first_day_of_week = FirstDayOfWeek::resolve(first_day_of_week);

        if use_utc {
            return Ok(Self::utc(first_day_of_week));
        }

        match timezone_str {
            Some(tz_str) => {
                let tz = Tz::from_str(tz_str).map_err(|_| {
                    crate::error::ShoestatError::InvalidTimezone(format!(
                        "'{tz_str}'. Use format like 'America/New_York', 'Europe/Berlin', or 'UTC'"
                    ))
                })?;
                Ok(Self::with_timezone(tz, first_day_of_week))
            }
            None => Ok(Self {
                first_day_of_week,
                ..Self::default()
            }),
        }
    }

    /// Get the display name for the configured timezone
    pub fn display_name(&self) -> &str {
        if self.is_utc { "UTC" } else { self.tz.name() }
    }

    /// Local calendar date of a timestamp
    pub fn local_date(&self, ts: &ISOTimestamp) -> DailyDate {
        ts.to_local_date(&self.tz)
    }

    /// Week bucket a timestamp belongs to
    pub fn week_start_for(&self, ts: &ISOTimestamp) -> DailyDate {
        start_of_week(self.local_date(ts), self.first_day_of_week)
    }

    /// Month bucket a timestamp belongs to
    pub fn month_start_for(&self, ts: &ISOTimestamp) -> DailyDate {
        start_of_month(self.local_date(ts))
    }

    /// Today's local date for a given instant
    pub fn today(&self, now: DateTime<Utc>) -> DailyDate {
        ISOTimestamp::new(now).to_local_date(&self.tz)
    }

    /// The UTC instant at which a bucket boundary begins
    ///
    /// This is local midnight of `boundary`. Where a DST transition skips
    /// midnight, the first existing local time of that day is used.
    pub fn start_of_week_instant(&self, boundary: DailyDate) -> DateTime<Utc> {
        let midnight = boundary.inner().and_time(NaiveTime::MIN);

        (0..=3)
            .filter_map(|hours| {
                self.tz
                    .from_local_datetime(&(midnight + Duration::hours(hours)))
                    .earliest()
            })
            .next()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| midnight.and_utc())
    }
}

/// Detect the system's local timezone
///
/// Checks the `TZ` environment variable first, then asks the operating system.
/// Falls back to UTC when neither yields a known zone.
pub fn get_local_timezone() -> Tz {
    #[allow(clippy::collapsible_if)]
    if let Ok(tz_str) = std::env::var("TZ") {
        if let Ok(tz) = Tz::from_str(&tz_str) {
            debug!("Using timezone from TZ environment variable: {}", tz_str);
            return tz;
        }
    }

    match iana_time_zone::get_timezone() {
        Ok(tz_str) => match Tz::from_str(&tz_str) {
            Ok(tz) => {
                debug!("Using system timezone from iana-time-zone: {}", tz_str);
                tz
            }
            Err(_) => {
                debug!(
                    "Could not parse timezone from iana-time-zone: '{}', falling back to UTC",
                    tz_str
                );
                Tz::UTC
            }
        },
        Err(e) => {
            debug!(
                "Could not detect local timezone via iana-time-zone: {:?}, falling back to UTC",
                e
            );
            Tz::UTC
        }
    }
}
