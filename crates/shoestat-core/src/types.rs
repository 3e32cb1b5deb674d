//! Core domain types for shoestat
//!
//! This module contains the fundamental types used throughout the shoestat library.
//! These types provide strong typing for run and shoe identifiers, timestamps,
//! calendar dates, and the two user preferences the aggregation engine consumes
//! (first day of the week and sort order).

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strongly-typed run identifier
///
/// # Examples
/// ```
/// use shoestat_core::types::RunId;
///
/// let id = RunId::new("run-42");
/// assert_eq!(id.as_str(), "run-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Create a new RunId from any string-like type
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly-typed shoe identifier
///
/// Every run record points at the shoe it was logged against. The aggregation
/// engine never interprets this value; it is carried through so callers can
/// group or filter by shoe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShoeId(String);

impl ShoeId {
    /// Create a new ShoeId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShoeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ShoeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// UTC instant at which a run was logged
///
/// Serializes as an RFC 3339 string.
///
/// # Examples
/// ```
/// use shoestat_core::types::ISOTimestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = ISOTimestamp::new(Utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap());
/// assert_eq!(ts.to_local_date(&chrono_tz::Tz::UTC).format("%Y-%m-%d"), "2024-01-15");
/// assert_eq!(ts.to_local_date(&chrono_tz::Asia::Tokyo).format("%Y-%m-%d"), "2024-01-16");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ISOTimestamp(DateTime<Utc>);

impl ISOTimestamp {
    /// Create a new ISOTimestamp
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the inner DateTime
    pub fn inner(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Calendar date of this instant as seen on a wall clock in `tz`
    pub fn to_local_date(&self, tz: &Tz) -> DailyDate {
        DailyDate::new(self.0.with_timezone(tz).date_naive())
    }
}

impl From<DateTime<Utc>> for ISOTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

/// A local calendar date
///
/// Bucket boundaries are expressed as `DailyDate`s: a boundary is the local
/// midnight that starts the given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DailyDate(NaiveDate);

impl DailyDate {
    /// Create a new DailyDate
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Create from year, month and day, returning `None` for impossible dates
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Get the inner NaiveDate
    pub fn inner(&self) -> &NaiveDate {
        &self.0
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Calendar month, 1-based
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Format with a chrono format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }
}

impl fmt::Display for DailyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A single logged run
///
/// Owned by whatever persistence layer produced it; the aggregation engine
/// only reads these. Several runs may share the same date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique run identifier
    pub id: RunId,
    /// Shoe the run was logged against
    pub shoe_id: ShoeId,
    /// When the run happened
    pub date: ISOTimestamp,
    /// Distance covered, non-negative
    pub distance: f64,
}

impl RunRecord {
    /// Create a new run record
    pub fn new(id: RunId, shoe_id: ShoeId, date: ISOTimestamp, distance: f64) -> Self {
        Self {
            id,
            shoe_id,
            date,
            distance,
        }
    }
}

/// First day of the week used for weekly bucketing
///
/// # Examples
/// ```
/// use shoestat_core::types::FirstDayOfWeek;
/// use std::str::FromStr;
///
/// assert_eq!(FirstDayOfWeek::from_str("Mon").unwrap(), FirstDayOfWeek::Monday);
/// assert_eq!(FirstDayOfWeek::resolve(None), FirstDayOfWeek::Sunday);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstDayOfWeek {
    /// Weeks run Sunday through Saturday
    #[default]
    Sunday,
    /// Weeks run Monday through Sunday
    Monday,
}

impl FirstDayOfWeek {
    /// Effective setting when the preference may be missing
    pub fn resolve(setting: Option<Self>) -> Self {
        setting.unwrap_or_default()
    }

    /// The chrono weekday this setting anchors weeks to
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

impl fmt::Display for FirstDayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunday => write!(f, "sunday"),
            Self::Monday => write!(f, "monday"),
        }
    }
}

impl std::str::FromStr for FirstDayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            _ => Err(format!(
                "Invalid first day of week: {s} (expected 'sunday' or 'monday')"
            )),
        }
    }
}

/// Direction in which runs and buckets are walked and returned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Ascending,
    /// Most recent first
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("Invalid sort order: {s}")),
        }
    }
}
