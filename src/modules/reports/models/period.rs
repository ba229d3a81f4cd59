//! Calendar period bucketing.
//!
//! Every key produced here sorts lexicographically in chronological order,
//! so buckets can be ordered by key alone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Aggregation granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Period {
    pub const VALID_VALUES: &'static str = "daily, weekly, monthly, yearly";

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }

    /// Parse an optional request parameter, defaulting to monthly
    pub fn parse_or_default(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse(),
            None => Ok(Period::default()),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            _ => Err(AppError::validation(format!(
                "Invalid period '{}'. Valid values: {}",
                s,
                Period::VALID_VALUES
            ))),
        }
    }
}

/// Week-of-year numbering used for weekly buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekRule {
    /// ISO 8601 weeks (Monday start, week 1 holds the first Thursday),
    /// keyed by ISO week-year
    #[default]
    Iso,
    /// Sunday-start weeks, days before the first Sunday are week 00
    Sunday,
    /// Monday-start weeks, days before the first Monday are week 00
    Monday,
}

impl WeekRule {
    /// (week-year, week number) for a date under this rule
    pub fn week_of(&self, date: NaiveDate) -> (i32, u32) {
        match self {
            WeekRule::Iso => {
                let iso = date.iso_week();
                (iso.year(), iso.week())
            }
            WeekRule::Sunday => {
                let offset = date.weekday().num_days_from_sunday();
                (date.year(), (date.ordinal0() + 7 - offset) / 7)
            }
            WeekRule::Monday => {
                let offset = date.weekday().num_days_from_monday();
                (date.year(), (date.ordinal0() + 7 - offset) / 7)
            }
        }
    }
}

impl std::str::FromStr for WeekRule {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "iso" => Ok(WeekRule::Iso),
            "sunday" => Ok(WeekRule::Sunday),
            "monday" => Ok(WeekRule::Monday),
            other => Err(AppError::Configuration(format!(
                "Invalid week rule '{}'. Valid values: iso, sunday, monday",
                other
            ))),
        }
    }
}

/// Bucket identity for one record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketLabel {
    pub key: String,
    pub year: i32,
    pub month: Option<u32>,
    pub week: Option<u32>,
    pub day: Option<u32>,
}

/// Maps dates and timestamps onto period buckets
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodBucketer {
    week_rule: WeekRule,
}

impl PeriodBucketer {
    pub fn new(week_rule: WeekRule) -> Self {
        Self { week_rule }
    }

    /// Bucket for a timestamp; time of day is ignored
    pub fn bucket(&self, period: Period, ts: DateTime<Utc>) -> BucketLabel {
        self.bucket_date(period, ts.date_naive())
    }

    pub fn bucket_date(&self, period: Period, date: NaiveDate) -> BucketLabel {
        match period {
            Period::Daily => BucketLabel {
                key: format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()),
                year: date.year(),
                month: Some(date.month()),
                week: None,
                day: Some(date.day()),
            },
            Period::Weekly => {
                let (year, week) = self.week_rule.week_of(date);
                BucketLabel {
                    key: format!("{:04}-W{:02}", year, week),
                    year,
                    month: None,
                    week: Some(week),
                    day: None,
                }
            }
            Period::Monthly => BucketLabel {
                key: format!("{:04}-{:02}", date.year(), date.month()),
                year: date.year(),
                month: Some(date.month()),
                week: None,
                day: None,
            },
            Period::Yearly => BucketLabel {
                key: format!("{:04}", date.year()),
                year: date.year(),
                month: None,
                week: None,
                day: None,
            },
        }
    }

    /// Canonical key only
    pub fn key(&self, period: Period, ts: DateTime<Utc>) -> String {
        self.bucket(period, ts).key
    }
}
