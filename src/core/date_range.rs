use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::core::{AppError, Result};

/// Inclusive calendar-date range with independently optional bounds.
///
/// A range whose start is after its end is valid and matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Range with no bounds, matching every date
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Both bounds set to the same inclusive range
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Parse optional `start_date` / `end_date` request parameters
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        Ok(Self {
            start: parse_date_param("start_date", start)?,
            end: parse_date_param("end_date", end)?,
        })
    }

    /// Whether `date` falls inside the range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    /// True when the bounds cannot be satisfied by any date
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (truncated to its date).
/// Empty strings are treated as absent.
fn parse_date_param(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|ts| Some(ts.date_naive()))
        .map_err(|_| {
            AppError::validation(format!(
                "Invalid {} format: '{}'. Expected YYYY-MM-DD",
                name, raw
            ))
        })
}
