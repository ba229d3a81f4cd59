use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reservation count for one event type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeCount {
    pub event_type: String,
    pub count: i64,
}

/// Reservation count for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    /// "YYYY-MM"
    pub period: String,
    pub year: i32,
    pub month: u32,
    pub count: i64,
}

/// Reservation counts over a date range.
///
/// Status maps only contain values that were observed; absent statuses are
/// not zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub total: i64,
    pub by_status: BTreeMap<String, i64>,
    pub by_payment_status: BTreeMap<String, i64>,
    pub by_event_type: Vec<EventTypeCount>,
    /// Most recent months first
    pub by_month: Vec<MonthCount>,
    /// Percentage of approved reservations, one decimal place
    pub approval_rate: Decimal,
}

impl BookingSummary {
    pub fn status_count(&self, status: &str) -> i64 {
        self.by_status.get(status).copied().unwrap_or(0)
    }
}
