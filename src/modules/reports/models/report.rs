use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::reports::models::{
    BookingSummary, MethodRevenue, Period, PeriodBucket, ReportFilters, RevenueOverview,
};
use crate::modules::reservations::{Reservation, ReservationStatus};

/// Reservation with at least one paid payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidReservation {
    pub reservation_id: i64,
    pub user_id: i64,
    pub package_id: i64,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub status: ReservationStatus,
    pub payment_status: String,
    pub total_amount: Decimal,
    /// Sum of the paid payments counted for this reservation
    pub amount_paid: Decimal,
    pub payment_count: i64,
    pub last_paid_at: DateTime<Utc>,
}

/// Live admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub summary: BookingSummary,
    pub revenue: RevenueOverview,
    /// Newest reservations of any status
    pub recent_reservations: Vec<Reservation>,
    /// Most recently paid reservations
    pub recent_paid_reservations: Vec<PaidReservation>,
    pub filters: ReportFilters,
}

/// Bookings and revenue for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    /// "YYYY-MM"
    pub period: String,
    pub total_bookings: i64,
    pub total_revenue: Decimal,
    pub by_status: BTreeMap<String, i64>,
    pub by_payment_status: BTreeMap<String, i64>,
    pub reservations: Vec<Reservation>,
}

/// Revenue series for charting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueChart {
    pub period: Period,
    pub data: Vec<PeriodBucket>,
    pub filters: ReportFilters,
}

/// Total revenue for a range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueTotal {
    pub total: Decimal,
    pub filters: ReportFilters,
}

/// Revenue grouped by payment method for a range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodBreakdown {
    pub data: Vec<MethodRevenue>,
    pub filters: ReportFilters,
}

/// Dashboard plus the full paid-reservation listing, for printing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintableReport {
    #[serde(flatten)]
    pub dashboard: Dashboard,
    pub paid_reservations: Vec<PaidReservation>,
    pub generated_at: DateTime<Utc>,
}

impl PrintableReport {
    /// Sum of paid amounts across the full listing
    pub fn total_paid(&self) -> Decimal {
        self.paid_reservations.iter().map(|r| r.amount_paid).sum()
    }
}
