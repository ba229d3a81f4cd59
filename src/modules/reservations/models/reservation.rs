use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Submitted, awaiting admin review
    Pending,
    Approved,
    Declined,
    /// Soft-deleted by an administrator
    Deleted,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Declined => "declined",
            ReservationStatus::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "approved" => Ok(ReservationStatus::Approved),
            "declined" => Ok(ReservationStatus::Declined),
            "deleted" => Ok(ReservationStatus::Deleted),
            other => Err(format!("Invalid reservation status: {}", other)),
        }
    }
}

/// Venue reservation as written by the booking workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub package_id: i64,
    /// Free-form event category (Wedding, Birthday, Corporate, ...)
    pub event_type: String,
    pub event_date: NaiveDate,
    pub status: ReservationStatus,
    /// Payment progress label maintained by the payment workflow
    pub payment_status: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}
