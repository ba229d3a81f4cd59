use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status
///
/// Only these two states are active in the booking workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Payment received and confirmed
    Paid,

    /// Payment submitted, awaiting confirmation
    InProgress,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::InProgress => write!(f, "InProgress"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "Paid" | "paid" => Ok(PaymentStatus::Paid),
            "InProgress" | "In Progress" | "in_progress" | "in progress" => {
                Ok(PaymentStatus::InProgress)
            }
            other => Err(format!("Invalid payment status: {}", other)),
        }
    }
}

/// Payment record for a reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub reservation_id: i64,
    pub amount: Decimal,
    pub currency: String,
    pub status: PaymentStatus,
    /// Payment method (cash, bank_transfer, gcash, ...)
    pub payment_method: String,
    /// Set when the payment is confirmed
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    /// Timestamp a paid payment counts toward.
    ///
    /// `None` for payments that are not paid. A paid row missing `paid_at`
    /// falls back to `created_at`.
    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        if self.is_paid() {
            Some(self.paid_at.unwrap_or(self.created_at))
        } else {
            None
        }
    }

    /// Calendar date a paid payment counts toward
    pub fn settled_on(&self) -> Option<NaiveDate> {
        self.settled_at().map(|ts| ts.date_naive())
    }
}
