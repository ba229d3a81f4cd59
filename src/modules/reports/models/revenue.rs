use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::reports::models::BucketLabel;

/// Revenue collected in one calendar bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// Sortable bucket key (e.g. "2025-01", "2025-W03")
    pub period: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    pub revenue: Decimal,
    pub payment_count: i64,
}

impl PeriodBucket {
    pub fn empty(label: BucketLabel) -> Self {
        Self {
            period: label.key,
            year: label.year,
            month: label.month,
            week: label.week,
            day: label.day,
            revenue: Decimal::ZERO,
            payment_count: 0,
        }
    }
}

/// Revenue grouped by payment method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRevenue {
    pub payment_method: String,
    pub revenue: Decimal,
    pub payment_count: i64,
}

/// Revenue section of the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueOverview {
    pub total: Decimal,
    pub by_method: Vec<MethodRevenue>,
    pub by_period: Vec<PeriodBucket>,
}
