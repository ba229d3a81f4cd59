use serde::{Deserialize, Serialize};

use crate::core::{DateRange, Result};
use crate::modules::reports::models::Period;

/// Raw report filter parameters as received on the query string
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ReportFilters {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
}

/// Validated, immutable per-request aggregation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationQuery {
    range: DateRange,
    period: Period,
}

impl AggregationQuery {
    pub fn new(range: DateRange, period: Period) -> Self {
        Self { range, period }
    }

    /// Validate raw filters; a missing period means monthly
    pub fn from_filters(filters: &ReportFilters) -> Result<Self> {
        let range = DateRange::parse(filters.start_date.as_deref(), filters.end_date.as_deref())?;
        let period = Period::parse_or_default(filters.period.as_deref())?;
        Ok(Self { range, period })
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn period(&self) -> Period {
        self.period
    }
}
