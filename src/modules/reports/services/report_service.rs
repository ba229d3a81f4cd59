use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::core::{AppError, DateRange, Result};
use crate::modules::payments::Payment;
use crate::modules::reports::models::{
    AggregationQuery, BookingSummary, Dashboard, MethodRevenue, MonthlyReport, PaidReservation,
    Period, PeriodBucket, PeriodBucketer, PrintableReport, ReportFilters, RevenueChart,
    RevenueOverview,
};
use crate::modules::reports::repositories::ReportRepository;
use crate::modules::reports::services::{BookingAggregator, RevenueAggregator};

/// Newest reservations shown on the dashboard
pub const RECENT_RESERVATIONS_LIMIT: usize = 5;

/// Most recently paid reservations shown on the dashboard
pub const RECENT_PAID_RESERVATIONS_LIMIT: usize = 10;

/// Assembles report views from the revenue and booking aggregators.
///
/// Nothing is cached: every call reads the live store.
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    revenue: RevenueAggregator,
    bookings: BookingAggregator,
}

impl ReportService {
    /// Create a new report service
    pub fn new(repository: Arc<dyn ReportRepository>, bucketer: PeriodBucketer) -> Self {
        Self {
            repository,
            revenue: RevenueAggregator::new(bucketer),
            bookings: BookingAggregator::new(),
        }
    }

    /// Connectivity check passthrough for readiness probes
    pub async fn ping(&self) -> Result<()> {
        self.repository.ping().await
    }

    pub async fn total_revenue(&self, range: DateRange) -> Result<Decimal> {
        let payments = self.repository.find_paid_payments(range).await?;
        Ok(self.revenue.total_revenue(&payments, range))
    }

    pub async fn revenue_by_period(
        &self,
        period: Period,
        range: DateRange,
    ) -> Result<Vec<PeriodBucket>> {
        let payments = self.repository.find_paid_payments(range).await?;
        Ok(self.revenue.revenue_by_period(&payments, period, range))
    }

    pub async fn revenue_by_method(&self, range: DateRange) -> Result<Vec<MethodRevenue>> {
        let payments = self.repository.find_paid_payments(range).await?;
        Ok(self.revenue.revenue_by_method(&payments, range))
    }

    pub async fn booking_summary(&self, range: DateRange) -> Result<BookingSummary> {
        let reservations = self.repository.find_reservations(range).await?;
        Ok(self.bookings.summary(&reservations, range))
    }

    /// Live dashboard for the query's range and period
    pub async fn dashboard(
        &self,
        query: &AggregationQuery,
        filters: ReportFilters,
    ) -> Result<Dashboard> {
        let range = query.range();
        if range.is_inverted() {
            debug!(?range, "Dashboard requested for an empty date range");
        }

        let payments = self.repository.find_paid_payments(range).await?;
        let (dashboard, _) = self.assemble_dashboard(query, &payments, filters).await?;

        info!(
            total_bookings = dashboard.summary.total,
            total_revenue = %dashboard.revenue.total,
            period = %query.period(),
            "Dashboard generated"
        );

        Ok(dashboard)
    }

    /// Revenue series for charting
    pub async fn revenue_chart(
        &self,
        query: &AggregationQuery,
        filters: ReportFilters,
    ) -> Result<RevenueChart> {
        let data = self.revenue_by_period(query.period(), query.range()).await?;

        Ok(RevenueChart {
            period: query.period(),
            data,
            filters,
        })
    }

    /// Bookings and revenue for a single calendar month
    ///
    /// # Errors
    /// Returns `Validation("Invalid year or month")` for a month outside
    /// 1..=12 or a year outside 1..=9999
    pub async fn monthly_report(&self, year: i32, month: u32) -> Result<MonthlyReport> {
        let range = month_range(year, month)?;

        let reservations = self.repository.find_reservations(range).await?;
        let payments = self.repository.find_paid_payments(range).await?;

        let summary = self.bookings.summary(&reservations, range);
        let total_revenue = self.revenue.total_revenue(&payments, range);

        let reservations: Vec<_> = reservations
            .into_iter()
            .filter(|r| range.contains(r.event_date))
            .collect();

        info!(
            year,
            month,
            total_bookings = summary.total,
            total_revenue = %total_revenue,
            "Monthly report generated"
        );

        Ok(MonthlyReport {
            year,
            month,
            period: format!("{:04}-{:02}", year, month),
            total_bookings: summary.total,
            total_revenue,
            by_status: summary.by_status,
            by_payment_status: summary.by_payment_status,
            reservations,
        })
    }

    /// Dashboard plus the complete paid-reservation listing
    pub async fn printable_report(
        &self,
        query: &AggregationQuery,
        filters: ReportFilters,
    ) -> Result<PrintableReport> {
        let payments = self.repository.find_paid_payments(query.range()).await?;
        let (dashboard, paid_reservations) =
            self.assemble_dashboard(query, &payments, filters).await?;

        if paid_reservations.is_empty() {
            warn!(range = ?query.range(), "Printable report has no paid reservations");
        }

        Ok(PrintableReport {
            dashboard,
            paid_reservations,
            generated_at: Utc::now(),
        })
    }

    /// Builds the dashboard and returns the full paid listing alongside it
    async fn assemble_dashboard(
        &self,
        query: &AggregationQuery,
        payments: &[Payment],
        filters: ReportFilters,
    ) -> Result<(Dashboard, Vec<PaidReservation>)> {
        let range = query.range();

        let summary = self.booking_summary(range).await?;
        let recent_reservations = self
            .repository
            .find_recent_reservations(RECENT_RESERVATIONS_LIMIT)
            .await?;
        let paid_reservations = self.paid_reservations(payments, range).await?;

        let revenue = RevenueOverview {
            total: self.revenue.total_revenue(payments, range),
            by_method: self.revenue.revenue_by_method(payments, range),
            by_period: self.revenue.revenue_by_period(payments, query.period(), range),
        };

        let dashboard = Dashboard {
            summary,
            revenue,
            recent_reservations,
            recent_paid_reservations: paid_reservations
                .iter()
                .take(RECENT_PAID_RESERVATIONS_LIMIT)
                .cloned()
                .collect(),
            filters,
        };

        Ok((dashboard, paid_reservations))
    }

    async fn paid_reservations(
        &self,
        payments: &[Payment],
        range: DateRange,
    ) -> Result<Vec<PaidReservation>> {
        let ids: Vec<i64> = payments
            .iter()
            .filter(|p| p.is_paid())
            .map(|p| p.reservation_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let reservations = self.repository.find_reservations_by_ids(&ids).await?;
        Ok(self.revenue.paid_reservations(payments, &reservations, range))
    }
}

/// Validate raw year/month parameters, defaulting each to the current UTC month
pub fn parse_year_month(year: Option<&str>, month: Option<&str>) -> Result<(i32, u32)> {
    let today = Utc::now().date_naive();
    let invalid = || AppError::validation("Invalid year or month");

    let year = match year.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse::<i32>().map_err(|_| invalid())?,
        None => today.year(),
    };
    let month = match month.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse::<u32>().map_err(|_| invalid())?,
        None => today.month(),
    };

    month_range(year, month)?;
    Ok((year, month))
}

/// Inclusive first..last day range of a calendar month
fn month_range(year: i32, month: u32) -> Result<DateRange> {
    if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
        return Err(AppError::validation("Invalid year or month"));
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation("Invalid year or month"))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| AppError::internal(format!("No month end for {}-{:02}", year, month)))?;

    Ok(DateRange::between(first, last))
}
