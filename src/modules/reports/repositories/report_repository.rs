// Read-side storage seam for reporting.
//
// Queries only narrow the row set; every grouping and bucketing step runs in
// the aggregation services so no dialect-specific SQL is needed.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::{AppError, DateRange, Result};
use crate::modules::payments::{Payment, PaymentStatus};
use crate::modules::reservations::{Reservation, ReservationStatus};

/// Repository for reporting reads
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Paid payments whose paid date falls in `range`
    async fn find_paid_payments(&self, range: DateRange) -> Result<Vec<Payment>>;

    /// Reservations whose event date falls in `range`
    async fn find_reservations(&self, range: DateRange) -> Result<Vec<Reservation>>;

    /// Reservations by id; unknown ids are skipped
    async fn find_reservations_by_ids(&self, ids: &[i64]) -> Result<Vec<Reservation>>;

    /// Newest reservations by creation time
    async fn find_recent_reservations(&self, limit: usize) -> Result<Vec<Reservation>>;

    /// Connectivity check for readiness probes
    async fn ping(&self) -> Result<()>;
}

pub struct MySqlReportRepository {
    pool: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const PAYMENT_COLUMNS: &str = "SELECT id, reservation_id, amount, currency, status, \
     payment_method, paid_at, created_at FROM payments";

const RESERVATION_COLUMNS: &str = "SELECT id, user_id, package_id, event_type, event_date, \
     status, payment_status, total_amount, created_at FROM reservations";

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn find_paid_payments(&self, range: DateRange) -> Result<Vec<Payment>> {
        let mut query = QueryBuilder::<MySql>::new(PAYMENT_COLUMNS);
        query.push(" WHERE status = 'Paid'");

        if let Some(start) = range.start {
            query
                .push(" AND DATE(COALESCE(paid_at, created_at)) >= ")
                .push_bind(start);
        }
        if let Some(end) = range.end {
            query
                .push(" AND DATE(COALESCE(paid_at, created_at)) <= ")
                .push_bind(end);
        }
        query.push(" ORDER BY COALESCE(paid_at, created_at), id");

        let rows = query
            .build_query_as::<PaymentRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn find_reservations(&self, range: DateRange) -> Result<Vec<Reservation>> {
        let mut query = QueryBuilder::<MySql>::new(RESERVATION_COLUMNS);
        query.push(" WHERE 1 = 1");

        if let Some(start) = range.start {
            query.push(" AND event_date >= ").push_bind(start);
        }
        if let Some(end) = range.end {
            query.push(" AND event_date <= ").push_bind(end);
        }
        query.push(" ORDER BY event_date, id");

        let rows = query
            .build_query_as::<ReservationRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_reservations_by_ids(&self, ids: &[i64]) -> Result<Vec<Reservation>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut query = QueryBuilder::<MySql>::new(RESERVATION_COLUMNS);
        query.push(" WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows = query
            .build_query_as::<ReservationRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_recent_reservations(&self, limit: usize) -> Result<Vec<Reservation>> {
        let mut query = QueryBuilder::<MySql>::new(RESERVATION_COLUMNS);
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit as i64);

        let rows = query
            .build_query_as::<ReservationRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// Helper structs for database mapping

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    reservation_id: i64,
    amount: Decimal,
    currency: String,
    status: String,
    payment_method: String,
    paid_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = AppError;

    fn try_from(row: PaymentRow) -> Result<Self> {
        let status = row
            .status
            .parse::<PaymentStatus>()
            .map_err(|e| AppError::Internal(format!("Invalid payment row {}: {}", row.id, e)))?;

        Ok(Payment {
            id: row.id,
            reservation_id: row.reservation_id,
            amount: row.amount,
            currency: row.currency,
            status,
            payment_method: row.payment_method,
            paid_at: row.paid_at,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReservationRow {
    id: i64,
    user_id: i64,
    package_id: i64,
    event_type: String,
    event_date: NaiveDate,
    status: String,
    payment_status: String,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(row: ReservationRow) -> Result<Self> {
        let status = row.status.parse::<ReservationStatus>().map_err(|e| {
            AppError::Internal(format!("Invalid reservation row {}: {}", row.id, e))
        })?;

        Ok(Reservation {
            id: row.id,
            user_id: row.user_id,
            package_id: row.package_id,
            event_type: row.event_type,
            event_date: row.event_date,
            status,
            payment_status: row.payment_status,
            total_amount: row.total_amount,
            created_at: row.created_at,
        })
    }
}
