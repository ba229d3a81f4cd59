use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::AppError;
use crate::middleware::auth::{AuthContext, Capability};
use crate::modules::reports::models::{AggregationQuery, ReportFilters};
use crate::modules::reports::services::{parse_year_month, ReportService};

/// Query parameters for the monthly report endpoint.
///
/// Kept as raw strings so a non-numeric year yields the same
/// "Invalid year or month" error as an out-of-range one.
#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
}

/// GET /reports/monthly
///
/// Bookings and paid revenue for one calendar month. Missing year or month
/// defaults to the current month.
#[tracing::instrument(skip(service, auth))]
pub async fn get_monthly_report(
    service: web::Data<Arc<ReportService>>,
    auth: AuthContext,
    query: web::Query<MonthlyReportQuery>,
) -> Result<HttpResponse, AppError> {
    auth.require(Capability::ExportReports)?;

    let (year, month) = parse_year_month(query.year.as_deref(), query.month.as_deref())?;
    let report = service.monthly_report(year, month).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// GET /reports/printable
///
/// Dashboard plus the full paid-reservation listing and a generation time.
#[tracing::instrument(skip(service, auth))]
pub async fn get_printable_report(
    service: web::Data<Arc<ReportService>>,
    auth: AuthContext,
    query: web::Query<ReportFilters>,
) -> Result<HttpResponse, AppError> {
    auth.require(Capability::ExportReports)?;

    let filters = query.into_inner();
    let aggregation = AggregationQuery::from_filters(&filters)?;
    let report = service.printable_report(&aggregation, filters).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/monthly", web::get().to(get_monthly_report))
            .route("/printable", web::get().to(get_printable_report)),
    );
}
