use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::{AppError, DateRange};
use crate::middleware::auth::{AuthContext, Capability};
use crate::modules::reports::models::{
    AggregationQuery, MethodBreakdown, ReportFilters, RevenueTotal,
};
use crate::modules::reports::services::ReportService;

/// GET /analytics/dashboard
///
/// Booking summary, revenue overview and recent activity for the filters.
#[tracing::instrument(skip(service, auth))]
pub async fn get_dashboard(
    service: web::Data<Arc<ReportService>>,
    auth: AuthContext,
    query: web::Query<ReportFilters>,
) -> Result<HttpResponse, AppError> {
    auth.require(Capability::ViewReports)?;

    let filters = query.into_inner();
    let aggregation = AggregationQuery::from_filters(&filters)?;
    let dashboard = service.dashboard(&aggregation, filters).await?;

    Ok(HttpResponse::Ok().json(dashboard))
}

/// GET /analytics/revenue
///
/// Revenue chart bucketed by `period` (daily, weekly, monthly, yearly).
#[tracing::instrument(skip(service, auth))]
pub async fn get_revenue_chart(
    service: web::Data<Arc<ReportService>>,
    auth: AuthContext,
    query: web::Query<ReportFilters>,
) -> Result<HttpResponse, AppError> {
    auth.require(Capability::ViewReports)?;

    let filters = query.into_inner();
    let aggregation = AggregationQuery::from_filters(&filters)?;
    let chart = service.revenue_chart(&aggregation, filters).await?;

    Ok(HttpResponse::Ok().json(chart))
}

/// GET /analytics/revenue/total
#[tracing::instrument(skip(service, auth))]
pub async fn get_total_revenue(
    service: web::Data<Arc<ReportService>>,
    auth: AuthContext,
    query: web::Query<ReportFilters>,
) -> Result<HttpResponse, AppError> {
    auth.require(Capability::ViewReports)?;

    let filters = query.into_inner();
    let range = parse_range(&filters)?;
    let total = service.total_revenue(range).await?;

    Ok(HttpResponse::Ok().json(RevenueTotal { total, filters }))
}

/// GET /analytics/revenue/by-method
#[tracing::instrument(skip(service, auth))]
pub async fn get_revenue_by_method(
    service: web::Data<Arc<ReportService>>,
    auth: AuthContext,
    query: web::Query<ReportFilters>,
) -> Result<HttpResponse, AppError> {
    auth.require(Capability::ViewReports)?;

    let filters = query.into_inner();
    let range = parse_range(&filters)?;
    let data = service.revenue_by_method(range).await?;

    Ok(HttpResponse::Ok().json(MethodBreakdown { data, filters }))
}

/// GET /analytics/bookings/summary
#[tracing::instrument(skip(service, auth))]
pub async fn get_booking_summary(
    service: web::Data<Arc<ReportService>>,
    auth: AuthContext,
    query: web::Query<ReportFilters>,
) -> Result<HttpResponse, AppError> {
    auth.require(Capability::ViewReports)?;

    let range = parse_range(&query)?;
    let summary = service.booking_summary(range).await?;

    Ok(HttpResponse::Ok().json(summary))
}

// Endpoints without a period ignore the parameter instead of rejecting it
fn parse_range(filters: &ReportFilters) -> Result<DateRange, AppError> {
    DateRange::parse(filters.start_date.as_deref(), filters.end_date.as_deref())
}

/// Configure analytics routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analytics")
            .route("/dashboard", web::get().to(get_dashboard))
            .route("/revenue", web::get().to(get_revenue_chart))
            .route("/revenue/total", web::get().to(get_total_revenue))
            .route("/revenue/by-method", web::get().to(get_revenue_by_method))
            .route("/bookings/summary", web::get().to(get_booking_summary)),
    );
}
