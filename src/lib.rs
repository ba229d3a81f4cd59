//! Venuebook reporting service library
//!
//! Revenue and booking analytics for the venue reservation system: period
//! bucketing, revenue and booking aggregation, and the report views built on
//! top of them.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::payments;
pub use modules::reports;
pub use modules::reservations;

/// Register every HTTP route of the service
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    modules::health::controllers::configure(cfg);
    modules::reports::controllers::configure(cfg);
    cfg.default_service(actix_web::web::to(route_not_found));
}

async fn route_not_found(req: actix_web::HttpRequest) -> crate::core::Result<actix_web::HttpResponse> {
    Err(crate::core::AppError::not_found(format!("No route for {}", req.path())))
}
