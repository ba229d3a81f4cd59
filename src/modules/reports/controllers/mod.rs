pub mod analytics_controller;
pub mod report_controller;

/// Register analytics and report routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    analytics_controller::configure(cfg);
    report_controller::configure(cfg);
}
