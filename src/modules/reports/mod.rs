pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{AggregationQuery, Period, PeriodBucketer, ReportFilters, WeekRule};
pub use repositories::{MySqlReportRepository, ReportRepository};
pub use services::ReportService;
