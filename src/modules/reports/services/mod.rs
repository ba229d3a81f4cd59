pub mod booking_aggregator;
pub mod report_service;
pub mod revenue_aggregator;

pub use booking_aggregator::{approval_rate, BookingAggregator, TRAILING_MONTHS};
pub use report_service::{parse_year_month, ReportService};
pub use revenue_aggregator::RevenueAggregator;
