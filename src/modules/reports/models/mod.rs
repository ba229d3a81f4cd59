pub mod aggregation_query;
pub mod booking_summary;
pub mod period;
pub mod report;
pub mod revenue;

pub use aggregation_query::{AggregationQuery, ReportFilters};
pub use booking_summary::{BookingSummary, EventTypeCount, MonthCount};
pub use period::{BucketLabel, Period, PeriodBucketer, WeekRule};
pub use report::{
    Dashboard, MethodBreakdown, MonthlyReport, PaidReservation, PrintableReport, RevenueChart,
    RevenueTotal,
};
pub use revenue::{MethodRevenue, PeriodBucket, RevenueOverview};
