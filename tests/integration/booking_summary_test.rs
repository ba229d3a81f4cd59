// Integration tests for booking summaries through ReportService

#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use venuebook::core::DateRange;
use venuebook::reservations::{Reservation, ReservationStatus};

/// Eight reservations, one per month from January to August 2025
fn season() -> Vec<Reservation> {
    use ReservationStatus::*;

    let rows = [
        (1, "Wedding", Approved, 1, "paid"),
        (2, "Birthday", Pending, 2, "unpaid"),
        (3, "Wedding", Approved, 3, "paid"),
        (4, "Corporate", Declined, 4, "unpaid"),
        (5, "Birthday", Approved, 5, "partial"),
        (6, "Corporate", Pending, 6, "unpaid"),
        (7, "Birthday", Deleted, 7, "unpaid"),
        (8, "Wedding", Pending, 8, "partial"),
    ];

    rows.into_iter()
        .map(|(id, event_type, status, month, payment_status)| {
            TestDataFactory::reservation_with_payment_status(
                id,
                event_type,
                status,
                TestDataFactory::date(2025, month, 12),
                payment_status,
            )
        })
        .collect()
}

#[tokio::test]
async fn test_event_types_sorted_by_count() {
    let service = report_service(InMemoryReportRepository::new(vec![], season()));

    let summary = service.booking_summary(DateRange::unbounded()).await.unwrap();

    assert_eq!(summary.total, 8);
    assert_eq!(summary.by_event_type.len(), 3);

    // Wedding and Birthday tie; either may come first
    let mut leaders: Vec<(&str, i64)> = summary.by_event_type[..2]
        .iter()
        .map(|e| (e.event_type.as_str(), e.count))
        .collect();
    leaders.sort();
    assert_eq!(leaders, vec![("Birthday", 3), ("Wedding", 3)]);

    assert_eq!(summary.by_event_type[2].event_type, "Corporate");
    assert_eq!(summary.by_event_type[2].count, 2);
}

#[tokio::test]
async fn test_status_counts_and_approval_rate() {
    let service = report_service(InMemoryReportRepository::new(vec![], season()));

    let summary = service.booking_summary(DateRange::unbounded()).await.unwrap();

    assert_eq!(summary.status_count("approved"), 3);
    assert_eq!(summary.status_count("pending"), 3);
    assert_eq!(summary.status_count("declined"), 1);
    assert_eq!(summary.status_count("deleted"), 1);
    assert_eq!(summary.approval_rate, dec!(37.5));

    assert_eq!(summary.by_payment_status.get("unpaid"), Some(&4));
    assert_eq!(summary.by_payment_status.get("paid"), Some(&2));
    assert_eq!(summary.by_payment_status.get("partial"), Some(&2));

    let status_total: i64 = summary.by_status.values().sum();
    assert_eq!(status_total, summary.total);
}

#[tokio::test]
async fn test_absent_statuses_are_not_zero_filled() {
    let rows = vec![
        TestDataFactory::reservation(1, "Wedding", ReservationStatus::Pending, TestDataFactory::date(2025, 5, 1)),
        TestDataFactory::reservation(2, "Wedding", ReservationStatus::Pending, TestDataFactory::date(2025, 5, 2)),
    ];
    let service = report_service(InMemoryReportRepository::new(vec![], rows));

    let summary = service.booking_summary(DateRange::unbounded()).await.unwrap();

    assert_eq!(summary.by_status.len(), 1);
    assert!(!summary.by_status.contains_key("approved"));
    assert_eq!(summary.approval_rate, Decimal::ZERO);
}

#[tokio::test]
async fn test_trailing_months_newest_first() {
    let service = report_service(InMemoryReportRepository::new(vec![], season()));

    let summary = service.booking_summary(DateRange::unbounded()).await.unwrap();

    let months: Vec<&str> = summary.by_month.iter().map(|m| m.period.as_str()).collect();
    assert_eq!(
        months,
        vec!["2025-08", "2025-07", "2025-06", "2025-05", "2025-04", "2025-03"]
    );
    assert!(summary.by_month.iter().all(|m| m.count == 1));
}

#[tokio::test]
async fn test_range_filters_by_event_date() {
    let service = report_service(InMemoryReportRepository::new(vec![], season()));
    let spring = DateRange::between(TestDataFactory::date(2025, 3, 1), TestDataFactory::date(2025, 5, 31));

    let summary = service.booking_summary(spring).await.unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.status_count("approved"), 2);
    assert_eq!(summary.approval_rate, dec!(66.7));
}

#[tokio::test]
async fn test_empty_range_has_zero_rate() {
    let service = report_service(InMemoryReportRepository::new(vec![], season()));
    let inverted = DateRange::between(TestDataFactory::date(2025, 12, 31), TestDataFactory::date(2025, 1, 1));

    let summary = service.booking_summary(inverted).await.unwrap();

    assert_eq!(summary.total, 0);
    assert!(summary.by_status.is_empty());
    assert!(summary.by_event_type.is_empty());
    assert!(summary.by_month.is_empty());
    assert_eq!(summary.approval_rate, Decimal::ZERO);
}
