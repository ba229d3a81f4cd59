// Booking summary aggregation over reservations.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::DateRange;
use crate::modules::reports::models::{BookingSummary, EventTypeCount, MonthCount};
use crate::modules::reservations::{Reservation, ReservationStatus};

/// Number of most recent months kept in the booking histogram
pub const TRAILING_MONTHS: usize = 6;

/// Pure reservation counting over already-fetched reservations
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingAggregator;

impl BookingAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Summarize reservations whose event date falls in `range`
    pub fn summary(&self, reservations: &[Reservation], range: DateRange) -> BookingSummary {
        let in_range: Vec<&Reservation> = reservations
            .iter()
            .filter(|r| range.contains(r.event_date))
            .collect();

        let total = in_range.len() as i64;

        let mut by_status: BTreeMap<String, i64> = BTreeMap::new();
        let mut by_payment_status: BTreeMap<String, i64> = BTreeMap::new();
        for reservation in &in_range {
            *by_status.entry(reservation.status.to_string()).or_insert(0) += 1;
            *by_payment_status
                .entry(reservation.payment_status.clone())
                .or_insert(0) += 1;
        }

        let approved = by_status
            .get(ReservationStatus::Approved.as_str())
            .copied()
            .unwrap_or(0);

        BookingSummary {
            total,
            by_status,
            by_payment_status,
            by_event_type: count_event_types(&in_range),
            by_month: trailing_months(&in_range, TRAILING_MONTHS),
            approval_rate: approval_rate(total, approved),
        }
    }
}

/// Approved share of `total` as a percentage, rounded half away from zero
/// to one decimal place. Zero when `total` is zero.
///
/// The result always carries exactly one decimal place, so it serializes as
/// "50.0" rather than "50".
pub fn approval_rate(total: i64, approved: i64) -> Decimal {
    if total <= 0 {
        return Decimal::new(0, 1);
    }

    let mut rate = (Decimal::from(approved) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rate.rescale(1);
    rate
}

/// Counts per event type, highest first; ties keep first-seen order
fn count_event_types(reservations: &[&Reservation]) -> Vec<EventTypeCount> {
    let mut counts: Vec<EventTypeCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for reservation in reservations {
        let slot = *index
            .entry(reservation.event_type.as_str())
            .or_insert_with(|| {
                counts.push(EventTypeCount {
                    event_type: reservation.event_type.clone(),
                    count: 0,
                });
                counts.len() - 1
            });
        counts[slot].count += 1;
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The `window` most recent (year, month) buckets, newest first
fn trailing_months(reservations: &[&Reservation], window: usize) -> Vec<MonthCount> {
    let mut months: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for reservation in reservations {
        let date = reservation.event_date;
        *months.entry((date.year(), date.month())).or_insert(0) += 1;
    }

    months
        .into_iter()
        .rev()
        .take(window)
        .map(|((year, month), count)| MonthCount {
            period: format!("{:04}-{:02}", year, month),
            year,
            month,
            count,
        })
        .collect()
}
