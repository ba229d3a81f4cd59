// Revenue aggregation over paid payments.
//
// Only `Paid` payments count. A payment is dated by the day it was paid;
// time of day never matters for range filtering.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::DateRange;
use crate::modules::payments::Payment;
use crate::modules::reports::models::{
    MethodRevenue, PaidReservation, Period, PeriodBucket, PeriodBucketer,
};
use crate::modules::reservations::Reservation;

/// Pure revenue aggregation over already-fetched payments
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueAggregator {
    bucketer: PeriodBucketer,
}

impl RevenueAggregator {
    pub fn new(bucketer: PeriodBucketer) -> Self {
        Self { bucketer }
    }

    /// Sum of paid amounts in range; zero when nothing matches, never negative
    pub fn total_revenue(&self, payments: &[Payment], range: DateRange) -> Decimal {
        let total: Decimal = counted(payments, range).map(|(p, _)| p.amount).sum();
        total.max(Decimal::ZERO)
    }

    /// Paid revenue per calendar bucket, ascending by period key
    pub fn revenue_by_period(
        &self,
        payments: &[Payment],
        period: Period,
        range: DateRange,
    ) -> Vec<PeriodBucket> {
        let mut buckets: BTreeMap<String, PeriodBucket> = BTreeMap::new();

        for (payment, settled_at) in counted(payments, range) {
            let label = self.bucketer.bucket(period, settled_at);
            let bucket = buckets
                .entry(label.key.clone())
                .or_insert_with(|| PeriodBucket::empty(label));
            bucket.revenue += payment.amount;
            bucket.payment_count += 1;
        }

        buckets.into_values().collect()
    }

    /// Paid revenue per payment method, highest revenue first.
    ///
    /// Methods with equal revenue keep the order they were first seen in.
    pub fn revenue_by_method(&self, payments: &[Payment], range: DateRange) -> Vec<MethodRevenue> {
        let mut methods: Vec<MethodRevenue> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for (payment, _) in counted(payments, range) {
            let slot = *index.entry(payment.payment_method.as_str()).or_insert_with(|| {
                methods.push(MethodRevenue {
                    payment_method: payment.payment_method.clone(),
                    revenue: Decimal::ZERO,
                    payment_count: 0,
                });
                methods.len() - 1
            });
            methods[slot].revenue += payment.amount;
            methods[slot].payment_count += 1;
        }

        methods.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        methods
    }

    /// Reservations joined with their paid payments in range, most recently
    /// paid first. Payments whose reservation is not in `reservations` are
    /// skipped.
    pub fn paid_reservations(
        &self,
        payments: &[Payment],
        reservations: &[Reservation],
        range: DateRange,
    ) -> Vec<PaidReservation> {
        let mut paid: HashMap<i64, (Decimal, i64, DateTime<Utc>)> = HashMap::new();

        for (payment, settled_at) in counted(payments, range) {
            let entry = paid
                .entry(payment.reservation_id)
                .or_insert((Decimal::ZERO, 0, settled_at));
            entry.0 += payment.amount;
            entry.1 += 1;
            entry.2 = entry.2.max(settled_at);
        }

        let mut listing: Vec<PaidReservation> = reservations
            .iter()
            .filter_map(|r| {
                paid.get(&r.id).map(|&(amount_paid, payment_count, last_paid_at)| {
                    PaidReservation {
                        reservation_id: r.id,
                        user_id: r.user_id,
                        package_id: r.package_id,
                        event_type: r.event_type.clone(),
                        event_date: r.event_date,
                        status: r.status,
                        payment_status: r.payment_status.clone(),
                        total_amount: r.total_amount,
                        amount_paid,
                        payment_count,
                        last_paid_at,
                    }
                })
            })
            .collect();

        listing.sort_by(|a, b| {
            b.last_paid_at
                .cmp(&a.last_paid_at)
                .then_with(|| b.reservation_id.cmp(&a.reservation_id))
        });
        listing
    }
}

/// Paid payments settled inside `range`, with their settlement timestamp
fn counted(
    payments: &[Payment],
    range: DateRange,
) -> impl Iterator<Item = (&Payment, DateTime<Utc>)> {
    payments.iter().filter_map(move |p| {
        p.settled_at()
            .filter(|ts| range.contains(ts.date_naive()))
            .map(|ts| (p, ts))
    })
}
