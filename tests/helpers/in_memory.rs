// In-memory stores
//
// Mirror the filtering the MySQL queries perform so the aggregation services
// see the same row sets they would in production.

use std::collections::HashMap;

use async_trait::async_trait;

use venuebook::core::{AppError, DateRange, Result};
use venuebook::middleware::{hash_api_key, CredentialStore, Principal};
use venuebook::payments::Payment;
use venuebook::reports::ReportRepository;
use venuebook::reservations::Reservation;

/// Report repository backed by plain vectors
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportRepository {
    payments: Vec<Payment>,
    reservations: Vec<Reservation>,
    unavailable: bool,
}

impl InMemoryReportRepository {
    pub fn new(payments: Vec<Payment>, reservations: Vec<Reservation>) -> Self {
        Self {
            payments,
            reservations,
            unavailable: false,
        }
    }

    /// Repository whose every call fails like a lost database connection
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn find_paid_payments(&self, range: DateRange) -> Result<Vec<Payment>> {
        self.check()?;
        Ok(self
            .payments
            .iter()
            .filter(|p| p.settled_on().is_some_and(|day| range.contains(day)))
            .cloned()
            .collect())
    }

    async fn find_reservations(&self, range: DateRange) -> Result<Vec<Reservation>> {
        self.check()?;
        Ok(self
            .reservations
            .iter()
            .filter(|r| range.contains(r.event_date))
            .cloned()
            .collect())
    }

    async fn find_reservations_by_ids(&self, ids: &[i64]) -> Result<Vec<Reservation>> {
        self.check()?;
        Ok(self
            .reservations
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn find_recent_reservations(&self, limit: usize) -> Result<Vec<Reservation>> {
        self.check()?;
        let mut recent = self.reservations.clone();
        recent.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        recent.truncate(limit);
        Ok(recent)
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

/// Credential store keyed by API key hash
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    principals: HashMap<String, Principal>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `principal` under the plain-text `api_key`
    pub fn with_key(mut self, api_key: &str, principal: Principal) -> Self {
        self.principals.insert(hash_api_key(api_key), principal);
        self
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_key_hash(&self, key_hash: &str) -> Result<Option<Principal>> {
        Ok(self.principals.get(key_hash).cloned())
    }
}
