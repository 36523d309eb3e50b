//! The storage contract the engines rely on, plus an in-process reference
//! implementation.
//!
//! Any backend satisfying [`LeadStore`] plugs in underneath the lifecycle and
//! metrics engines; `leadpipe-db` provides the PostgreSQL implementation.
//! Operations are atomic per lead record only; no multi-record transactions
//! are required.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LeadError;
use crate::lead::{Lead, LeadSource, LeadStatus, Temperature};
use crate::types::Timestamp;

/// Filter for [`LeadStore::list_by`]. Unset fields match everything; the
/// `created_*` bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
}

impl LeadFilter {
    /// Whether a lead satisfies every set field.
    pub fn matches(&self, lead: &Lead) -> bool {
        self.status.is_none_or(|s| lead.status == s)
            && self.source.is_none_or(|s| lead.source == s)
            && self.created_from.is_none_or(|t| lead.created_at >= t)
            && self.created_to.is_none_or(|t| lead.created_at <= t)
    }
}

/// Storage operations required by the engines.
///
/// Error contract:
/// - `insert` fails with [`LeadError::DuplicateId`] on an id collision.
/// - `update_status` is compare-and-set: it succeeds only while the lead is
///   still Active, so two racing terminal transitions cannot both win. The
///   loser observes [`LeadError::InvalidTransition`]; an unknown id is
///   [`LeadError::NotFound`].
/// - Backend failures surface as [`LeadError::Store`], never as empty
///   results or zero counts.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, lead: &Lead) -> Result<(), LeadError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>, LeadError>;

    /// Move an Active lead to `new_status`, returning the updated record.
    async fn update_status(&self, id: &str, new_status: LeadStatus) -> Result<Lead, LeadError>;

    async fn list_all(&self) -> Result<Vec<Lead>, LeadError>;

    async fn list_by(&self, filter: &LeadFilter) -> Result<Vec<Lead>, LeadError>;

    async fn count_by_status(&self) -> Result<HashMap<LeadStatus, i64>, LeadError>;

    async fn count_by_temperature(&self) -> Result<HashMap<Temperature, i64>, LeadError>;
}

// ---------------------------------------------------------------------------
// MemoryLeadStore
// ---------------------------------------------------------------------------

/// In-process [`LeadStore`] backed by a mutex-guarded map.
///
/// Honours the full store contract, including compare-and-set on
/// `update_status`. Used by unit and API tests; also serves as the reference
/// semantics for new backends.
#[derive(Default)]
pub struct MemoryLeadStore {
    leads: Mutex<HashMap<String, Lead>>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Lead>>, LeadError> {
        self.leads
            .lock()
            .map_err(|_| LeadError::Store("lead map mutex poisoned".into()))
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn insert(&self, lead: &Lead) -> Result<(), LeadError> {
        let mut leads = self.locked()?;
        if leads.contains_key(&lead.id) {
            return Err(LeadError::DuplicateId(lead.id.clone()));
        }
        leads.insert(lead.id.clone(), lead.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>, LeadError> {
        Ok(self.locked()?.get(id).cloned())
    }

    async fn update_status(&self, id: &str, new_status: LeadStatus) -> Result<Lead, LeadError> {
        let mut leads = self.locked()?;
        let lead = leads
            .get_mut(id)
            .ok_or_else(|| LeadError::NotFound(id.to_string()))?;
        if lead.status != LeadStatus::Active {
            return Err(LeadError::InvalidTransition {
                from: lead.status,
                to: new_status,
            });
        }
        lead.status = new_status;
        Ok(lead.clone())
    }

    async fn list_all(&self) -> Result<Vec<Lead>, LeadError> {
        Ok(self.locked()?.values().cloned().collect())
    }

    async fn list_by(&self, filter: &LeadFilter) -> Result<Vec<Lead>, LeadError> {
        Ok(self
            .locked()?
            .values()
            .filter(|lead| filter.matches(lead))
            .cloned()
            .collect())
    }

    async fn count_by_status(&self) -> Result<HashMap<LeadStatus, i64>, LeadError> {
        let mut counts = HashMap::new();
        for lead in self.locked()?.values() {
            *counts.entry(lead.status).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn count_by_temperature(&self) -> Result<HashMap<Temperature, i64>, LeadError> {
        let mut counts = HashMap::new();
        for lead in self.locked()?.values() {
            *counts.entry(lead.lead_status).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::QuoteStatus;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    fn sample_lead(id: &str, status: LeadStatus) -> Lead {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        Lead {
            id: id.to_string(),
            name: "Ada Prospect".into(),
            source: LeadSource::Website,
            contact_method: "email".into(),
            quote_status: QuoteStatus::Requested,
            lead_status: Temperature::Warm,
            quoted_price: None,
            created_at: created,
            next_followup: created + Duration::hours(24),
            status,
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = MemoryLeadStore::new();
        store.insert(&sample_lead("LEAD-1", LeadStatus::Active)).await.unwrap();

        let err = store
            .insert(&sample_lead("LEAD-1", LeadStatus::Active))
            .await
            .unwrap_err();
        assert_matches!(err, LeadError::DuplicateId(id) if id == "LEAD-1");
    }

    #[tokio::test]
    async fn update_status_is_compare_and_set() {
        let store = MemoryLeadStore::new();
        store.insert(&sample_lead("LEAD-1", LeadStatus::Active)).await.unwrap();

        let closed = store.update_status("LEAD-1", LeadStatus::Closed).await.unwrap();
        assert_eq!(closed.status, LeadStatus::Closed);

        // The second terminal transition loses the race and is rejected.
        let err = store.update_status("LEAD-1", LeadStatus::Lost).await.unwrap_err();
        assert_matches!(
            err,
            LeadError::InvalidTransition { from: LeadStatus::Closed, to: LeadStatus::Lost }
        );
    }

    #[tokio::test]
    async fn update_status_unknown_id_is_not_found() {
        let store = MemoryLeadStore::new();
        let err = store.update_status("LEAD-9", LeadStatus::Closed).await.unwrap_err();
        assert_matches!(err, LeadError::NotFound(id) if id == "LEAD-9");
    }

    #[tokio::test]
    async fn list_by_applies_every_set_field() {
        let store = MemoryLeadStore::new();
        let mut media = sample_lead("LEAD-1", LeadStatus::Active);
        media.source = LeadSource::MediaAlpha;
        store.insert(&media).await.unwrap();
        store.insert(&sample_lead("LEAD-2", LeadStatus::Closed)).await.unwrap();

        let filter = LeadFilter {
            status: Some(LeadStatus::Active),
            source: Some(LeadSource::MediaAlpha),
            ..Default::default()
        };
        let leads = store.list_by(&filter).await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id, "LEAD-1");
    }

    #[tokio::test]
    async fn created_range_bounds_are_inclusive() {
        let store = MemoryLeadStore::new();
        let lead = sample_lead("LEAD-1", LeadStatus::Active);
        let created = lead.created_at;
        store.insert(&lead).await.unwrap();

        let filter = LeadFilter {
            created_from: Some(created),
            created_to: Some(created),
            ..Default::default()
        };
        assert_eq!(store.list_by(&filter).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn counts_group_by_status_and_temperature() {
        let store = MemoryLeadStore::new();
        store.insert(&sample_lead("LEAD-1", LeadStatus::Active)).await.unwrap();
        store.insert(&sample_lead("LEAD-2", LeadStatus::Active)).await.unwrap();
        store.insert(&sample_lead("LEAD-3", LeadStatus::Lost)).await.unwrap();

        let by_status = store.count_by_status().await.unwrap();
        assert_eq!(by_status.get(&LeadStatus::Active), Some(&2));
        assert_eq!(by_status.get(&LeadStatus::Lost), Some(&1));

        let by_temperature = store.count_by_temperature().await.unwrap();
        assert_eq!(by_temperature.get(&Temperature::Warm), Some(&3));
    }
}
