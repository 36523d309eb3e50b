//! PostgreSQL-backed [`LeadStore`].

use std::collections::HashMap;

use async_trait::async_trait;

use leadpipe_core::error::LeadError;
use leadpipe_core::lead::{Lead, LeadStatus, Temperature};
use leadpipe_core::store::{LeadFilter, LeadStore};

use crate::models::lead::LeadRow;
use crate::repositories::lead_repo::LeadRepo;
use crate::DbPool;

const UNIQUE_VIOLATION: &str = "23505";

/// [`LeadStore`] backed by the `leads` table.
pub struct PgLeadStore {
    pool: DbPool,
}

impl PgLeadStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> LeadError {
    LeadError::Store(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}

fn rows_to_leads(rows: Vec<LeadRow>) -> Result<Vec<Lead>, LeadError> {
    rows.into_iter().map(Lead::try_from).collect()
}

fn count_rows<T>(
    rows: Vec<(String, i64)>,
    column: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<HashMap<T, i64>, LeadError>
where
    T: std::hash::Hash + Eq,
{
    rows.into_iter()
        .map(|(value, count)| {
            let key = parse(&value).ok_or_else(|| {
                LeadError::Store(format!("corrupted count row: {column} holds '{value}'"))
            })?;
            Ok((key, count))
        })
        .collect()
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn insert(&self, lead: &Lead) -> Result<(), LeadError> {
        let row = LeadRow::from(lead);
        match LeadRepo::insert(&self.pool, &row).await {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(LeadError::DuplicateId(lead.id.clone()))
            }
            Err(err) => Err(store_error(err)),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>, LeadError> {
        LeadRepo::find_by_id(&self.pool, id)
            .await
            .map_err(store_error)?
            .map(Lead::try_from)
            .transpose()
    }

    async fn update_status(&self, id: &str, new_status: LeadStatus) -> Result<Lead, LeadError> {
        let updated = LeadRepo::update_status_if_active(&self.pool, id, new_status)
            .await
            .map_err(store_error)?;
        if let Some(row) = updated {
            return Lead::try_from(row);
        }

        // The conditional update matched nothing: either the lead does not
        // exist, or another writer already moved it out of Active. Re-read
        // to report the right error.
        match self.find_by_id(id).await? {
            Some(existing) => Err(LeadError::InvalidTransition {
                from: existing.status,
                to: new_status,
            }),
            None => Err(LeadError::NotFound(id.to_string())),
        }
    }

    async fn list_all(&self) -> Result<Vec<Lead>, LeadError> {
        let rows = LeadRepo::list_all(&self.pool).await.map_err(store_error)?;
        rows_to_leads(rows)
    }

    async fn list_by(&self, filter: &LeadFilter) -> Result<Vec<Lead>, LeadError> {
        let rows = LeadRepo::list_by(&self.pool, filter)
            .await
            .map_err(store_error)?;
        rows_to_leads(rows)
    }

    async fn count_by_status(&self) -> Result<HashMap<LeadStatus, i64>, LeadError> {
        let rows = LeadRepo::count_by_status(&self.pool)
            .await
            .map_err(store_error)?;
        count_rows(rows, "status", LeadStatus::parse)
    }

    async fn count_by_temperature(&self) -> Result<HashMap<Temperature, i64>, LeadError> {
        let rows = LeadRepo::count_by_temperature(&self.pool)
            .await
            .map_err(store_error)?;
        count_rows(rows, "lead_status", Temperature::parse)
    }
}
