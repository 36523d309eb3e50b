//! Raw sqlx queries for the `leads` table.

use sqlx::PgPool;

use leadpipe_core::lead::LeadStatus;
use leadpipe_core::store::LeadFilter;

use crate::models::lead::LeadRow;

const LEAD_COLUMNS: &str = "\
    id, name, source, contact_method, quote_status, lead_status, \
    quoted_price, created_at, next_followup, status";

/// CRUD for the `leads` table. Returns raw rows; the store layer converts
/// them into domain leads and maps errors.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead. A duplicate primary key surfaces as the driver's
    /// unique-violation error.
    pub async fn insert(pool: &PgPool, row: &LeadRow) -> Result<LeadRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads \
             (id, name, source, contact_method, quote_status, lead_status, \
              quoted_price, created_at, next_followup, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {LEAD_COLUMNS}"
        );
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(&row.id)
            .bind(&row.name)
            .bind(&row.source)
            .bind(&row.contact_method)
            .bind(&row.quote_status)
            .bind(&row.lead_status)
            .bind(row.quoted_price)
            .bind(row.created_at)
            .bind(row.next_followup)
            .bind(&row.status)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<LeadRow>, sqlx::Error> {
        let query = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a lead out of `Active` in one statement. Returns `None` when no
    /// row was updated, which means the lead either does not exist or has
    /// already left `Active`; the caller re-reads to tell the two apart.
    pub async fn update_status_if_active(
        pool: &PgPool,
        id: &str,
        new_status: LeadStatus,
    ) -> Result<Option<LeadRow>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET status = $2 \
             WHERE id = $1 AND status = 'Active' \
             RETURNING {LEAD_COLUMNS}"
        );
        sqlx::query_as::<_, LeadRow>(&query)
            .bind(id)
            .bind(new_status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List every lead, oldest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<LeadRow>, sqlx::Error> {
        let query = format!("SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, LeadRow>(&query).fetch_all(pool).await
    }

    /// List leads matching the filter, oldest first. Bounds are inclusive.
    pub async fn list_by(pool: &PgPool, filter: &LeadFilter) -> Result<Vec<LeadRow>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        if filter.status.is_some() {
            conditions.push(format!("status = ${}", conditions.len() + 1));
        }
        if filter.source.is_some() {
            conditions.push(format!("source = ${}", conditions.len() + 1));
        }
        if filter.created_from.is_some() {
            conditions.push(format!("created_at >= ${}", conditions.len() + 1));
        }
        if filter.created_to.is_some() {
            conditions.push(format!("created_at <= ${}", conditions.len() + 1));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query = format!(
            "SELECT {LEAD_COLUMNS} FROM leads{where_clause} ORDER BY created_at ASC, id ASC"
        );

        let mut q = sqlx::query_as::<_, LeadRow>(&query);
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(source) = filter.source {
            q = q.bind(source.as_str());
        }
        if let Some(from) = filter.created_from {
            q = q.bind(from);
        }
        if let Some(to) = filter.created_to {
            q = q.bind(to);
        }
        q.fetch_all(pool).await
    }

    /// Lead counts grouped by lifecycle status.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM leads GROUP BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Lead counts grouped by temperature.
    pub async fn count_by_temperature(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT lead_status, COUNT(*) FROM leads GROUP BY lead_status",
        )
        .fetch_all(pool)
        .await
    }

}
