//! Handlers for lead intake, listing, and lifecycle transitions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use leadpipe_core::error::LeadError;
use leadpipe_core::lead::{Lead, LeadSource, LeadStatus};
use leadpipe_core::lifecycle::{self, NewLead};
use leadpipe_core::metrics;
use leadpipe_core::reminder::compose_reminder_digest;
use leadpipe_core::store::LeadFilter;
use leadpipe_core::types::Timestamp;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query params for `GET /leads`. All fields optional; enumerated fields
/// take the canonical display strings, timestamps are RFC 3339.
#[derive(Debug, Deserialize)]
pub struct LeadListQuery {
    pub status: Option<String>,
    pub source: Option<String>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
}

/// Body for `POST /leads/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

/// Response payload for the reminder digest endpoint.
#[derive(Debug, Serialize)]
pub struct ReminderDigest {
    pub due_count: usize,
    pub message: String,
}

fn parse_member<T>(
    field: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
    members: &'static [&'static str],
) -> Result<T, LeadError> {
    parse(value).ok_or_else(|| LeadError::Validation {
        field,
        message: format!("'{value}' is not one of: {}", members.join(", ")),
    })
}

impl LeadListQuery {
    fn into_filter(self) -> Result<LeadFilter, LeadError> {
        let status = self
            .status
            .as_deref()
            .map(|s| parse_member("status", s, LeadStatus::parse, LeadStatus::LABELS))
            .transpose()?;
        let source = self
            .source
            .as_deref()
            .map(|s| parse_member("source", s, LeadSource::parse, LeadSource::LABELS))
            .transpose()?;
        Ok(LeadFilter {
            status,
            source,
            created_from: self.created_from,
            created_to: self.created_to,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/leads
///
/// Validate and persist a new lead. Returns 201 with the stored record,
/// including the generated id and follow-up deadline.
pub async fn create_lead(
    State(state): State<AppState>,
    Json(input): Json<NewLead>,
) -> AppResult<impl IntoResponse> {
    let lead = lifecycle::create_lead(state.store.as_ref(), Utc::now(), &input).await?;

    tracing::info!(
        lead_id = %lead.id,
        source = %lead.source,
        lead_status = %lead.lead_status,
        "Lead created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lead })))
}

/// GET /api/v1/leads
///
/// List leads, optionally filtered by status, source, and creation window.
pub async fn list_leads(
    State(state): State<AppState>,
    Query(params): Query<LeadListQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let mut leads: Vec<Lead> = state.store.list_by(&filter).await?;
    leads.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    Ok(Json(DataResponse { data: leads }))
}

/// POST /api/v1/leads/{id}/status
///
/// Move a lead to a terminal state (Closed or Lost). A lead already in a
/// terminal state yields 409.
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StatusChange>,
) -> AppResult<impl IntoResponse> {
    let target = parse_member("status", &input.status, LeadStatus::parse, LeadStatus::LABELS)?;
    let lead = lifecycle::transition_status(state.store.as_ref(), &id, target).await?;

    tracing::info!(lead_id = %lead.id, status = %lead.status, "Lead status changed");

    Ok(Json(DataResponse { data: lead }))
}

/// GET /api/v1/leads/followups/due
///
/// Active leads whose follow-up deadline has arrived, most overdue first.
pub async fn followups_due(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let due = metrics::followup_due(state.store.as_ref(), Utc::now()).await?;
    Ok(Json(DataResponse { data: due }))
}

/// GET /api/v1/leads/followups/reminder
///
/// The follow-up reminder digest as display-ready text.
pub async fn followup_reminder(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let due = metrics::followup_due(state.store.as_ref(), Utc::now()).await?;
    let digest = ReminderDigest {
        due_count: due.len(),
        message: compose_reminder_digest(&due),
    };
    Ok(Json(DataResponse { data: digest }))
}
