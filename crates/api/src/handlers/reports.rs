//! Handlers for close-ratio KPIs, intake counts, and the daily report.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use leadpipe_core::metrics;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for the daily report endpoint.
#[derive(Debug, Serialize)]
pub struct DailyReport {
    pub report: String,
}

/// GET /api/v1/reports/close-ratios
///
/// Overall close ratio plus the per-source KPI breakdown.
pub async fn close_ratios(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ratios = metrics::source_close_ratios(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: ratios }))
}

/// GET /api/v1/reports/counts
///
/// Today/yesterday intake volume plus status and temperature breakdowns.
pub async fn counts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let counts = metrics::lead_counts(state.store.as_ref(), Utc::now()).await?;
    Ok(Json(DataResponse { data: counts }))
}

/// GET /api/v1/reports/daily
///
/// Display-ready daily report for the previous calendar day.
pub async fn daily(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = metrics::daily_report(state.store.as_ref(), Utc::now()).await?;
    Ok(Json(DataResponse {
        data: DailyReport { report },
    }))
}
