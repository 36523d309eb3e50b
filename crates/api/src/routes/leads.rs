use axum::routing::{get, post};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Lead intake, listing, lifecycle, and follow-up routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(leads::create_lead).get(leads::list_leads))
        .route("/{id}/status", post(leads::change_status))
        .route("/followups/due", get(leads::followups_due))
        .route("/followups/reminder", get(leads::followup_reminder))
}
