pub mod health;
pub mod leads;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /leads                          create, list (POST, GET)
/// /leads/{id}/status              terminal transition (POST)
/// /leads/followups/due            due follow-ups (GET)
/// /leads/followups/reminder       reminder digest (GET)
///
/// /reports/close-ratios           close-ratio KPIs (GET)
/// /reports/counts                 intake counts (GET)
/// /reports/daily                  daily report (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/leads", leads::router())
        .nest("/reports", reports::router())
}
