use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Reporting routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/close-ratios", get(reports::close_ratios))
        .route("/counts", get(reports::counts))
        .route("/daily", get(reports::daily))
}
