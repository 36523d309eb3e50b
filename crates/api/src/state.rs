use std::sync::Arc;

use leadpipe_core::store::LeadStore;

/// Shared application state handed to every handler.
///
/// Handlers only see the [`LeadStore`] trait object, so integration tests
/// can swap the PostgreSQL store for the in-memory one.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LeadStore>,
}
