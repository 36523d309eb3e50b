use crate::lead::LeadStatus;

/// Error type shared by the lifecycle engine, the metrics engine, and
/// [`crate::store::LeadStore`] implementations.
///
/// Everything is surfaced as an explicit value; nothing in this crate logs
/// and suppresses. In particular a store failure is [`LeadError::Store`] and
/// never masquerades as an empty result set or a zero count.
#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    /// A required field was missing or not a member of its enumerated set.
    /// Always names the offending field so the caller can re-prompt.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: &'static str, message: String },

    /// Insert collided with an existing lead id.
    #[error("Lead id already exists: {0}")]
    DuplicateId(String),

    /// No lead with the given id.
    #[error("Lead not found: {0}")]
    NotFound(String),

    /// Attempted a state transition the machine does not allow
    /// (only Active -> Closed and Active -> Lost exist).
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: LeadStatus, to: LeadStatus },

    /// A storage-layer failure (connectivity, constraint violation,
    /// corrupted row). Surfaced as-is, never retried internally.
    #[error("Storage failure: {0}")]
    Store(String),
}
