//! Lead lifecycle and reporting engine.
//!
//! This crate is the single source of truth for the business rules of the
//! lead-intake pipeline: identity and follow-up assignment at creation, the
//! Active -> Closed/Lost state machine, and the close-ratio / count /
//! follow-up-due reporting over the lead table.
//!
//! It performs no I/O of its own. Persistence goes through the [`store::LeadStore`]
//! trait (implemented by `leadpipe-db` for PostgreSQL and by
//! [`store::MemoryLeadStore`] for tests), and every time-dependent operation
//! takes an explicit `now` so callers control the clock.

pub mod error;
pub mod followup;
pub mod ids;
pub mod lead;
pub mod lifecycle;
pub mod metrics;
pub mod reminder;
pub mod store;
pub mod types;
