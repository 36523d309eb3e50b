//! Lead lifecycle engine: intake validation, creation, and the
//! Active -> Closed/Lost state machine.

use serde::Deserialize;

use crate::error::LeadError;
use crate::followup::calculate_next_followup;
use crate::ids::generate_lead_id;
use crate::lead::{Lead, LeadSource, LeadStatus, QuoteStatus, Temperature};
use crate::store::LeadStore;
use crate::types::Timestamp;

/// Id generations attempted before a collision is surfaced to the caller.
/// Bounded so a pathological clock cannot spin the create loop forever.
const MAX_ID_ATTEMPTS: u32 = 3;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Valid target states reachable from `from`.
///
/// Closed and Lost are terminal and return an empty slice; there is no way
/// back to Active and no edge between the terminal states.
pub fn valid_transitions(from: LeadStatus) -> &'static [LeadStatus] {
    match from {
        LeadStatus::Active => &[LeadStatus::Closed, LeadStatus::Lost],
        LeadStatus::Closed | LeadStatus::Lost => &[],
    }
}

/// Whether `from -> to` is an edge of the state machine.
pub fn can_transition(from: LeadStatus, to: LeadStatus) -> bool {
    valid_transitions(from).contains(&to)
}

// ---------------------------------------------------------------------------
// Intake validation
// ---------------------------------------------------------------------------

/// Raw intake fields as collected by a presentation layer. Strings are
/// validated into the typed field set by [`validate`]; nothing here is
/// trusted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub source: String,
    pub contact_method: String,
    pub quote_status: String,
    pub lead_status: String,
    pub quoted_price: Option<f64>,
}

/// The validated, typed field set of a [`NewLead`].
#[derive(Debug, Clone)]
pub struct ValidatedLead {
    pub name: String,
    pub source: LeadSource,
    pub contact_method: String,
    pub quote_status: QuoteStatus,
    pub lead_status: Temperature,
    pub quoted_price: Option<f64>,
}

fn required(field: &'static str, value: &str) -> Result<String, LeadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeadError::Validation {
            field,
            message: "must not be empty".into(),
        });
    }
    Ok(trimmed.to_string())
}

fn member_of<T>(
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

/// Validate intake fields, naming the first offending field on failure.
pub fn validate(input: &NewLead) -> Result<ValidatedLead, LeadError> {
    let name = required("name", &input.name)?;
    let source = member_of("source", &input.source, LeadSource::parse, LeadSource::LABELS)?;
    let contact_method = required("contact_method", &input.contact_method)?;
    let quote_status = member_of(
        "quote_status",
        &input.quote_status,
        QuoteStatus::parse,
        QuoteStatus::LABELS,
    )?;
    let lead_status = member_of(
        "lead_status",
        &input.lead_status,
        Temperature::parse,
        Temperature::LABELS,
    )?;

    if let Some(price) = input.quoted_price {
        if !price.is_finite() || price < 0.0 {
            return Err(LeadError::Validation {
                field: "quoted_price",
                message: format!("must be a non-negative amount, got {price}"),
            });
        }
    }

    Ok(ValidatedLead {
        name,
        source,
        contact_method,
        quote_status,
        lead_status,
        quoted_price: input.quoted_price,
    })
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Create a lead: validate, assign identity, stamp timestamps, persist.
///
/// The new lead starts Active with `created_at = now` and `next_followup`
/// from the follow-up policy. An id collision at insert triggers up to
/// [`MAX_ID_ATTEMPTS`] regenerations before [`LeadError::DuplicateId`] is
/// surfaced; any other store failure is surfaced immediately and is not
/// retried (re-running a non-idempotent insert is unsafe).
pub async fn create_lead<S: LeadStore + ?Sized>(
    store: &S,
    now: Timestamp,
    input: &NewLead,
) -> Result<Lead, LeadError> {
    let fields = validate(input)?;
    let next_followup = calculate_next_followup(now, fields.lead_status);

    let mut last_collision = String::new();
    for _ in 0..MAX_ID_ATTEMPTS {
        let lead = Lead {
            id: generate_lead_id(now),
            name: fields.name.clone(),
            source: fields.source,
            contact_method: fields.contact_method.clone(),
            quote_status: fields.quote_status,
            lead_status: fields.lead_status,
            quoted_price: fields.quoted_price,
            created_at: now,
            next_followup,
            status: LeadStatus::Active,
        };
        match store.insert(&lead).await {
            Ok(()) => return Ok(lead),
            Err(LeadError::DuplicateId(id)) => last_collision = id,
            Err(other) => return Err(other),
        }
    }
    Err(LeadError::DuplicateId(last_collision))
}

/// Transition a lead to a terminal state (Closed or Lost).
///
/// One-shot: a lead already in a terminal state yields
/// [`LeadError::InvalidTransition`] regardless of the target, which
/// distinguishes "already closed" from success. The store's compare-and-set
/// catches the race where two callers close the same lead concurrently.
pub async fn transition_status<S: LeadStore + ?Sized>(
    store: &S,
    id: &str,
    target: LeadStatus,
) -> Result<Lead, LeadError> {
    let current = store
        .find_by_id(id)
        .await?
        .ok_or_else(|| LeadError::NotFound(id.to_string()))?;

    if !can_transition(current.status, target) {
        return Err(LeadError::InvalidTransition {
            from: current.status,
            to: target,
        });
    }

    store.update_status(id, target).await
}
