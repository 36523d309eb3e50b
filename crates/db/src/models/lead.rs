//! Row model for the `leads` table.

use sqlx::FromRow;

use leadpipe_core::error::LeadError;
use leadpipe_core::lead::{Lead, LeadSource, LeadStatus, QuoteStatus, Temperature};
use leadpipe_core::types::Timestamp;

/// A row from the `leads` table. Enumerated columns stay TEXT here and are
/// parsed into the core enums on the way out; a value outside the enumerated
/// set means the row was corrupted out-of-band and surfaces as a store
/// failure, not as a silently dropped lead.
#[derive(Debug, Clone, FromRow)]
pub struct LeadRow {
    pub id: String,
    pub name: String,
    pub source: String,
    pub contact_method: String,
    pub quote_status: String,
    pub lead_status: String,
    pub quoted_price: Option<f64>,
    pub created_at: Timestamp,
    pub next_followup: Timestamp,
    pub status: String,
}

fn parse_column<T>(
    id: &str,
    column: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, LeadError> {
    parse(value).ok_or_else(|| {
        LeadError::Store(format!(
            "corrupted lead row {id}: column {column} holds '{value}'"
        ))
    })
}

impl From<&Lead> for LeadRow {
    fn from(lead: &Lead) -> Self {
        LeadRow {
            id: lead.id.clone(),
            name: lead.name.clone(),
            source: lead.source.as_str().to_string(),
            contact_method: lead.contact_method.clone(),
            quote_status: lead.quote_status.as_str().to_string(),
            lead_status: lead.lead_status.as_str().to_string(),
            quoted_price: lead.quoted_price,
            created_at: lead.created_at,
            next_followup: lead.next_followup,
            status: lead.status.as_str().to_string(),
        }
    }
}

impl TryFrom<LeadRow> for Lead {
    type Error = LeadError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let source = parse_column(&row.id, "source", &row.source, LeadSource::parse)?;
        let quote_status =
            parse_column(&row.id, "quote_status", &row.quote_status, QuoteStatus::parse)?;
        let lead_status =
            parse_column(&row.id, "lead_status", &row.lead_status, Temperature::parse)?;
        let status = parse_column(&row.id, "status", &row.status, LeadStatus::parse)?;

        Ok(Lead {
            id: row.id,
            name: row.name,
            source,
            contact_method: row.contact_method,
            quote_status,
            lead_status,
            quoted_price: row.quoted_price,
            created_at: row.created_at,
            next_followup: row.next_followup,
            status,
        })
    }
}
