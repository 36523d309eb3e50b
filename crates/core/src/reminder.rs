//! Reminder digest and daily report text composition.
//!
//! Pure formatting over already-selected leads; delivery (email, chat,
//! logging sink) is the caller's concern.

use chrono::NaiveDate;

use crate::lead::Lead;

/// Message returned when no lead is due for contact.
pub const EMPTY_DIGEST_MESSAGE: &str = "No leads need follow-up at this time.";

/// How deadline timestamps render inside the digest.
const DIGEST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compose the follow-up reminder digest: one line per due lead with its
/// name, temperature, and deadline.
pub fn compose_reminder_digest(leads: &[Lead]) -> String {
    if leads.is_empty() {
        return EMPTY_DIGEST_MESSAGE.to_string();
    }

    let mut message = String::from("Reminder: Follow up with these leads:\n");
    for lead in leads {
        message.push_str(&format!(
            "- {} ({}): Follow up due at {}\n",
            lead.name,
            lead.lead_status,
            lead.next_followup.format(DIGEST_TIME_FORMAT)
        ));
    }
    message
}

/// Compose the daily report for `date`: new-lead volume and the overall
/// close ratio, two decimal places.
pub fn compose_daily_report(date: NaiveDate, new_leads: i64, close_ratio: f64) -> String {
    format!(
        "Daily Report - {}\nNew Leads: {new_leads}\nClose Ratio: {close_ratio:.2}%\n",
        date.format("%Y-%m-%d")
    )
}
