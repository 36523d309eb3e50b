//! Lead identifier generation.

use rand::distr::Alphanumeric;
use rand::Rng;

use crate::types::Timestamp;

/// Fixed tag prefixing every lead id.
pub const LEAD_ID_PREFIX: &str = "LEAD";

/// Length of the random alphanumeric suffix.
const ID_SUFFIX_LEN: usize = 4;

/// Generate a lead id of the form `LEAD-YYYYMMDDHHMMSS-XXXX`.
///
/// The second-granularity time component keeps ids readable and roughly
/// sortable for operators; the random suffix makes two leads created within
/// the same second collide with probability 62^-4 rather than certainty.
/// Callers still handle [`crate::error::LeadError::DuplicateId`] from the
/// store and may regenerate.
pub fn generate_lead_id(now: Timestamp) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{LEAD_ID_PREFIX}-{}-{suffix}", now.format("%Y%m%d%H%M%S"))
}
