//! Follow-up scheduling policy.
//!
//! Temperature maps to a fixed contact cadence. The mapping is the whole
//! policy; there is no per-lead override.

use chrono::Duration;

use crate::lead::Temperature;
use crate::types::Timestamp;

/// Hot leads are contacted again within 3 hours.
pub const HOT_FOLLOWUP_HOURS: i64 = 3;

/// Warm leads within a day. This is also the cadence any future temperature
/// value should default to.
pub const WARM_FOLLOWUP_HOURS: i64 = 24;

/// Cold leads within three days.
pub const COLD_FOLLOWUP_HOURS: i64 = 72;

/// The follow-up offset for a temperature.
pub fn followup_offset(temperature: Temperature) -> Duration {
    let hours = match temperature {
        Temperature::Hot => HOT_FOLLOWUP_HOURS,
        Temperature::Warm => WARM_FOLLOWUP_HOURS,
        Temperature::Cold => COLD_FOLLOWUP_HOURS,
    };
    Duration::hours(hours)
}

/// Next follow-up deadline for a lead created (or evaluated) at `now`.
///
/// Pure: given the same `now` and temperature the result is exact, so tests
/// inject a fixed clock value.
pub fn calculate_next_followup(now: Timestamp, temperature: Temperature) -> Timestamp {
    now + followup_offset(temperature)
}
