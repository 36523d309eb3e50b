//! Metrics and reporting over the lead table.
//!
//! Every operation reads through [`LeadStore`] and propagates store failures
//! as [`LeadError::Store`]; a broken backend is never reported as "no data".
//! Time-dependent reports take `now` explicitly.

use std::collections::HashMap;

use chrono::{Days, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::LeadError;
use crate::lead::{Lead, LeadSource, LeadStatus, Temperature};
use crate::reminder::compose_daily_report;
use crate::store::{LeadFilter, LeadStore};
use crate::types::Timestamp;

/// Sources reported as first-class KPIs by [`source_close_ratios`].
/// Everything outside this set collapses into the `other` bucket.
pub const KPI_SOURCES: &[LeadSource] = &[LeadSource::MediaAlpha, LeadSource::SmartFinancial];

// ---------------------------------------------------------------------------
// Close ratios
// ---------------------------------------------------------------------------

/// Percentage of leads in `leads` that reached Closed. An empty partition is
/// 0.0 by definition, never a division error or NaN.
fn ratio_where(leads: &[Lead], of_interest: impl Fn(&Lead) -> bool) -> f64 {
    let mut total = 0u64;
    let mut closed = 0u64;
    for lead in leads.iter().filter(|l| of_interest(l)) {
        total += 1;
        if lead.status == LeadStatus::Closed {
            closed += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        closed as f64 / total as f64 * 100.0
    }
}

/// Close ratio scoped to `source`, or global when `None`.
pub async fn close_ratio<S: LeadStore + ?Sized>(
    store: &S,
    source: Option<LeadSource>,
) -> Result<f64, LeadError> {
    let filter = LeadFilter {
        source,
        ..Default::default()
    };
    let leads = store.list_by(&filter).await?;
    Ok(ratio_where(&leads, |_| true))
}

/// The close-ratio KPI bundle: overall, each source in [`KPI_SOURCES`], and
/// one bucket for everything else.
#[derive(Debug, Clone, Serialize)]
pub struct SourceCloseRatios {
    pub overall: f64,
    pub media_alpha: f64,
    pub smart_financial: f64,
    pub other: f64,
}

/// Compute the KPI bundle from a single read so a store failure surfaces
/// once instead of skewing part of the bundle.
pub async fn source_close_ratios<S: LeadStore + ?Sized>(
    store: &S,
) -> Result<SourceCloseRatios, LeadError> {
    let leads = store.list_all().await?;
    Ok(SourceCloseRatios {
        overall: ratio_where(&leads, |_| true),
        media_alpha: ratio_where(&leads, |l| l.source == LeadSource::MediaAlpha),
        smart_financial: ratio_where(&leads, |l| l.source == LeadSource::SmartFinancial),
        other: ratio_where(&leads, |l| !KPI_SOURCES.contains(&l.source)),
    })
}

// ---------------------------------------------------------------------------
// Lead counts
// ---------------------------------------------------------------------------

/// Intake volume and pipeline breakdowns for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct LeadCounts {
    /// Leads created during the current local calendar day.
    pub today_count: i64,
    /// Leads created during the previous local calendar day.
    pub yesterday_count: i64,
    pub status_counts: HashMap<LeadStatus, i64>,
    pub lead_status_counts: HashMap<Temperature, i64>,
}

/// Counts of leads created today and yesterday (local calendar days derived
/// from `now`), plus breakdowns by lifecycle status and temperature.
pub async fn lead_counts<S: LeadStore + ?Sized>(
    store: &S,
    now: Timestamp,
) -> Result<LeadCounts, LeadError> {
    let today = now.with_timezone(&Local).date_naive();
    let yesterday = today - Days::new(1);

    let today_count = count_created_on(store, today).await?;
    let yesterday_count = count_created_on(store, yesterday).await?;
    let status_counts = store.count_by_status().await?;
    let lead_status_counts = store.count_by_temperature().await?;

    Ok(LeadCounts {
        today_count,
        yesterday_count,
        status_counts,
        lead_status_counts,
    })
}

async fn count_created_on<S: LeadStore + ?Sized>(
    store: &S,
    date: NaiveDate,
) -> Result<i64, LeadError> {
    let (from, to) = local_day_bounds(date);
    let filter = LeadFilter {
        created_from: Some(from),
        created_to: Some(to),
        ..Default::default()
    };
    Ok(store.list_by(&filter).await?.len() as i64)
}

/// UTC instants of a local calendar day's `[00:00:00, 23:59:59]` window.
fn local_day_bounds(date: NaiveDate) -> (Timestamp, Timestamp) {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is a valid time");
    (
        local_to_utc(date.and_time(NaiveTime::MIN)),
        local_to_utc(date.and_time(end_of_day)),
    )
}

fn local_to_utc(naive: NaiveDateTime) -> Timestamp {
    match naive.and_local_timezone(Local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        // DST fold: take the earlier reading.
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // DST gap swallowed this wall-clock time; read it as UTC.
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

// ---------------------------------------------------------------------------
// Follow-up selection
// ---------------------------------------------------------------------------

/// Active leads whose follow-up deadline is at or before `now`, soonest-due
/// first. Closed and Lost leads are excluded whatever their deadline.
pub async fn followup_due<S: LeadStore + ?Sized>(
    store: &S,
    now: Timestamp,
) -> Result<Vec<Lead>, LeadError> {
    let filter = LeadFilter {
        status: Some(LeadStatus::Active),
        ..Default::default()
    };
    let mut due: Vec<Lead> = store
        .list_by(&filter)
        .await?
        .into_iter()
        .filter(|lead| lead.next_followup <= now)
        .collect();
    due.sort_by_key(|lead| lead.next_followup);
    Ok(due)
}

// ---------------------------------------------------------------------------
// Daily report
// ---------------------------------------------------------------------------

/// Compose the daily report for the local calendar day preceding `now`:
/// new-lead volume for that day plus the overall close ratio.
pub async fn daily_report<S: LeadStore + ?Sized>(
    store: &S,
    now: Timestamp,
) -> Result<String, LeadError> {
    let yesterday = now.with_timezone(&Local).date_naive() - Days::new(1);
    let new_leads = count_created_on(store, yesterday).await?;
    let overall = close_ratio(store, None).await?;
    Ok(compose_daily_report(yesterday, new_leads, overall))
}
