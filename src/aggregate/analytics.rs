//! Communication tallies, response metrics, and engagement trends.

use crate::types::{CompanyId, StoreState};
use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;

/// Buckets in an engagement trend; index 0 is the current month.
pub const ENGAGEMENT_MONTHS: usize = 6;

/// Aggregate tallies over the communication log.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationStats {
    pub total_communications: usize,

    /// Counts per method name, keyed in first-occurrence order.
    pub by_method: IndexMap<String, u64>,

    /// Counts per company name, in company collection order. Companies
    /// without communications appear with a zero count.
    pub by_company: IndexMap<String, u64>,

    /// Mean days from a communication to its response, over responded
    /// entries. 0.0 when nothing has a response.
    pub average_response_days: f64,

    /// Percentage of communications with a tracked response. 0.0 when
    /// nothing has a response.
    pub success_rate: f64,
}

/// Tallies and response metrics for the analytics view.
pub fn communication_stats(state: &StoreState) -> CommunicationStats {
    let mut by_method: IndexMap<String, u64> = IndexMap::new();
    for comm in &state.communications {
        *by_method.entry(comm.method.clone()).or_insert(0) += 1;
    }

    let mut by_company: IndexMap<String, u64> = IndexMap::new();
    for company in &state.companies {
        let count = state
            .communications
            .iter()
            .filter(|c| c.company_id == company.id)
            .count() as u64;
        by_company.insert(company.name.clone(), count);
    }

    let mut responded = 0u64;
    let mut total_days = 0i64;
    for comm in &state.communications {
        if let Some(response) = comm.response_date {
            responded += 1;
            total_days += (response - comm.date).num_days();
        }
    }

    let total = state.communications.len();
    let (average_response_days, success_rate) = if responded > 0 && total > 0 {
        (
            total_days as f64 / responded as f64,
            responded as f64 / total as f64 * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    CommunicationStats {
        total_communications: total,
        by_method,
        by_company,
        average_response_days,
        success_rate,
    }
}

/// Communication counts for a company over the six most recent calendar
/// months; index 0 is `today`'s month.
///
/// Distance is modular over the month-of-year alone: an entry from the same
/// calendar month of a previous year lands in the current bucket, and
/// anything at modular distance `ENGAGEMENT_MONTHS` or more is excluded,
/// even if it is recent across a year boundary.
pub fn engagement_trend(
    state: &StoreState,
    company_id: CompanyId,
    today: NaiveDate,
) -> [u64; ENGAGEMENT_MONTHS] {
    let mut buckets = [0u64; ENGAGEMENT_MONTHS];

    for comm in state
        .communications
        .iter()
        .filter(|c| c.company_id == company_id)
    {
        let diff = ((today.month0() + 12 - comm.date.month0()) % 12) as usize;
        if diff < ENGAGEMENT_MONTHS {
            buckets[diff] += 1;
        }
    }

    buckets
}
