//! Due-date derivation over the record store.
//!
//! Everything here is a pure function of a [`StoreState`] and an explicit
//! evaluation date. Nothing reads the wall clock, so callers recompute on
//! every read and tests pin `today` wherever they like.

use crate::types::{Communication, Company, CompanyId, StoreState};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Company-level classification derived from the most recent communication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStatus {
    pub is_overdue: bool,
    pub is_due_today: bool,
}

/// Where a due date stands relative to the evaluation day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Overdue,
    DueToday,
    OnTrack,
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DueStatus::Overdue => "Overdue",
            DueStatus::DueToday => "Due Today",
            DueStatus::OnTrack => "On Track",
        };
        write!(f, "{label}")
    }
}

/// Due date for the follow-up to a communication logged on `last`.
pub fn next_due_date(last: NaiveDate, periodicity_days: u32) -> NaiveDate {
    last + Days::new(u64::from(periodicity_days))
}

/// Classify a due date against the evaluation day.
///
/// Strictly-after means overdue and same-day means due today, so the two
/// can never hold at once. Calendar-date comparison only.
pub fn classify(due: NaiveDate, today: NaiveDate) -> DueStatus {
    if today > due {
        DueStatus::Overdue
    } else if today == due {
        DueStatus::DueToday
    } else {
        DueStatus::OnTrack
    }
}

/// All communications for a company, most recent first.
///
/// The sort is stable, so entries sharing a date keep insertion order and
/// the earliest-logged of them holds the "most recent" slot.
pub fn company_communications(state: &StoreState, id: CompanyId) -> Vec<Communication> {
    let mut comms: Vec<Communication> = state
        .communications
        .iter()
        .filter(|c| c.company_id == id)
        .cloned()
        .collect();
    comms.sort_by(|a, b| b.date.cmp(&a.date));
    comms
}

/// Next due date for a company, `None` when it has no history.
pub fn company_next_due(state: &StoreState, company: &Company) -> Option<NaiveDate> {
    state
        .communications
        .iter()
        .filter(|c| c.company_id == company.id)
        .map(|c| c.date)
        .max()
        .map(|last| next_due_date(last, company.communication_periodicity))
}

/// Company-level status at `today`.
///
/// `None` for an unknown company id. A company with zero communications has
/// no baseline to measure from and is always overdue, never due today.
pub fn company_status(state: &StoreState, id: CompanyId, today: NaiveDate) -> Option<CompanyStatus> {
    let company = state.company(id)?;

    let Some(due) = company_next_due(state, company) else {
        return Some(CompanyStatus {
            is_overdue: true,
            is_due_today: false,
        });
    };

    let due_status = classify(due, today);
    Some(CompanyStatus {
        is_overdue: due_status == DueStatus::Overdue,
        is_due_today: due_status == DueStatus::DueToday,
    })
}
