//! Dashboard counts and company list queries.

use crate::status::{company_next_due, company_status};
use crate::types::{Company, StoreState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary card counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub total_companies: usize,
    pub overdue: usize,
    pub due_today: usize,
    pub total_communications: usize,
}

/// Counts for the dashboard summary cards at `today`.
pub fn dashboard_counts(state: &StoreState, today: NaiveDate) -> DashboardCounts {
    DashboardCounts {
        total_companies: state.companies.len(),
        overdue: overdue_companies(state, today).len(),
        due_today: due_today_companies(state, today).len(),
        total_communications: state.communications.len(),
    }
}

/// Companies whose status at `today` is overdue.
pub fn overdue_companies<'a>(state: &'a StoreState, today: NaiveDate) -> Vec<&'a Company> {
    state
        .companies
        .iter()
        .filter(|c| company_status(state, c.id, today).is_some_and(|s| s.is_overdue))
        .collect()
}

/// Companies whose status at `today` is due today.
pub fn due_today_companies<'a>(state: &'a StoreState, today: NaiveDate) -> Vec<&'a Company> {
    state
        .companies
        .iter()
        .filter(|c| company_status(state, c.id, today).is_some_and(|s| s.is_due_today))
        .collect()
}

/// Status bucket for the company list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Overdue,
    DueToday,
}

/// Sort key for the company list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    Name,
    #[default]
    NextCommunication,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Search, filter, and sort parameters for the dashboard company table.
#[derive(Clone, Debug, Default)]
pub struct CompanyQuery {
    /// Case-insensitive substring match on the company name.
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortKey,
    pub direction: SortDirection,
}

impl CompanyQuery {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn sorted_by(mut self, sort: SortKey, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }
}

/// Placeholder sort date for companies with no history. It precedes every
/// real due date, so those companies lead the ascending
/// next-communication order as the most urgent.
fn epoch_placeholder() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date")
}

/// Filter and sort the company list for display.
pub fn filter_companies<'a>(
    state: &'a StoreState,
    query: &CompanyQuery,
    today: NaiveDate,
) -> Vec<&'a Company> {
    let needle = query.search.trim().to_lowercase();

    let mut rows: Vec<&Company> = state
        .companies
        .iter()
        .filter(|company| {
            if !needle.is_empty() && !company.name.to_lowercase().contains(&needle) {
                return false;
            }
            let status = company_status(state, company.id, today);
            match query.status {
                StatusFilter::All => true,
                StatusFilter::Overdue => status.is_some_and(|s| s.is_overdue),
                StatusFilter::DueToday => status.is_some_and(|s| s.is_due_today),
            }
        })
        .collect();

    match query.sort {
        SortKey::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::NextCommunication => rows.sort_by_key(|company| {
            company_next_due(state, company).unwrap_or_else(epoch_placeholder)
        }),
    }

    if query.direction == SortDirection::Descending {
        rows.reverse();
    }

    rows
}
