//! Flat delimited report generation.
//!
//! Both reports are comma-delimited text with a fixed header row, consumed
//! by spreadsheet tools; header text and column order are a stable contract.

use crate::status::{classify, next_due_date};
use crate::types::StoreState;
use chrono::NaiveDate;
use indexmap::IndexMap;

/// Header row of the detailed communication log.
pub const DETAILED_REPORT_HEADER: &str =
    "Company,Communication Date,Method,Notes,Status,Next Due Date";

/// Header row of the per-company summary.
pub const SUMMARY_REPORT_HEADER: &str =
    "Company,Total Communications,Last Communication,Next Due Date,Status,Communication Periodicity (days)";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Commas in free text would break the column layout; swap them for
/// semicolons. Nothing else is escaped, so embedded newlines pass through.
fn sanitize(text: &str) -> String {
    text.replace(',', ";")
}

/// Detailed log: one row per communication, grouped by company in
/// first-seen scan order; within a group rows keep the log's insertion
/// order. Rows whose company no longer resolves are dropped.
///
/// Each row is classified individually: its own date plus the company's
/// periodicity decide the status column, independent of the company-level
/// status.
pub fn detailed_report(state: &StoreState, today: NaiveDate) -> String {
    let mut groups: IndexMap<&str, Vec<String>> = IndexMap::new();

    for comm in &state.communications {
        let Some(company) = state.company(comm.company_id) else {
            continue;
        };

        let due = next_due_date(comm.date, company.communication_periodicity);
        let row = format!(
            "{},{},{},{},{},{}",
            company.name,
            comm.date.format(DATE_FORMAT),
            comm.method,
            sanitize(&comm.notes),
            classify(due, today),
            due.format(DATE_FORMAT),
        );
        groups.entry(company.name.as_str()).or_default().push(row);
    }

    let mut out = String::from(DETAILED_REPORT_HEADER);
    out.push('\n');
    for rows in groups.values() {
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
    }
    out
}

/// Summary: one row per company in collection order.
///
/// The last communication is the one with the maximum date; the
/// strictly-greater comparison keeps the first-encountered entry on ties.
/// A company without history reports `Never`, a next due date of `today`,
/// and the `No Communications` status.
pub fn summary_report(state: &StoreState, today: NaiveDate) -> String {
    let mut out = String::from(SUMMARY_REPORT_HEADER);
    out.push('\n');

    for company in &state.companies {
        let comms: Vec<_> = state
            .communications
            .iter()
            .filter(|c| c.company_id == company.id)
            .collect();

        let last = comms
            .iter()
            .copied()
            .reduce(|best, cur| if cur.date > best.date { cur } else { best });

        let (last_label, due, status_label) = match last {
            Some(last) => {
                let due = next_due_date(last.date, company.communication_periodicity);
                (
                    last.date.format(DATE_FORMAT).to_string(),
                    due,
                    classify(due, today).to_string(),
                )
            }
            None => (
                String::from("Never"),
                today,
                String::from("No Communications"),
            ),
        };

        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            company.name,
            comms.len(),
            last_label,
            due.format(DATE_FORMAT),
            status_label,
            company.communication_periodicity,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Communication, CommunicationId, Company, CompanyId};
    use chrono::Days;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn company(id: u64, name: &str, periodicity: u32) -> Company {
        Company {
            id: CompanyId(id),
            name: name.into(),
            communication_periodicity: periodicity,
            linkedin_profile: String::new(),
            emails: String::new(),
            phone_numbers: String::new(),
            comments: String::new(),
        }
    }

    fn comm(id: u64, company_id: u64, date: NaiveDate, notes: &str) -> Communication {
        Communication {
            id: CommunicationId(id),
            company_id: CompanyId(company_id),
            date,
            method: "Email".into(),
            notes: notes.into(),
            status: None,
            response_date: None,
        }
    }

    #[test]
    fn test_detailed_report_groups_by_first_seen_company() {
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 30));
        state.companies.push(company(2, "Globex", 30));
        // Interleaved log: Globex first, then Acme, then Globex again.
        state.communications.push(comm(1, 2, day(2024, 3, 1), "a"));
        state.communications.push(comm(2, 1, day(2024, 3, 2), "b"));
        state.communications.push(comm(3, 2, day(2024, 3, 3), "c"));

        let report = detailed_report(&state, day(2024, 3, 10));
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], DETAILED_REPORT_HEADER);
        assert!(lines[1].starts_with("Globex,2024-03-01"));
        assert!(lines[2].starts_with("Globex,2024-03-03"));
        assert!(lines[3].starts_with("Acme,2024-03-02"));
    }

    #[test]
    fn test_detailed_report_drops_orphans() {
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 30));
        state.communications.push(comm(1, 1, day(2024, 3, 1), ""));
        state.communications.push(comm(2, 99, day(2024, 3, 2), ""));

        let report = detailed_report(&state, day(2024, 3, 10));
        assert_eq!(report.lines().count(), 2); // header + one row
    }

    #[test]
    fn test_notes_commas_become_semicolons() {
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 30));
        state
            .communications
            .push(comm(1, 1, day(2024, 3, 1), "pricing, terms, and dates"));

        let report = detailed_report(&state, day(2024, 3, 10));
        assert!(report.contains("pricing; terms; and dates"));

        // Exactly six columns per row despite the free text.
        let row = report.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), 6);
    }

    #[test]
    fn test_detailed_rows_classified_per_event() {
        let today = day(2024, 3, 20);
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 10));
        state.communications.push(comm(1, 1, day(2024, 3, 1), "")); // due 3/11
        state.communications.push(comm(2, 1, day(2024, 3, 10), "")); // due 3/20
        state.communications.push(comm(3, 1, day(2024, 3, 15), "")); // due 3/25

        let report = detailed_report(&state, today);
        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[1].contains(",Overdue,2024-03-11"));
        assert!(lines[2].contains(",Due Today,2024-03-20"));
        assert!(lines[3].contains(",On Track,2024-03-25"));
    }

    #[test]
    fn test_summary_report_rows() {
        let today = day(2024, 6, 21);
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 15));
        state.companies.push(company(2, "Globex", 10));
        state
            .communications
            .push(comm(1, 1, today - Days::new(20), ""));
        state
            .communications
            .push(comm(2, 1, today - Days::new(40), ""));

        let report = summary_report(&state, today);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], SUMMARY_REPORT_HEADER);
        assert_eq!(lines[1], "Acme,2,2024-06-01,2024-06-16,Overdue,15");
        assert_eq!(
            lines[2],
            "Globex,0,Never,2024-06-21,No Communications,10"
        );
    }

    #[test]
    fn test_summary_last_communication_tie_keeps_first() {
        let today = day(2024, 6, 21);
        let date = day(2024, 6, 1);
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 15));
        let mut first = comm(1, 1, date, "first");
        first.method = "Phone Call".into();
        state.communications.push(first);
        state.communications.push(comm(2, 1, date, "second"));

        // Both entries share the max date; the fold must not replace the
        // first with the second.
        let report = summary_report(&state, today);
        assert!(report.lines().nth(1).unwrap().contains("Acme,2,2024-06-01"));
    }

    #[test]
    fn test_report_completeness() {
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 30));
        state.companies.push(company(2, "Globex", 30));
        for i in 0..7 {
            state
                .communications
                .push(comm(i + 1, 1 + (i % 2), day(2024, 3, 1 + i as u32), ""));
        }
        state.communications.push(comm(99, 42, day(2024, 3, 9), ""));

        let report = detailed_report(&state, day(2024, 3, 10));
        let resolvable = state
            .communications
            .iter()
            .filter(|c| state.company(c.company_id).is_some())
            .count();
        assert_eq!(report.lines().count() - 1, resolvable);
    }
}
