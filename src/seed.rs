//! Built-in seed dataset used when no snapshot exists.

use crate::types::{
    Communication, CommunicationId, CommunicationMethod, Company, CompanyId, MethodId, Settings,
    StoreState,
};
use chrono::{Days, NaiveDate};

fn company(
    id: u64,
    name: &str,
    periodicity: u32,
    emails: &str,
    phone_numbers: &str,
) -> Company {
    Company {
        id: CompanyId(id),
        name: name.to_string(),
        communication_periodicity: periodicity,
        linkedin_profile: String::new(),
        emails: emails.to_string(),
        phone_numbers: phone_numbers.to_string(),
        comments: String::new(),
    }
}

fn method(id: u64, name: &str, description: &str, sequence: i64) -> CommunicationMethod {
    CommunicationMethod {
        id: MethodId(id),
        name: name.to_string(),
        description: description.to_string(),
        sequence,
        mandatory: false,
    }
}

fn communication(
    id: u64,
    company_id: u64,
    date: NaiveDate,
    method: &str,
    notes: &str,
) -> Communication {
    Communication {
        id: CommunicationId(id),
        company_id: CompanyId(company_id),
        date,
        method: method.to_string(),
        notes: notes.to_string(),
        status: None,
        response_date: None,
    }
}

/// Starter dataset: five companies on different cadences, the default
/// method set, and a short communication history anchored to `today`.
pub fn seed_state(today: NaiveDate) -> StoreState {
    let days_ago = |days: u64| today - Days::new(days);

    StoreState {
        companies: vec![
            company(
                1,
                "Tech Innovators Inc.",
                30,
                "contact@techinnovators.com",
                "+1-555-0123",
            ),
            company(
                2,
                "Global Solutions Ltd.",
                15,
                "info@globalsolutions.com",
                "+1-555-0124",
            ),
            company(
                3,
                "Digital Dynamics",
                45,
                "hello@digitaldynamics.com",
                "+1-555-0125",
            ),
            company(
                4,
                "Future Systems",
                20,
                "contact@futuresystems.com",
                "+1-555-0126",
            ),
            company(
                5,
                "Smart Analytics Co.",
                25,
                "info@smartanalytics.com",
                "+1-555-0127",
            ),
        ],
        communication_methods: vec![
            method(1, "LinkedIn Post", "Post on company LinkedIn page", 1),
            method(2, "LinkedIn Message", "Direct message on LinkedIn", 2),
            method(3, "Email", "Email communication", 3),
            method(4, "Phone Call", "Direct phone call", 4),
            method(5, "Other", "Other communication methods", 5),
        ],
        communications: vec![
            communication(
                1,
                1,
                days_ago(40),
                "Email",
                "Discussed Q4 project timeline and deliverables",
            ),
            communication(
                2,
                1,
                days_ago(10),
                "Video Conference",
                "Project status update and resource allocation review",
            ),
            communication(3, 2, days_ago(20), "Phone Call", "Contract renewal discussion"),
            communication(
                4,
                2,
                days_ago(5),
                "Email",
                "Follow-up on contract terms and pricing",
            ),
            communication(
                5,
                3,
                days_ago(60),
                "In-Person Meeting",
                "Initial project kickoff meeting",
            ),
            communication(6, 3, days_ago(15), "Video Conference", "Project milestone review"),
            communication(
                7,
                4,
                days_ago(25),
                "Email",
                "Product feature requirements discussion",
            ),
            communication(8, 4, days_ago(3), "Phone Call", "Urgent bug fix coordination"),
            communication(
                9,
                5,
                days_ago(30),
                "Video Conference",
                "Quarterly business review",
            ),
            communication(
                10,
                5,
                days_ago(1),
                "Email",
                "Follow-up on action items from QBR",
            ),
        ],
        settings: Settings::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let state = seed_state(today);

        assert_eq!(state.companies.len(), 5);
        assert_eq!(state.communication_methods.len(), 5);
        assert_eq!(state.communications.len(), 10);
    }

    #[test]
    fn test_seed_references_resolve() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let state = seed_state(today);

        for comm in &state.communications {
            assert!(state.company(comm.company_id).is_some());
        }
    }

    #[test]
    fn test_seed_dates_anchor_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let state = seed_state(today);

        let newest = state.communications.iter().map(|c| c.date).max().unwrap();
        assert_eq!(newest, today - Days::new(1));
    }
}
