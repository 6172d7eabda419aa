//! Property tests for the derivation and store invariants.

use cadence::{
    apply_mutation, classify, company_status, detailed_report, next_due_date, parse_snapshot,
    to_json, Communication, CommunicationId, Company, CompanyId, DueStatus, Mutation, Settings,
    StoreState,
};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

prop_compose! {
    fn arb_date()(year in 2020i32..2026, month in 1u32..=12, day in 1u32..=28) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }
}

/// A store state with 1..6 companies and up to 20 communications, some of
/// which may reference companies that don't exist.
fn arb_state() -> impl Strategy<Value = StoreState> {
    let companies = prop::collection::vec(("[A-Za-z][A-Za-z ]{0,11}", 1u32..365), 1..6);
    let comms = prop::collection::vec((0u64..8, arb_date(), any::<bool>()), 0..20);

    (companies, comms).prop_map(|(companies, comms)| {
        let companies: Vec<Company> = companies
            .into_iter()
            .enumerate()
            .map(|(i, (name, periodicity))| Company {
                id: CompanyId(i as u64 + 1),
                name,
                communication_periodicity: periodicity,
                linkedin_profile: String::new(),
                emails: String::new(),
                phone_numbers: String::new(),
                comments: String::new(),
            })
            .collect();

        let communications = comms
            .into_iter()
            .enumerate()
            .map(|(i, (company_ref, date, responded))| Communication {
                id: CommunicationId(i as u64 + 1),
                company_id: CompanyId(company_ref + 1),
                date,
                method: "Email".to_string(),
                notes: String::new(),
                status: None,
                response_date: responded.then(|| date + Days::new(2)),
            })
            .collect();

        StoreState {
            companies,
            communication_methods: Vec::new(),
            communications,
            settings: Settings::default(),
        }
    })
}

proptest! {
    /// Deleting a company never leaves a communication referencing it.
    #[test]
    fn prop_cascade_invariant(state in arb_state()) {
        let victim = state.companies[0].id;
        let next = apply_mutation(state, Mutation::DeleteCompany(victim)).unwrap();

        prop_assert!(next.communications.iter().all(|c| c.company_id != victim));
        prop_assert!(next.company(victim).is_none());
    }

    /// Overdue and due-today are never both set, and a company without
    /// history is always overdue.
    #[test]
    fn prop_status_flags_are_exclusive(state in arb_state(), today in arb_date()) {
        for company in &state.companies {
            let status = company_status(&state, company.id, today).unwrap();
            prop_assert!(!(status.is_overdue && status.is_due_today));

            let has_history = state
                .communications
                .iter()
                .any(|c| c.company_id == company.id);
            if !has_history {
                prop_assert!(status.is_overdue);
                prop_assert!(!status.is_due_today);
            }
        }
    }

    /// A longer periodicity only ever moves the due date later: it can
    /// never push an on-track company into overdue.
    #[test]
    fn prop_monotonic_due_date(
        last in arb_date(),
        today in arb_date(),
        shorter in 1u32..365,
        extension in 0u32..365,
    ) {
        let longer = shorter + extension;
        let near = next_due_date(last, shorter);
        let far = next_due_date(last, longer);
        prop_assert!(far >= near);

        if classify(near, today) == DueStatus::OnTrack {
            prop_assert_eq!(classify(far, today), DueStatus::OnTrack);
        }
    }

    /// Export then import restores the identical state.
    #[test]
    fn prop_snapshot_round_trip(state in arb_state()) {
        let raw = to_json(&state).unwrap();
        let restored = parse_snapshot(&raw).unwrap();
        prop_assert_eq!(state, restored);
    }

    /// The detailed report has exactly one row per communication whose
    /// company resolves.
    #[test]
    fn prop_report_completeness(state in arb_state(), today in arb_date()) {
        let resolvable = state
            .communications
            .iter()
            .filter(|c| state.company(c.company_id).is_some())
            .count();

        let report = detailed_report(&state, today);
        prop_assert_eq!(report.lines().count() - 1, resolvable);
    }
}
