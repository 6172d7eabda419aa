//! Calendar month bucketing of communications.

use crate::status::{classify, next_due_date, DueStatus};
use crate::types::{Communication, CommunicationId, StoreState};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Events shown per day cell; the rest collapse into an overflow count.
pub const MAX_VISIBLE_EVENTS: usize = 3;

/// Event-level classification, independent of the owning company's
/// company-level status: each event is judged by its own date plus the
/// company periodicity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The follow-up window for this event has already passed.
    Overdue,
    /// The follow-up for this event lands on the evaluation day.
    DueToday,
    /// Follow-up still ahead.
    Scheduled,
    /// The owning company no longer exists.
    Unknown,
}

/// One entry in a day cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub communication_id: CommunicationId,
    /// `None` when the owning company is gone.
    pub company_name: Option<String>,
    pub method: String,
    pub kind: EventKind,
}

/// A day cell: visible events plus the count that didn't fit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEvents {
    pub date: NaiveDate,
    pub visible: Vec<CalendarEvent>,
    /// Events beyond [`MAX_VISIBLE_EVENTS`].
    pub hidden: usize,
}

/// The viewed month, one entry per calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayEvents>,
}

fn event_kind(state: &StoreState, comm: &Communication, today: NaiveDate) -> EventKind {
    let Some(company) = state.company(comm.company_id) else {
        return EventKind::Unknown;
    };

    let due = next_due_date(comm.date, company.communication_periodicity);
    match classify(due, today) {
        DueStatus::Overdue => EventKind::Overdue,
        DueStatus::DueToday => EventKind::DueToday,
        DueStatus::OnTrack => EventKind::Scheduled,
    }
}

/// Bucket communications into the viewed month by exact calendar date.
///
/// Events keep the log's insertion order within a day. Communications whose
/// company is gone stay on the calendar as [`EventKind::Unknown`] rather
/// than disappearing.
pub fn month_view(state: &StoreState, year: i32, month: u32, today: NaiveDate) -> MonthView {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return MonthView {
            year,
            month,
            days: Vec::new(),
        };
    };

    let days = first
        .iter_days()
        .take_while(|d| d.year() == year && d.month() == month)
        .map(|date| {
            let events: Vec<CalendarEvent> = state
                .communications
                .iter()
                .filter(|c| c.date == date)
                .map(|c| CalendarEvent {
                    communication_id: c.id,
                    company_name: state.company(c.company_id).map(|co| co.name.clone()),
                    method: c.method.clone(),
                    kind: event_kind(state, c, today),
                })
                .collect();

            let hidden = events.len().saturating_sub(MAX_VISIBLE_EVENTS);
            let mut visible = events;
            visible.truncate(MAX_VISIBLE_EVENTS);

            DayEvents {
                date,
                visible,
                hidden,
            }
        })
        .collect();

    MonthView { year, month, days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Company, CompanyId};

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

    fn comm(id: u64, company_id: u64, date: NaiveDate) -> Communication {
        Communication {
            id: CommunicationId(id),
            company_id: CompanyId(company_id),
            date,
            method: "Email".into(),
            notes: String::new(),
            status: None,
            response_date: None,
        }
    }

    #[test]
    fn test_month_has_all_days() {
        let state = StoreState::default();
        let view = month_view(&state, 2024, 2, day(2024, 2, 15));
        assert_eq!(view.days.len(), 29); // leap year
        assert_eq!(view.days[0].date, day(2024, 2, 1));
        assert_eq!(view.days[28].date, day(2024, 2, 29));
    }

    #[test]
    fn test_events_land_on_exact_dates_only() {
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 30));
        state.communications.push(comm(1, 1, day(2024, 3, 5)));
        state.communications.push(comm(2, 1, day(2024, 4, 5))); // other month

        let view = month_view(&state, 2024, 3, day(2024, 3, 10));
        let march_5 = &view.days[4];
        assert_eq!(march_5.visible.len(), 1);
        assert_eq!(march_5.visible[0].communication_id, CommunicationId(1));

        let total: usize = view.days.iter().map(|d| d.visible.len() + d.hidden).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_overflow_count_past_cap() {
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 30));
        for i in 0..5 {
            state.communications.push(comm(i + 1, 1, day(2024, 3, 5)));
        }

        let view = month_view(&state, 2024, 3, day(2024, 3, 10));
        let march_5 = &view.days[4];
        assert_eq!(march_5.visible.len(), MAX_VISIBLE_EVENTS);
        assert_eq!(march_5.hidden, 2);
        // Insertion order decides which events stay visible.
        assert_eq!(march_5.visible[0].communication_id, CommunicationId(1));
    }

    #[test]
    fn test_event_kinds_follow_event_date() {
        let today = day(2024, 3, 20);
        let mut state = StoreState::default();
        state.companies.push(company(1, "Acme", 10));
        state.communications.push(comm(1, 1, day(2024, 3, 1))); // due 3/11, passed
        state.communications.push(comm(2, 1, day(2024, 3, 10))); // due 3/20, today
        state.communications.push(comm(3, 1, day(2024, 3, 15))); // due 3/25, ahead

        let view = month_view(&state, 2024, 3, today);
        assert_eq!(view.days[0].visible[0].kind, EventKind::Overdue);
        assert_eq!(view.days[9].visible[0].kind, EventKind::DueToday);
        assert_eq!(view.days[14].visible[0].kind, EventKind::Scheduled);
    }

    #[test]
    fn test_orphan_event_is_kept_as_unknown() {
        let mut state = StoreState::default();
        state.communications.push(comm(1, 99, day(2024, 3, 5)));

        let view = month_view(&state, 2024, 3, day(2024, 3, 10));
        let event = &view.days[4].visible[0];
        assert_eq!(event.kind, EventKind::Unknown);
        assert!(event.company_name.is_none());
    }

    #[test]
    fn test_invalid_month_is_empty() {
        let state = StoreState::default();
        let view = month_view(&state, 2024, 13, day(2024, 3, 10));
        assert!(view.days.is_empty());
    }
}
