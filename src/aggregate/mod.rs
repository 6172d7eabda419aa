//! Derived views over the record store: dashboard counts and queries,
//! calendar buckets, and analytics tallies.

pub mod analytics;
pub mod calendar;
pub mod dashboard;

pub use analytics::{communication_stats, engagement_trend, CommunicationStats, ENGAGEMENT_MONTHS};
pub use calendar::{month_view, CalendarEvent, DayEvents, EventKind, MonthView, MAX_VISIBLE_EVENTS};
pub use dashboard::{
    dashboard_counts, due_today_companies, filter_companies, overdue_companies, CompanyQuery,
    DashboardCounts, SortDirection, SortKey, StatusFilter,
};
