//! # Cadence
//!
//! A single-user communication cadence tracker: companies carry a periodic
//! communication obligation, logged communications anchor the due-date
//! math, and everything a dashboard, calendar, or report needs is derived
//! on read.
//!
//! ## Core Concepts
//!
//! - **Record store**: three entity collections behind one typed mutation
//!   dispatch; every change swaps a complete state snapshot
//! - **Status derivation**: pure overdue / due-today / on-track
//!   classification at an explicit evaluation date
//! - **Aggregation**: dashboard counts and queries, calendar buckets,
//!   tallies and trends, reminder payloads
//! - **Snapshots**: every mutation mirrors the store to a JSON snapshot;
//!   export and import round-trip the same document
//!
//! ## Example
//!
//! ```ignore
//! use cadence::{NewCommunication, NewCompany, Store, StoreConfig};
//! use chrono::Local;
//!
//! let store = Store::open_or_create(StoreConfig {
//!     path: "./my-tracker".into(),
//!     ..Default::default()
//! })?;
//!
//! let today = Local::now().date_naive();
//! let company = store.add_company(NewCompany::new("Acme Corp").with_periodicity(14))?;
//! store.log_communication(
//!     NewCommunication::new(company.id, today, "Email").with_notes("Kickoff call"),
//! )?;
//!
//! let status = store.company_status(company.id, today);
//! let report = store.summary_report(today);
//! ```

pub mod aggregate;
pub mod error;
pub mod reminders;
pub mod reports;
pub mod seed;
pub mod snapshot;
pub mod state;
pub mod status;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use aggregate::{
    communication_stats, dashboard_counts, due_today_companies, engagement_trend,
    filter_companies, month_view, overdue_companies, CalendarEvent, CommunicationStats,
    CompanyQuery, DashboardCounts, DayEvents, EventKind, MonthView, SortDirection, SortKey,
    StatusFilter, ENGAGEMENT_MONTHS, MAX_VISIBLE_EVENTS,
};
pub use error::{Result, TrackerError};
pub use reminders::{due_reminders, Reminder, ReminderScheduler, REMINDER_ICON, REMINDER_INTERVAL};
pub use reports::{detailed_report, summary_report, DETAILED_REPORT_HEADER, SUMMARY_REPORT_HEADER};
pub use seed::seed_state;
pub use snapshot::{parse_snapshot, to_json, SNAPSHOT_FILE};
pub use state::{apply_mutation, Mutation};
pub use status::{
    classify, company_communications, company_next_due, company_status, next_due_date,
    CompanyStatus, DueStatus,
};
pub use store::{Store, StoreConfig};
pub use subscriptions::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, SubscriptionManager,
};
pub use types::*;
