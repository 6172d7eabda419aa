//! Reminder emission for overdue and due-today companies.
//!
//! The crate's obligation toward the notification collaborator ends at
//! producing [`Reminder`] payloads; delivery, retries, and permission
//! handling live outside.

use crate::aggregate::{due_today_companies, overdue_companies};
use crate::store::Store;
use crate::types::StoreState;
use chrono::{Local, NaiveDate};
use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use serde::Serialize;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Icon shipped with the presentation layer for reminder toasts.
pub const REMINDER_ICON: &str = "notification-icon.png";

/// Interval between reminder sweeps in production.
pub const REMINDER_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// A single notification payload for the delivery collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub title: String,
    pub body: String,
    pub icon: String,
}

/// One reminder per overdue company and one per due-today company.
///
/// Read-only and idempotent: firing again while a condition still holds
/// produces the same reminders again; suppression is the delivery
/// collaborator's concern, if anyone's.
pub fn due_reminders(state: &StoreState, today: NaiveDate) -> Vec<Reminder> {
    let mut reminders = Vec::new();

    for company in overdue_companies(state, today) {
        reminders.push(Reminder {
            title: "Overdue Communication".to_string(),
            body: format!("Communication with {} is overdue", company.name),
            icon: REMINDER_ICON.to_string(),
        });
    }

    for company in due_today_companies(state, today) {
        reminders.push(Reminder {
            title: "Communication Due Today".to_string(),
            body: format!("Communication with {} is due today", company.name),
            icon: REMINDER_ICON.to_string(),
        });
    }

    reminders
}

/// Periodic reminder sweep over a shared store handle.
///
/// Sweeps once immediately on start and then on every tick. This is the
/// one place in the crate that reads the wall clock; everything below it
/// takes an explicit evaluation date.
pub struct ReminderScheduler {
    shutdown: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    /// Spawn the sweep thread. Batches of reminders arrive on the returned
    /// receiver; sweeps that find nothing (or run while notifications are
    /// disabled in settings) send nothing.
    pub fn start(store: Arc<Store>, interval: Duration) -> (Self, Receiver<Vec<Reminder>>) {
        let (batch_tx, batch_rx) = bounded(32);
        let (shutdown_tx, shutdown_rx) = bounded(1);
        let ticker = tick(interval);

        let handle = thread::spawn(move || {
            sweep(&store, &batch_tx);

            loop {
                select! {
                    recv(ticker) -> _ => sweep(&store, &batch_tx),
                    recv(shutdown_rx) -> _ => break,
                }
            }
        });

        (
            Self {
                shutdown: shutdown_tx,
                handle: Some(handle),
            },
            batch_rx,
        )
    }

    /// Stop the sweep thread and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.shutdown.try_send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn sweep(store: &Store, batches: &Sender<Vec<Reminder>>) {
    let state = store.state();
    if !state.settings.notifications_enabled {
        return;
    }

    let today = Local::now().date_naive();
    let reminders = due_reminders(&state, today);
    if reminders.is_empty() {
        return;
    }

    if batches.try_send(reminders).is_err() {
        tracing::warn!("reminder batch dropped: receiver full or gone");
    }
}
