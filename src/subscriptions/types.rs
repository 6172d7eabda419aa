//! Subscription types for live store updates.

use crate::types::{
    Communication, CommunicationId, CommunicationMethod, Company, CompanyId, MethodId, Settings,
};
use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping the subscriber.
    /// Default: 256
    pub buffer_size: usize,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            filter: SubscriptionFilter::default(),
        }
    }
}

/// Filter criteria for subscriptions.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// Include company events.
    pub include_companies: bool,

    /// Include communication method events.
    pub include_methods: bool,

    /// Include communication events.
    pub include_communications: bool,

    /// Include settings events.
    pub include_settings: bool,

    /// Include whole-store replacements (snapshot restore / import).
    pub include_snapshots: bool,
}

impl SubscriptionFilter {
    /// Subscribe to company events.
    pub fn companies() -> Self {
        Self {
            include_companies: true,
            ..Default::default()
        }
    }

    /// Subscribe to communication method events.
    pub fn methods() -> Self {
        Self {
            include_methods: true,
            ..Default::default()
        }
    }

    /// Subscribe to communication events.
    pub fn communications() -> Self {
        Self {
            include_communications: true,
            ..Default::default()
        }
    }

    /// Subscribe to settings events.
    pub fn settings() -> Self {
        Self {
            include_settings: true,
            ..Default::default()
        }
    }

    /// Subscribe to everything.
    pub fn all() -> Self {
        Self {
            include_companies: true,
            include_methods: true,
            include_communications: true,
            include_settings: true,
            include_snapshots: true,
        }
    }
}

/// Events emitted after each committed mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    // --- Company Events ---
    CompanyAdded {
        company: Company,
    },

    CompanyUpdated {
        company: Company,
    },

    /// A company was deleted, cascading to its communications.
    CompanyDeleted {
        id: CompanyId,
        cascaded_communications: usize,
    },

    // --- Method Events ---
    MethodAdded {
        method: CommunicationMethod,
    },

    MethodUpdated {
        method: CommunicationMethod,
    },

    MethodDeleted {
        id: MethodId,
    },

    // --- Communication Events ---
    CommunicationLogged {
        communication: Communication,
    },

    CommunicationUpdated {
        communication: Communication,
    },

    CommunicationDeleted {
        id: CommunicationId,
    },

    // --- Store-wide Events ---
    SettingsUpdated {
        settings: Settings,
    },

    /// The entire store was replaced (snapshot restore / import).
    StateLoaded,

    /// Subscription was dropped.
    Dropped {
        reason: DropReason,
    },
}

/// Why a subscription was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to manage a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<StoreEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<StoreEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<StoreEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<StoreEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
