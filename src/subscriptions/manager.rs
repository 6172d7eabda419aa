//! Subscription manager for broadcasting store events.

use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId,
};

/// Internal subscription state.
struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<StoreEvent>,
}

impl Subscription {
    /// Try to send an event. Returns false if the buffer is full or the
    /// receiver is gone (subscriber will be dropped).
    fn try_send(&self, event: StoreEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }

    /// Check if this subscription wants an event.
    fn matches(&self, event: &StoreEvent) -> bool {
        let filter = &self.config.filter;
        match event {
            StoreEvent::CompanyAdded { .. }
            | StoreEvent::CompanyUpdated { .. }
            | StoreEvent::CompanyDeleted { .. } => filter.include_companies,

            StoreEvent::MethodAdded { .. }
            | StoreEvent::MethodUpdated { .. }
            | StoreEvent::MethodDeleted { .. } => filter.include_methods,

            StoreEvent::CommunicationLogged { .. }
            | StoreEvent::CommunicationUpdated { .. }
            | StoreEvent::CommunicationDeleted { .. } => filter.include_communications,

            StoreEvent::SettingsUpdated { .. } => filter.include_settings,

            StoreEvent::StateLoaded => filter.include_snapshots,

            // Lifecycle events always reach their subscriber.
            StoreEvent::Dropped { .. } => true,
        }
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new subscription and return a handle for receiving events.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size);

        let subscription = Subscription { config, sender };
        self.subscriptions.write().insert(id, subscription);

        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subscriptions.write();
        if let Some(sub) = subs.remove(&id) {
            // Send dropped event (best effort)
            let _ = sub.sender.try_send(StoreEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Broadcast an event to matching subscriptions. Subscribers that fail
    /// to receive are dropped.
    pub fn broadcast(&self, event: StoreEvent) {
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if sub.matches(&event) && !sub.try_send(event.clone()) {
                    to_remove.push(*id);
                }
            }
        }

        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    // Try to notify about the drop (might fail, that's ok)
                    let _ = sub.sender.try_send(StoreEvent::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Company, CompanyId, Settings};
    use std::time::Duration;

    fn company_event() -> StoreEvent {
        StoreEvent::CompanyAdded {
            company: Company {
                id: CompanyId(1),
                name: "Acme".into(),
                communication_periodicity: 14,
                linkedin_profile: String::new(),
                emails: String::new(),
                phone_numbers: String::new(),
                comments: String::new(),
            },
        }
    }

    #[test]
    fn test_subscribe_unsubscribe() {
        let manager = SubscriptionManager::new();

        let handle = manager.subscribe(SubscriptionConfig::default());
        assert_eq!(manager.subscription_count(), 1);

        manager.unsubscribe(handle.id);
        assert_eq!(manager.subscription_count(), 0);
    }

    #[test]
    fn test_broadcast_to_matching() {
        let manager = SubscriptionManager::new();

        let handle = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::companies(),
            ..Default::default()
        });

        manager.broadcast(company_event());

        let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        assert!(matches!(event, StoreEvent::CompanyAdded { .. }));
    }

    #[test]
    fn test_broadcast_filters_non_matching() {
        let manager = SubscriptionManager::new();

        let handle = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::communications(),
            ..Default::default()
        });

        manager.broadcast(company_event());
        manager.broadcast(StoreEvent::SettingsUpdated {
            settings: Settings::default(),
        });

        let result = handle.recv_timeout(Duration::from_millis(50));
        assert!(result.is_err());
    }

    #[test]
    fn test_all_filter_receives_everything() {
        let manager = SubscriptionManager::new();

        let handle = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::all(),
            ..Default::default()
        });

        manager.broadcast(company_event());
        manager.broadcast(StoreEvent::StateLoaded);

        assert!(matches!(
            handle.recv_timeout(Duration::from_millis(100)).unwrap(),
            StoreEvent::CompanyAdded { .. }
        ));
        assert!(matches!(
            handle.recv_timeout(Duration::from_millis(100)).unwrap(),
            StoreEvent::StateLoaded
        ));
    }

    #[test]
    fn test_drop_slow_subscriber() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig {
            buffer_size: 2,
            filter: SubscriptionFilter::companies(),
        });

        // Flood with events without draining the receiver.
        for _ in 0..10 {
            manager.broadcast(company_event());
        }

        assert_eq!(manager.subscription_count(), 0);
        drop(handle);
    }
}
