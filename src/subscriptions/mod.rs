//! Live store update subscriptions.
//!
//! The store broadcasts a [`StoreEvent`] after every committed mutation so
//! the presentation collaborator can re-render derived state without
//! polling.

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId,
};
