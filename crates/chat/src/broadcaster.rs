//! Per-room fan-out.
//!
//! Subscribers are kept in registration order. `publish` copies the current
//! subscriber list under the lock, releases it, and then sends to each one in
//! order, so a concurrent subscribe/unsubscribe never races the iteration.
//! A send that fails (the receiving half is gone) is logged and skipped, and
//! the dead subscriber is pruned; the remaining subscribers still get the
//! message.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use storefront_core::IdGenerator;

use crate::error::ChatError;

/// Identifier of a subscription within one broadcaster.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

impl From<u64> for SubscriberId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl core::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Receiving half of a room subscription.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    receiver: UnboundedReceiver<String>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next message. `None` once the subscriber was removed.
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Take a message without waiting.
    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}

/// Outcome of one `publish` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: Vec<SubscriberId>,
}

#[derive(Debug, Default)]
struct Subscribers {
    ids: IdGenerator<SubscriberId>,
    entries: Vec<(SubscriberId, UnboundedSender<String>)>,
}

/// Fan-out relay for one chat room.
#[derive(Debug, Default)]
pub struct Broadcaster {
    subscribers: Mutex<Subscribers>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a new subscriber at the end of the delivery order.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut subs = self.lock();
        let id = subs.ids.next_id();
        subs.entries.push((id, tx));

        Subscription { id, receiver: rx }
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subs = self.lock();
        let before = subs.entries.len();
        subs.entries.retain(|(sid, _)| *sid != id);
        subs.entries.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Send `message` to every current subscriber, in registration order.
    pub fn publish(&self, message: impl Into<String>) -> Delivery {
        let message = message.into();
        let snapshot = self.lock().entries.clone();

        let mut delivery = Delivery::default();
        for (id, tx) in &snapshot {
            match deliver(*id, tx, &message) {
                Ok(()) => delivery.delivered += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "dropping unreachable chat subscriber");
                    delivery.failed.push(*id);
                }
            }
        }

        if !delivery.failed.is_empty() {
            self.lock()
                .entries
                .retain(|(id, _)| !delivery.failed.contains(id));
        }

        delivery
    }
}

fn deliver(id: SubscriberId, tx: &UnboundedSender<String>, message: &str) -> Result<(), ChatError> {
    tx.send(message.to_owned())
        .map_err(|_closed| ChatError::SendFailed(id))
}
