// SPDX-License-Identifier: MPL-2.0
//! Broadcast bus keyed by channel.
//!
//! Each subscription owns an unbounded queue. Publishing pushes a clone of
//! the payload into every queue of the channel while holding the registry
//! lock, so all subscribers observe the same global publish order and the
//! caller never waits on a subscriber.

use super::{ChannelId, Payload};
use crate::message::Message;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::mpsc;

/// Identifier of one subscription on a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    tx: mpsc::UnboundedSender<Payload>,
}

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    channels: Mutex<HashMap<ChannelId, Vec<Subscriber>>>,
}

impl Registry {
    fn lock(&self) -> MutexGuard<'_, HashMap<ChannelId, Vec<Subscriber>>> {
        // A panicking handler never runs under this lock, so the map is
        // consistent even if poisoned.
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, channel: &ChannelId, id: SubscriptionId) -> bool {
        let mut channels = self.lock();
        let Some(subscribers) = channels.get_mut(channel) else {
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        let removed = subscribers.len() < before;
        if subscribers.is_empty() {
            channels.remove(channel);
        }
        removed
    }
}

/// Handle to the process's message bus.
///
/// Cheap to clone; clones share the same subscriptions. Create one per
/// application (or per test) and hand it to producers and surfaces.
#[derive(Clone, Default)]
pub struct MessageBus {
    registry: Arc<Registry>,
}

impl MessageBus {
    /// Creates a bus with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a message to every active subscriber of `channel`.
    ///
    /// Never blocks and never fails. Without subscribers the message is
    /// dropped.
    pub fn publish(&self, channel: &ChannelId, message: Message) {
        self.publish_payload(channel, Payload::message(message));
    }

    /// Publishes an arbitrary payload to every active subscriber of `channel`.
    pub fn publish_payload(&self, channel: &ChannelId, payload: Payload) {
        let mut channels = self.registry.lock();
        let Some(subscribers) = channels.get_mut(channel) else {
            tracing::trace!(%channel, "no subscribers, payload dropped");
            return;
        };
        // Receivers dropped without unsubscribing are pruned here.
        subscribers.retain(|s| s.tx.send(payload.clone()).is_ok());
        if subscribers.is_empty() {
            channels.remove(channel);
        }
    }

    /// Subscribes to `channel`, returning a receiver for its payloads.
    ///
    /// Only payloads published after this call are received. Dropping the
    /// subscription unsubscribes it.
    pub fn subscribe(&self, channel: &ChannelId) -> Subscription {
        let id = SubscriptionId(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        self.registry
            .lock()
            .entry(channel.clone())
            .or_default()
            .push(Subscriber { id, tx });
        tracing::debug!(%channel, ?id, "subscribed");
        Subscription {
            id,
            channel: channel.clone(),
            rx,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Subscribes `handler` to `channel`.
    ///
    /// The handler runs on a spawned Tokio task, once per payload, in publish
    /// order, until [`MessageBus::unsubscribe`] is called with the returned
    /// handle. Must be called from within a Tokio runtime.
    pub fn subscribe_with<F>(&self, channel: &ChannelId, mut handler: F) -> SubscriptionHandle
    where
        F: FnMut(Payload) + Send + 'static,
    {
        let mut subscription = self.subscribe(channel);
        let handle = subscription.handle();
        let active = Arc::clone(&handle.active);
        tokio::spawn(async move {
            while let Some(payload) = subscription.recv().await {
                if !active.load(Ordering::Acquire) {
                    break;
                }
                handler(payload);
            }
        });
        handle
    }

    /// Ends a subscription. Calling it again, or after the subscription was
    /// dropped, does nothing.
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) {
        handle.active.store(false, Ordering::Release);
        if self.registry.remove(&handle.channel, handle.id) {
            tracing::debug!(channel = %handle.channel, id = ?handle.id, "unsubscribed");
        }
    }

    /// Number of active subscriptions on `channel`.
    #[must_use]
    pub fn subscriber_count(&self, channel: &ChannelId) -> usize {
        self.registry.lock().get(channel).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let channels = self.registry.lock();
        f.debug_struct("MessageBus")
            .field("channels", &channels.len())
            .finish()
    }
}

/// Receiving end of a subscription.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    channel: ChannelId,
    rx: mpsc::UnboundedReceiver<Payload>,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Waits for the next payload.
    ///
    /// Returns `None` once the subscription has been removed from the bus
    /// and every payload published before that has been received.
    pub async fn recv(&mut self) -> Option<Payload> {
        self.rx.recv().await
    }

    /// Returns the next payload if one is already queued.
    pub fn try_recv(&mut self) -> Option<Payload> {
        self.rx.try_recv().ok()
    }

    /// Number of payloads queued and not yet received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns whether no payload is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Returns a handle that can end this subscription through the bus.
    #[must_use]
    pub fn handle(&self) -> SubscriptionHandle {
        SubscriptionHandle {
            id: self.id,
            channel: self.channel.clone(),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Channel this subscription listens on.
    #[must_use]
    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(&self.channel, self.id);
        }
    }
}

/// Token identifying a subscription, used to end it.
#[derive(Debug, Clone)]
pub struct SubscriptionHandle {
    id: SubscriptionId,
    channel: ChannelId,
    active: Arc<AtomicBool>,
}

impl SubscriptionHandle {
    /// Returns the subscription's identifier.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns false once [`MessageBus::unsubscribe`] has been called.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}
