// SPDX-License-Identifier: MPL-2.0
//! In-process publish/subscribe medium for user messages.
//!
//! Producers post to a [`MessageBus`] under a [`ChannelId`]; every active
//! subscription on that channel receives each payload in publish order.
//! Nothing is buffered for absent subscribers and nothing is replayed on
//! subscribe.
//!
//! # Components
//!
//! - [`bus`] - `MessageBus`, `Subscription` and `SubscriptionHandle`
//! - [`producer`] - "show as info" / "show as error" conveniences
//!
//! # Usage
//!
//! ```
//! use user_message::channel::{ChannelId, MessageBus, ShowUser};
//!
//! let bus = MessageBus::new();
//! let mut subscription = bus.subscribe(&ChannelId::default());
//!
//! "Image saved".show_user(&bus);
//!
//! let payload = subscription.try_recv().expect("delivered");
//! assert!(payload.as_message().is_some());
//! ```

mod bus;
mod producer;

use crate::config::DEFAULT_CHANNEL;
use crate::message::Message;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub use bus::{MessageBus, Subscription, SubscriptionHandle, SubscriptionId};
pub use producer::{ShowUser, ShowUserError};

/// Name of a channel. Surfaces on different channels never see each
/// other's messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(Arc<str>);

impl ChannelId {
    /// Creates a channel identifier from a name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Returns the channel name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// What travels over a channel.
///
/// Normally a [`Message`], but any `Send + Sync` value can be posted with
/// [`MessageBus::publish_payload`]; receivers that expect a message ignore
/// the rest.
#[derive(Clone)]
pub struct Payload {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Payload {
    /// Wraps a message.
    pub fn message(message: Message) -> Self {
        Self::custom(message)
    }

    /// Wraps an arbitrary value.
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the message if this payload carries one.
    #[must_use]
    pub fn as_message(&self) -> Option<&Message> {
        self.value.downcast_ref::<Message>()
    }

    /// Type name of the wrapped value, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl From<Message> for Payload {
    fn from(message: Message) -> Self {
        Self::message(message)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_message() {
            Some(message) => f.debug_tuple("Payload").field(message).finish(),
            None => f.debug_tuple("Payload").field(&self.type_name).finish(),
        }
    }
}
