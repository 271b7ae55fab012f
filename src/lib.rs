// SPDX-License-Identifier: MPL-2.0
//! `user_message` shows short-lived messages ("toasts") to the user.
//!
//! Application code publishes messages on a [`channel::MessageBus`] from
//! anywhere, including error paths, without knowing who displays them. A
//! [`queue::DisplaySurface`] subscribed to the channel keeps an ordered,
//! bounded queue of displayed messages, expires them after a timeout and
//! removes them on tap or swipe, exactly once whichever trigger comes first.
//!
//! Rendering is left to the host UI toolkit: it calls
//! [`queue::DisplaySurface::render`] and wires the supplied
//! [`queue::Dismisser`] to its input events. Text is resolved at render time
//! through an [`i18n::TextResolver`].

#![doc(html_root_url = "https://docs.rs/user_message/0.1.0")]

pub mod channel;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod message;
pub mod queue;
