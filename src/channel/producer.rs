// SPDX-License-Identifier: MPL-2.0
//! Producer conveniences.
//!
//! Application code rarely builds a [`Message`] by hand; it says "show this
//! to the user" from wherever it is, including error paths:
//!
//! ```
//! use user_message::channel::{MessageBus, ShowUser, ShowUserError};
//! use user_message::message::LocalizedText;
//!
//! let bus = MessageBus::new();
//! "Copied to clipboard".show_user(&bus);
//! LocalizedText::new("notification-save-success").show_user(&bus);
//!
//! let err = std::io::Error::other("disk full");
//! err.show_user(&bus);
//! ```

use super::{ChannelId, MessageBus};
use crate::config::FALLBACK_ERROR_TEXT;
use crate::message::{LocalizedText, Message, MessageText};

impl MessageBus {
    /// Publishes an info message on the default channel.
    pub fn show_info(&self, text: impl Into<MessageText>) {
        self.show_info_on(text, None);
    }

    /// Publishes an info message, optionally on a specific channel.
    pub fn show_info_on(&self, text: impl Into<MessageText>, channel: Option<&ChannelId>) {
        self.publish_to(channel, Message::info(text));
    }

    /// Publishes an error message describing `error` on the default channel.
    pub fn show_error(&self, error: &dyn std::error::Error) {
        self.show_error_on(error, None, None);
    }

    /// Publishes an error message with `text` shown instead of the error's
    /// own description.
    pub fn show_error_with(&self, error: &dyn std::error::Error, text: impl Into<MessageText>) {
        self.show_error_on(error, Some(text.into()), None);
    }

    /// Publishes an error message.
    ///
    /// `override_text` replaces the error's description. Without it, the
    /// error's `Display` output is used, or a generic fallback when that is
    /// blank.
    pub fn show_error_on(
        &self,
        error: &dyn std::error::Error,
        override_text: Option<MessageText>,
        channel: Option<&ChannelId>,
    ) {
        let text = override_text.unwrap_or_else(|| describe(error));
        tracing::debug!(%error, "publishing error for the user");
        self.publish_to(channel, Message::error(text));
    }

    fn publish_to(&self, channel: Option<&ChannelId>, message: Message) {
        match channel {
            Some(channel) => self.publish(channel, message),
            None => self.publish(&ChannelId::default(), message),
        }
    }
}

fn describe(error: &dyn std::error::Error) -> MessageText {
    let description = error.to_string();
    if description.trim().is_empty() {
        MessageText::Verbatim(FALLBACK_ERROR_TEXT.to_string())
    } else {
        MessageText::Verbatim(description)
    }
}

/// Shows a value to the user as an info message.
pub trait ShowUser {
    /// Publishes on the default channel.
    fn show_user(&self, bus: &MessageBus) {
        self.show_user_on(bus, None);
    }

    /// Publishes on `channel`, or the default channel when `None`.
    fn show_user_on(&self, bus: &MessageBus, channel: Option<&ChannelId>);
}

impl ShowUser for str {
    fn show_user_on(&self, bus: &MessageBus, channel: Option<&ChannelId>) {
        bus.show_info_on(self, channel);
    }
}

impl ShowUser for String {
    fn show_user_on(&self, bus: &MessageBus, channel: Option<&ChannelId>) {
        bus.show_info_on(self.as_str(), channel);
    }
}

impl ShowUser for LocalizedText {
    fn show_user_on(&self, bus: &MessageBus, channel: Option<&ChannelId>) {
        bus.show_info_on(self.clone(), channel);
    }
}

/// Shows an error to the user as an error message.
pub trait ShowUserError {
    /// Publishes the error's description on the default channel.
    fn show_user(&self, bus: &MessageBus) {
        self.show_user_on(bus, None, None);
    }

    /// Publishes `text` in place of the error's description.
    fn show_user_with(&self, bus: &MessageBus, text: impl Into<MessageText>) {
        self.show_user_on(bus, Some(text.into()), None);
    }

    /// Publishes with an optional override text and channel.
    fn show_user_on(
        &self,
        bus: &MessageBus,
        override_text: Option<MessageText>,
        channel: Option<&ChannelId>,
    );
}

impl<E: std::error::Error> ShowUserError for E {
    fn show_user_on(
        &self,
        bus: &MessageBus,
        override_text: Option<MessageText>,
        channel: Option<&ChannelId>,
    ) {
        bus.show_error_on(self, override_text, channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Payload;
    use crate::message::Level;
    use std::fmt;

    #[derive(Debug)]
    struct Silent;

    impl fmt::Display for Silent {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Ok(())
        }
    }

    impl std::error::Error for Silent {}

    fn message(payload: Option<Payload>) -> Message {
        payload
            .and_then(|p| p.as_message().cloned())
            .expect("expected a message payload")
    }

    #[test]
    fn show_user_publishes_info_on_default_channel() {
        let bus = MessageBus::new();
        let mut sub = bus.subscribe(&ChannelId::default());

        "Saved".show_user(&bus);
        String::from("Exported").show_user(&bus);

        let first = message(sub.try_recv());
        assert_eq!(first.level(), Level::Info);
        assert_eq!(first.text(), &MessageText::from("Saved"));
        assert_eq!(message(sub.try_recv()).text(), &MessageText::from("Exported"));
    }

    #[test]
    fn localized_text_stays_unresolved() {
        let bus = MessageBus::new();
        let mut sub = bus.subscribe(&ChannelId::default());
        let text = LocalizedText::new("notification-save-success").with_arg("file", "a.png");

        text.show_user(&bus);

        assert_eq!(message(sub.try_recv()).text(), &MessageText::Localized(text));
    }

    #[test]
    fn error_uses_its_description() {
        let bus = MessageBus::new();
        let mut sub = bus.subscribe(&ChannelId::default());

        std::io::Error::other("disk full").show_user(&bus);

        let shown = message(sub.try_recv());
        assert_eq!(shown.level(), Level::Error);
        assert_eq!(shown.text(), &MessageText::from("disk full"));
    }

    #[test]
    fn error_override_text_wins() {
        let bus = MessageBus::new();
        let mut sub = bus.subscribe(&ChannelId::default());

        std::io::Error::other("EACCES").show_user_with(&bus, LocalizedText::new("error-permission"));

        assert_eq!(
            message(sub.try_recv()).text(),
            &MessageText::Localized(LocalizedText::new("error-permission"))
        );
    }

    #[test]
    fn blank_error_falls_back_to_generic_text() {
        let bus = MessageBus::new();
        let mut sub = bus.subscribe(&ChannelId::default());

        bus.show_error(&Silent);

        assert_eq!(
            message(sub.try_recv()).text(),
            &MessageText::from(FALLBACK_ERROR_TEXT)
        );
    }

    #[test]
    fn channel_override_routes_to_that_channel_only() {
        let bus = MessageBus::new();
        let editor = ChannelId::from("editor");
        let mut default_sub = bus.subscribe(&ChannelId::default());
        let mut editor_sub = bus.subscribe(&editor);

        "Cropped".show_user_on(&bus, Some(&editor));
        Silent.show_user_on(&bus, None, Some(&editor));

        assert!(default_sub.try_recv().is_none());
        assert_eq!(message(editor_sub.try_recv()).level(), Level::Info);
        assert_eq!(message(editor_sub.try_recv()).level(), Level::Error);
    }
}
