// SPDX-License-Identifier: MPL-2.0
//! Core message data structures.
//!
//! A [`Message`] is the immutable value that travels from producers to a
//! display surface. Its text is kept unresolved (verbatim or an i18n key with
//! arguments) so that a locale change after publishing still renders
//! correctly.

use std::fmt;

/// Unique identifier for a message.
///
/// Identifiers come from a process-wide counter and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    /// Creates a new unique message ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg#{}", self.0)
    }
}

/// Severity of a message. Fixed when the message is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// Informational feedback ("Saved", "Copied to clipboard").
    #[default]
    Info,
    /// A failure the user should know about.
    Error,
}

impl Level {
    /// Returns true for [`Level::Error`]; renderers use it to pick an accent.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, Level::Error)
    }
}

/// An i18n key plus its interpolation arguments, resolved at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalizedText {
    key: String,
    args: Vec<(String, String)>,
}

impl LocalizedText {
    /// Creates a localized text for `key` without arguments.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((name.into(), value.into()));
        self
    }

    /// Returns the i18n key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the interpolation arguments in insertion order.
    #[must_use]
    pub fn args(&self) -> &[(String, String)] {
        &self.args
    }
}

/// Display text of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageText {
    /// Shown exactly as given.
    Verbatim(String),
    /// Looked up through a [`TextResolver`](crate::i18n::TextResolver) when rendered.
    Localized(LocalizedText),
}

impl From<&str> for MessageText {
    fn from(text: &str) -> Self {
        MessageText::Verbatim(text.to_string())
    }
}

impl From<String> for MessageText {
    fn from(text: String) -> Self {
        MessageText::Verbatim(text)
    }
}

impl From<LocalizedText> for MessageText {
    fn from(text: LocalizedText) -> Self {
        MessageText::Localized(text)
    }
}

/// A message to be displayed to the user.
///
/// `PartialEq` compares identity; use [`Message::matches`] to compare content.
#[derive(Debug, Clone)]
pub struct Message {
    id: MessageId,
    text: MessageText,
    level: Level,
}

impl Message {
    /// Creates a new message with a fresh ID.
    pub fn new(level: Level, text: impl Into<MessageText>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            level,
        }
    }

    /// Creates an info message.
    pub fn info(text: impl Into<MessageText>) -> Self {
        Self::new(Level::Info, text)
    }

    /// Creates an error message.
    pub fn error(text: impl Into<MessageText>) -> Self {
        Self::new(Level::Error, text)
    }

    /// Returns the message's unique ID.
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the unresolved display text.
    #[must_use]
    pub fn text(&self) -> &MessageText {
        &self.text
    }

    /// Returns the severity level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Content equality: same text and same level, regardless of identity.
    #[must_use]
    pub fn matches(&self, other: &Message) -> bool {
        self.text == other.text && self.level == other.level
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_ids_are_unique() {
        let m1 = Message::info("test");
        let m2 = Message::info("test");
        assert_ne!(m1.id(), m2.id());
    }

    #[test]
    fn matches_compares_text_and_level() {
        let saved = Message::info("Saved");
        assert!(saved.matches(&Message::info("Saved")));
        assert!(!saved.matches(&Message::error("Saved")));
        assert!(!saved.matches(&Message::info("Deleted")));
    }

    #[test]
    fn equality_is_identity_not_content() {
        let m1 = Message::info("Saved");
        let m2 = Message::info("Saved");
        assert_ne!(m1, m2);
        assert_eq!(m1, m1.clone());
    }

    #[test]
    fn verbatim_never_matches_localized_with_same_key() {
        let verbatim = Message::info("file-saved");
        let localized = Message::info(LocalizedText::new("file-saved"));
        assert!(!verbatim.matches(&localized));
    }

    #[test]
    fn localized_text_compares_arguments() {
        let a = LocalizedText::new("file-saved").with_arg("name", "a.png");
        let b = LocalizedText::new("file-saved").with_arg("name", "b.png");
        assert_ne!(MessageText::from(a.clone()), MessageText::from(b));
        assert_eq!(a.args().len(), 1);
        assert_eq!(a.key(), "file-saved");
    }

    #[test]
    fn constructors_set_correct_level() {
        assert_eq!(Message::info("").level(), Level::Info);
        assert_eq!(Message::error("").level(), Level::Error);
        assert!(Level::Error.is_error());
        assert!(!Level::Info.is_error());
    }
}
