// SPDX-License-Identifier: MPL-2.0
//! Render-time text resolution.
//!
//! Messages carry unresolved text so a locale switch after publishing still
//! renders in the new language. A renderer turns [`MessageText`] into a
//! display string through a [`TextResolver`]. Resolution never fails: a
//! missing translation renders as its key.
//!
//! # Features
//!
//! - [`VerbatimResolver`] for applications without translations
//! - [`fluent::FluentResolver`] backed by Fluent `.ftl` resources, with
//!   locale selection from an explicit request, the OS, or `en-US`
//! - Runtime language switching

pub mod fluent;

use crate::message::MessageText;

pub use fluent::FluentResolver;

/// Turns message text into the string shown on screen.
pub trait TextResolver {
    /// Resolves `text` for display. Must not fail.
    fn resolve(&self, text: &MessageText) -> String;
}

/// Resolver that shows verbatim text as is and localized text as its key.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimResolver;

impl TextResolver for VerbatimResolver {
    fn resolve(&self, text: &MessageText) -> String {
        match text {
            MessageText::Verbatim(text) => text.clone(),
            MessageText::Localized(localized) => localized.key().to_string(),
        }
    }
}

impl<R: TextResolver + ?Sized> TextResolver for &R {
    fn resolve(&self, text: &MessageText) -> String {
        (**self).resolve(text)
    }
}
