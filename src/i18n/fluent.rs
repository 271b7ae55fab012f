// SPDX-License-Identifier: MPL-2.0
use super::TextResolver;
use crate::config::DEFAULT_LOCALE;
use crate::error::{Error, Result};
use crate::message::{LocalizedText, MessageText};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Fluent-backed resolver.
///
/// Holds one bundle per locale. Add `.ftl` sources with
/// [`FluentResolver::add_locale`], then pick the active locale with
/// [`FluentResolver::negotiate`] or [`FluentResolver::set_locale`].
pub struct FluentResolver {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for FluentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FluentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FluentResolver")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish()
    }
}

impl FluentResolver {
    /// Creates a resolver with no translations; the current locale is `en-US`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
            available_locales: Vec::new(),
            current_locale: default_locale(),
        }
    }

    /// Parses `source` as Fluent and registers it for `locale`.
    ///
    /// Adding a second source for the same locale extends its bundle.
    /// Messages already defined keep their first definition.
    pub fn add_locale(&mut self, locale: &str, source: &str) -> Result<()> {
        let langid: LanguageIdentifier = locale
            .parse()
            .map_err(|_| Error::Localization(format!("invalid locale '{locale}'")))?;
        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            Error::Localization(format!("{} parse error(s) in {locale}", errors.len()))
        })?;

        let bundle = self.bundles.entry(langid.clone()).or_insert_with(|| {
            let mut bundle = FluentBundle::new(vec![langid.clone()]);
            bundle.set_use_isolating(false);
            bundle
        });
        if let Err(errors) = bundle.add_resource(resource) {
            tracing::warn!(%locale, count = errors.len(), "duplicate Fluent messages ignored");
        }
        if !self.available_locales.contains(&langid) {
            self.available_locales.push(langid);
        }
        Ok(())
    }

    /// Selects the current locale: `requested` if available, else the OS
    /// locale if available, else `en-US`.
    pub fn negotiate(&mut self, requested: Option<&str>) {
        let os_locale = sys_locale::get_locale();
        self.current_locale = resolve_locale(requested, os_locale.as_deref(), &self.available_locales)
            .unwrap_or_else(default_locale);
    }

    /// Switches to `locale` if translations for it were added.
    ///
    /// Returns false and keeps the current locale otherwise.
    pub fn set_locale(&mut self, locale: &LanguageIdentifier) -> bool {
        if self.bundles.contains_key(locale) {
            self.current_locale = locale.clone();
            true
        } else {
            false
        }
    }

    /// The locale used for resolution.
    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// Locales with registered translations, in registration order.
    #[must_use]
    pub fn available_locales(&self) -> &[LanguageIdentifier] {
        &self.available_locales
    }

    fn translate(&self, text: &LocalizedText) -> Option<String> {
        let bundle = self.bundles.get(&self.current_locale)?;
        let pattern = bundle.get_message(text.key())?.value()?;

        let args = if text.args().is_empty() {
            None
        } else {
            let mut args = FluentArgs::new();
            for (name, value) in text.args() {
                args.set(name.as_str(), value.as_str());
            }
            Some(args)
        };

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args.as_ref(), &mut errors);
        if errors.is_empty() {
            Some(value.into_owned())
        } else {
            tracing::debug!(key = text.key(), ?errors, "Fluent formatting failed");
            None
        }
    }
}

impl TextResolver for FluentResolver {
    fn resolve(&self, text: &MessageText) -> String {
        match text {
            MessageText::Verbatim(text) => text.clone(),
            MessageText::Localized(localized) => self.translate(localized).unwrap_or_else(|| {
                tracing::debug!(key = localized.key(), locale = %self.current_locale, "missing translation");
                localized.key().to_string()
            }),
        }
    }
}

fn default_locale() -> LanguageIdentifier {
    DEFAULT_LOCALE.parse().unwrap_or_default()
}

fn resolve_locale(
    requested: Option<&str>,
    os_locale: Option<&str>,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    [requested, os_locale]
        .into_iter()
        .flatten()
        .filter_map(|candidate| candidate.parse::<LanguageIdentifier>().ok())
        .find(|candidate| available.contains(candidate))
}
