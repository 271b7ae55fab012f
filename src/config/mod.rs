// SPDX-License-Identifier: MPL-2.0
//! Display-surface configuration.
//!
//! The crate owns no configuration file. [`SurfaceConfig`] derives serde so
//! a host application can embed it in its own settings, or read and write
//! it at a path of its choosing with [`load_from_path`] / [`save_to_path`].
//!
//! # Examples
//!
//! ```
//! use serde::Deserialize;
//! use user_message::config::{Anchor, SurfaceConfig};
//!
//! #[derive(Deserialize)]
//! struct Settings {
//!     toasts: SurfaceConfig,
//! }
//!
//! let settings: Settings = toml::from_str("[toasts]\nanchor = \"bottom\"\n").unwrap();
//! assert_eq!(settings.toasts.anchor, Anchor::Bottom);
//! ```

pub mod defaults;

use crate::channel::ChannelId;
use crate::domain::{DisplayDuration, MaxDisplayed, SwipeThreshold};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub use defaults::*;

/// Screen edge the message stack is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[default]
    Top,
    Bottom,
}

/// Horizontal alignment of stacked messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Leading,
    #[default]
    Center,
    Trailing,
}

/// Settings for one display surface.
///
/// Missing keys in the file fall back to their defaults; out-of-range values
/// are clamped by the typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub channel: String,
    pub duration_ms: u64,
    pub anchor: Anchor,
    pub max_displayed: usize,
    pub allow_duplicates: bool,
    pub alignment: Alignment,
    pub swipe_vertical_px: f32,
    pub swipe_horizontal_px: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            duration_ms: DEFAULT_DURATION_MS,
            anchor: Anchor::default(),
            max_displayed: DEFAULT_MAX_DISPLAYED,
            allow_duplicates: DEFAULT_ALLOW_DUPLICATES,
            alignment: Alignment::default(),
            swipe_vertical_px: DEFAULT_SWIPE_VERTICAL_PX,
            swipe_horizontal_px: DEFAULT_SWIPE_HORIZONTAL_PX,
        }
    }
}

impl SurfaceConfig {
    /// Sets the channel this surface listens on.
    #[must_use]
    pub fn with_channel(mut self, channel: &ChannelId) -> Self {
        self.channel = channel.as_str().to_string();
        self
    }

    /// Sets how long each message stays on screen.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = DisplayDuration::new(duration).as_millis();
        self
    }

    /// Sets the maximum number of visible messages.
    #[must_use]
    pub fn with_max_displayed(mut self, max: usize) -> Self {
        self.max_displayed = max;
        self
    }

    /// Sets whether content-equal messages may be displayed together.
    #[must_use]
    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Sets the anchored screen edge.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Returns the channel identifier.
    #[must_use]
    pub fn channel_id(&self) -> ChannelId {
        ChannelId::new(self.channel.clone())
    }

    /// Returns the clamped display duration.
    #[must_use]
    pub fn duration(&self) -> DisplayDuration {
        DisplayDuration::from_millis(self.duration_ms)
    }

    /// Returns the clamped capacity.
    #[must_use]
    pub fn max_displayed(&self) -> MaxDisplayed {
        MaxDisplayed::new(self.max_displayed)
    }

    /// Returns the clamped vertical swipe threshold.
    #[must_use]
    pub fn swipe_vertical(&self) -> SwipeThreshold {
        SwipeThreshold::new(self.swipe_vertical_px)
    }

    /// Returns the clamped horizontal swipe threshold.
    #[must_use]
    pub fn swipe_horizontal(&self) -> SwipeThreshold {
        SwipeThreshold::new(self.swipe_horizontal_px)
    }
}

/// Reads a config file at a host-chosen path. Unparseable content yields
/// the defaults.
pub fn load_from_path(path: &Path) -> Result<SurfaceConfig> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid toast config, using defaults");
            Ok(SurfaceConfig::default())
        }
    }
}

/// Writes `config` to a host-chosen path, creating parent directories.
pub fn save_to_path(config: &SurfaceConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
