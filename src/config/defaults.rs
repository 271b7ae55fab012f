// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Bounds of clamped values live with their newtypes
//! in [`crate::domain`] and are re-exported here.

use crate::domain::newtypes::{duration_bounds, max_displayed_bounds, swipe_bounds};

// ==========================================================================
// Channel Defaults
// ==========================================================================

/// Channel used by producers and surfaces that do not name one.
pub const DEFAULT_CHANNEL: &str = "package.UserMessage";

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default time a message stays on screen (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = duration_bounds::DEFAULT_MS;

/// Shortest accepted display time (in milliseconds).
pub const MIN_DURATION_MS: u64 = duration_bounds::MIN_MS;

/// Longest accepted display time (in milliseconds).
pub const MAX_DURATION_MS: u64 = duration_bounds::MAX_MS;

/// Default number of messages visible at once.
pub const DEFAULT_MAX_DISPLAYED: usize = max_displayed_bounds::DEFAULT;

/// Whether content-equal messages may be shown side by side.
pub const DEFAULT_ALLOW_DUPLICATES: bool = true;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Vertical swipe distance (toward the anchored edge) that dismisses a message.
pub const DEFAULT_SWIPE_VERTICAL_PX: f32 = swipe_bounds::DEFAULT_VERTICAL;

/// Horizontal swipe distance (either direction) that dismisses a message.
pub const DEFAULT_SWIPE_HORIZONTAL_PX: f32 = swipe_bounds::DEFAULT_HORIZONTAL;

// ==========================================================================
// Fallback Text
// ==========================================================================

/// Shown when an error value has no usable description.
pub const FALLBACK_ERROR_TEXT: &str = "An unexpected error occurred";

/// Locale used when neither the caller nor the OS names an available one.
pub const DEFAULT_LOCALE: &str = "en-US";
