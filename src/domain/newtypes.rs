// SPDX-License-Identifier: MPL-2.0
//! Display-surface newtypes.
//!
//! This module provides type-safe wrappers for queue and gesture settings,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Display Duration Bounds
// =============================================================================

/// How long a message stays on screen, in milliseconds (50 ms to 2 minutes).
pub mod duration_bounds {
    /// Minimum display time.
    pub const MIN_MS: u64 = 50;
    /// Maximum display time.
    pub const MAX_MS: u64 = 120_000;
    /// Default display time.
    pub const DEFAULT_MS: u64 = 6_000;
}

// =============================================================================
// DisplayDuration
// =============================================================================

/// Lifetime of a displayed message before it expires.
///
/// Values outside 50 ms – 2 min are clamped, so a zero or runaway setting in
/// a config file can neither flash messages away nor pin them forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DisplayDuration(u64);

impl DisplayDuration {
    /// Creates a display duration from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(duration_bounds::MIN_MS, duration_bounds::MAX_MS))
    }

    /// Creates a display duration from a [`Duration`], clamping to valid range.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the value as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        Self(duration_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Max Displayed Bounds
// =============================================================================

/// Capacity bounds for the displayed queue (1 to 50 messages).
pub mod max_displayed_bounds {
    /// Minimum capacity.
    pub const MIN: usize = 1;
    /// Maximum capacity.
    pub const MAX: usize = 50;
    /// Default capacity.
    pub const DEFAULT: usize = 5;
}

// =============================================================================
// MaxDisplayed
// =============================================================================

/// Maximum number of messages visible at once.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (1–50 messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxDisplayed(usize);

impl MaxDisplayed {
    /// Creates a new capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(max_displayed_bounds::MIN, max_displayed_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for MaxDisplayed {
    fn default() -> Self {
        Self(max_displayed_bounds::DEFAULT)
    }
}

// =============================================================================
// Swipe Threshold Bounds
// =============================================================================

/// Swipe displacement bounds in logical pixels.
pub mod swipe_bounds {
    /// Smallest accepted threshold.
    pub const MIN: f32 = 1.0;
    /// Largest accepted threshold.
    pub const MAX: f32 = 1000.0;
    /// Default vertical threshold.
    pub const DEFAULT_VERTICAL: f32 = 30.0;
    /// Default horizontal threshold.
    pub const DEFAULT_HORIZONTAL: f32 = 80.0;
}

// =============================================================================
// SwipeThreshold
// =============================================================================

/// Displacement a swipe must exceed before it dismisses a message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThreshold(f32);

impl SwipeThreshold {
    /// Creates a new threshold, clamping to valid range. `NaN` maps to the minimum.
    #[must_use]
    pub fn new(pixels: f32) -> Self {
        if pixels.is_nan() {
            return Self(swipe_bounds::MIN);
        }
        Self(pixels.clamp(swipe_bounds::MIN, swipe_bounds::MAX))
    }

    /// Returns the threshold in logical pixels.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true when `displacement` is strictly beyond the threshold.
    #[must_use]
    pub fn is_exceeded_by(self, displacement: f32) -> bool {
        displacement > self.0
    }
}

// =============================================================================
// Tests
// =============================================================================
