// SPDX-License-Identifier: MPL-2.0
//! Swipe-to-dismiss decision.
//!
//! The renderer reports the raw translation of a finished drag; this module
//! turns it into a yes/no so the queue itself never sees gesture deltas.

use crate::config::{Anchor, SurfaceConfig};
use crate::domain::SwipeThreshold;

/// Translation of a finished drag, in logical pixels. `dy` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeGesture {
    pub dx: f32,
    pub dy: f32,
}

impl SwipeGesture {
    #[must_use]
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// A purely vertical drag.
    #[must_use]
    pub fn vertical(dy: f32) -> Self {
        Self { dx: 0.0, dy }
    }

    /// A purely horizontal drag.
    #[must_use]
    pub fn horizontal(dx: f32) -> Self {
        Self { dx, dy: 0.0 }
    }
}

/// Thresholds a swipe must exceed to dismiss a message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipePolicy {
    anchor: Anchor,
    vertical: SwipeThreshold,
    horizontal: SwipeThreshold,
}

impl SwipePolicy {
    #[must_use]
    pub fn new(anchor: Anchor, vertical: SwipeThreshold, horizontal: SwipeThreshold) -> Self {
        Self {
            anchor,
            vertical,
            horizontal,
        }
    }

    #[must_use]
    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self::new(
            config.anchor,
            config.swipe_vertical(),
            config.swipe_horizontal(),
        )
    }

    /// Returns true if `gesture` should dismiss the message.
    ///
    /// Vertical drags count only toward the anchored edge (up for
    /// [`Anchor::Top`], down for [`Anchor::Bottom`]); horizontal drags count
    /// in either direction.
    #[must_use]
    pub fn commits(&self, gesture: SwipeGesture) -> bool {
        let toward_edge = match self.anchor {
            Anchor::Top => -gesture.dy,
            Anchor::Bottom => gesture.dy,
        };
        self.vertical.is_exceeded_by(toward_edge) || self.horizontal.is_exceeded_by(gesture.dx.abs())
    }
}

impl Default for SwipePolicy {
    fn default() -> Self {
        Self::from_config(&SurfaceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(anchor: Anchor) -> SwipePolicy {
        SwipePolicy::new(anchor, SwipeThreshold::new(30.0), SwipeThreshold::new(80.0))
    }

    #[test]
    fn top_anchor_dismisses_on_upward_swipe() {
        let top = policy(Anchor::Top);
        assert!(top.commits(SwipeGesture::vertical(-31.0)));
        assert!(!top.commits(SwipeGesture::vertical(-10.0)));
        assert!(!top.commits(SwipeGesture::vertical(100.0)));
    }

    #[test]
    fn bottom_anchor_dismisses_on_downward_swipe() {
        let bottom = policy(Anchor::Bottom);
        assert!(bottom.commits(SwipeGesture::vertical(31.0)));
        assert!(!bottom.commits(SwipeGesture::vertical(-100.0)));
    }

    #[test]
    fn horizontal_swipe_either_direction() {
        let top = policy(Anchor::Top);
        assert!(top.commits(SwipeGesture::horizontal(81.0)));
        assert!(top.commits(SwipeGesture::horizontal(-81.0)));
        assert!(!top.commits(SwipeGesture::horizontal(79.0)));
    }

    #[test]
    fn exact_threshold_does_not_commit() {
        assert!(!policy(Anchor::Top).commits(SwipeGesture::vertical(-30.0)));
    }

    #[test]
    fn nan_gesture_never_commits() {
        assert!(!policy(Anchor::Top).commits(SwipeGesture::new(f32::NAN, f32::NAN)));
    }

    #[test]
    fn default_policy_uses_config_defaults() {
        let default = SwipePolicy::default();
        assert!(default.commits(SwipeGesture::vertical(-31.0)));
        assert!(!default.commits(SwipeGesture::horizontal(50.0)));
    }
}
