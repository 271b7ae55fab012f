// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with ZERO external dependencies.
//!
//! # Modules
//!
//! - [`newtypes`]: bounded display settings ([`DisplayDuration`](newtypes::DisplayDuration),
//!   [`MaxDisplayed`](newtypes::MaxDisplayed), [`SwipeThreshold`](newtypes::SwipeThreshold))

pub mod newtypes;

pub use newtypes::{DisplayDuration, MaxDisplayed, SwipeThreshold};
