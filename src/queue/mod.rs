// SPDX-License-Identifier: MPL-2.0
//! Display-side message queue.
//!
//! A [`DisplaySurface`] subscribes to one channel, admits arriving messages
//! into a bounded, ordered queue, expires each one after the configured
//! duration, and removes messages on tap or swipe. Every removal is keyed
//! by message id and is a no-op when the message is already gone.
//!
//! # Components
//!
//! - [`state`] - `QueueState`, the synchronous admission/removal core
//! - [`gesture`] - swipe thresholds and the dismiss decision
//! - [`surface`] - `DisplaySurface`, the task that owns a queue
//!
//! # Usage
//!
//! ```
//! use user_message::channel::{MessageBus, ShowUser};
//! use user_message::config::SurfaceConfig;
//! use user_message::i18n::{TextResolver, VerbatimResolver};
//! use user_message::queue::DisplaySurface;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bus = MessageBus::new();
//! let surface = DisplaySurface::attach(&bus, &SurfaceConfig::default());
//!
//! "Image saved".show_user(&bus);
//! surface.flush().await;
//!
//! let banners = surface.render(|message, _dismiss| VerbatimResolver.resolve(message.text()));
//! assert_eq!(banners, vec!["Image saved".to_string()]);
//! # }
//! ```

pub mod gesture;
pub mod state;
pub mod surface;

pub use gesture::{SwipeGesture, SwipePolicy};
pub use state::{Admission, AdmissionPolicy, QueueState, Retirement, RETIRED_MEMORY};
pub use surface::{Dismisser, DisplaySurface, Layout, Snapshot};
