//! Hosts that own a clock and drive animators.
//!
//! - [`AnimationThread`] runs a [`Driver`](crate::animation::Driver) on a
//!   background thread and publishes frames through a triple buffer.
//! - `web` (feature `web`) drives animators from `window.setTimeout` and
//!   writes frames straight into DOM elements.

#[cfg(any(feature = "web", test))]
mod mount;
#[cfg(not(target_arch = "wasm32"))]
mod thread;
#[cfg(feature = "web")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use thread::AnimationThread;
