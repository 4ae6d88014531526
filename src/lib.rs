// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Timer-driven text animations for a single-page portfolio site.
//!
//! Folio animates the two pieces of text on the site that move: the hero
//! headline, which types and deletes a rotating list of roles forever, and
//! the About section's terminal block, which types itself out once when it
//! scrolls into view.
//!
//! # Key entry points
//!
//! - [`animation::Typewriter`] - cyclic type / pause / delete / pause loop
//! - [`animation::Reveal`] - one-shot reveal started by a visibility edge
//! - [`animation::Driver`] - single-timer scheduler for any
//!   [`animation::TextAnimator`]
//! - [`host::AnimationThread`] - background thread host publishing
//!   [`animation::Frame`]s to a renderer
//! - [`options::Options`] - section content and timing, loadable from TOML
//!
//! # Architecture
//!
//! Every animator is a pure state machine: a state record plus a
//! transition function. Nothing in [`animation`] sleeps or owns a clock.
//! A host supplies the clock: the [`animation::Driver`] keeps at most one
//! pending deadline per animator and fires ticks when the host polls it.
//! The thread host polls from a dedicated thread and hands frames to the
//! render side through a lock-free triple buffer; the `web` feature polls
//! from `window.setTimeout` callbacks instead.

pub mod animation;
pub mod error;
pub mod host;
pub mod options;

pub use error::{ConfigError, FolioError};
