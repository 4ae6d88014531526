//! Text animation state machines and the single-timer driver that runs them.

mod driver;
mod phrase;
mod reveal;
mod trigger;
mod typewriter;

use std::fmt;

pub use driver::{time_until, Driver, TimerSlot};
pub use phrase::{Phrase, PhraseSet};
pub use reveal::{Reveal, RevealConfig, RevealEvent, RevealState};
pub use trigger::EdgeTrigger;
pub use typewriter::{
    Phase, Typewriter, TypewriterConfig, TypewriterState, TypewriterTiming,
    Wait,
};
use web_time::Duration;

use crate::error::ConfigError;

/// What a renderer should draw after the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caret {
    /// Characters are being added.
    Typing,
    /// Characters are being removed.
    Deleting,
    /// Paused, idle, or finished; the caret is shown but not moving.
    #[default]
    Resting,
    /// Static text; no caret at all.
    Hidden,
}

impl Caret {
    /// Short lowercase name, used as a DOM attribute value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::Deleting => "deleting",
            Self::Resting => "resting",
            Self::Hidden => "hidden",
        }
    }
}

/// A text animation driven one tick at a time by an external clock.
///
/// Implementations never sleep or spawn; they only report how long the
/// host should wait before the next [`tick`](Self::tick).
pub trait TextAnimator: Send {
    /// Text currently visible.
    fn text(&self) -> &str;

    /// Caret state for the current text.
    fn caret(&self) -> Caret;

    /// Delay before the next tick, or `None` when nothing should be
    /// scheduled (idle, finished, or static).
    fn next_delay(&self) -> Option<Duration>;

    /// Fire the pending tick.
    fn tick(&mut self);

    /// Viewport visibility signal. Default: ignored.
    fn set_visible(&mut self, _visible: bool) {}

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

impl fmt::Debug for dyn TextAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextAnimator")
            .field("name", &self.name())
            .field("text", &self.text())
            .field("caret", &self.caret())
            .finish()
    }
}

impl<A: TextAnimator + ?Sized> TextAnimator for Box<A> {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn caret(&self) -> Caret {
        (**self).caret()
    }

    fn next_delay(&self) -> Option<Duration> {
        (**self).next_delay()
    }

    fn tick(&mut self) {
        (**self).tick();
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible);
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Owned snapshot of an animator's output, handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// Visible text.
    pub text: String,
    /// Caret state.
    pub caret: Caret,
}

impl Frame {
    /// Snapshot the animator's current output.
    #[must_use]
    pub fn capture<A: TextAnimator + ?Sized>(animator: &A) -> Self {
        Self {
            text: animator.text().to_owned(),
            caret: animator.caret(),
        }
    }
}

/// Fixed text with no caret and no timers.
///
/// Rendered in place of an animator whose configuration was rejected, so
/// the surrounding view still shows the untyped content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticText {
    text: String,
}

impl StaticText {
    /// Wrap fixed text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextAnimator for StaticText {
    fn text(&self) -> &str {
        &self.text
    }

    fn caret(&self) -> Caret {
        Caret::Hidden
    }

    fn next_delay(&self) -> Option<Duration> {
        None
    }

    fn tick(&mut self) {}

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Per-character speed from milliseconds; must be positive.
///
/// # Errors
///
/// Returns [`ConfigError::NonPositiveSpeed`] for zero or negative values.
pub fn speed_from_millis(
    field: &'static str,
    value_ms: i64,
) -> Result<Duration, ConfigError> {
    u64::try_from(value_ms)
        .ok()
        .filter(|&ms| ms > 0)
        .map(Duration::from_millis)
        .ok_or(ConfigError::NonPositiveSpeed { field, value_ms })
}

/// Pause length from milliseconds; zero is allowed.
///
/// # Errors
///
/// Returns [`ConfigError::NegativePause`] for negative values.
pub fn pause_from_millis(
    field: &'static str,
    value_ms: i64,
) -> Result<Duration, ConfigError> {
    u64::try_from(value_ms)
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::NegativePause { field, value_ms })
}
