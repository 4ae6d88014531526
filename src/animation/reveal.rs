//! One-shot reveal: type a fixed block forward once, then hold it.
//!
//! `Idle -> Typing -> Done`. The reveal waits for the first rising edge of
//! the visibility signal, types one grapheme per tick and never deletes.
//! `Done` is terminal: no further mutation and no timers.

use web_time::Duration;

use super::{Caret, EdgeTrigger, Phrase, TextAnimator};
use crate::error::ConfigError;

/// Input to the reveal state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// The visibility signal's first rising edge.
    Trigger,
    /// A scheduled timer fired.
    Tick,
}

/// Stage of the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealState {
    /// Waiting for the trigger.
    Idle,
    /// Revealing; `visible` graphemes are shown.
    Typing {
        /// Graphemes currently shown.
        visible: usize,
    },
    /// Everything is shown.
    Done,
}

impl RevealState {
    /// Pure transition for a text of `len` graphemes.
    #[must_use]
    pub fn transition(self, event: RevealEvent, len: usize) -> Self {
        match (self, event) {
            (Self::Idle, RevealEvent::Trigger) if len == 0 => Self::Done,
            (Self::Idle, RevealEvent::Trigger) => Self::Typing { visible: 0 },
            (Self::Typing { visible }, RevealEvent::Tick) => {
                if visible + 1 >= len {
                    Self::Done
                } else {
                    Self::Typing {
                        visible: visible + 1,
                    }
                }
            }
            (state, _) => state,
        }
    }

    /// Graphemes shown in this state.
    #[must_use]
    pub fn visible(self, len: usize) -> usize {
        match self {
            Self::Idle => 0,
            Self::Typing { visible } => visible,
            Self::Done => len,
        }
    }
}

/// Validated reveal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealConfig {
    text: Phrase,
    speed: Duration,
}

impl RevealConfig {
    /// Delay per revealed character used by the About section.
    pub const DEFAULT_SPEED: Duration = Duration::from_millis(15);

    /// Text revealed at `speed` per grapheme.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveSpeed`] if `speed` is zero.
    pub fn new(
        text: impl Into<String>,
        speed: Duration,
    ) -> Result<Self, ConfigError> {
        if speed.is_zero() {
            return Err(ConfigError::NonPositiveSpeed {
                field: "reveal_speed_ms",
                value_ms: 0,
            });
        }
        Ok(Self {
            text: Phrase::new(text),
            speed,
        })
    }

    /// Text revealed at a speed given in signed milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveSpeed`] for zero or negative speed.
    pub fn from_millis(
        text: impl Into<String>,
        speed_ms: i64,
    ) -> Result<Self, ConfigError> {
        Self::new(text, super::speed_from_millis("reveal_speed_ms", speed_ms)?)
    }

    /// The full text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Delay per grapheme.
    #[must_use]
    pub fn speed(&self) -> Duration {
        self.speed
    }
}

/// One-shot reveal animator.
#[derive(Debug, Clone)]
pub struct Reveal {
    config: RevealConfig,
    state: RevealState,
    trigger: EdgeTrigger,
}

impl Reveal {
    /// Idle until visible; empty text starts (and stays) `Done`.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        let state = if config.text.is_empty() {
            RevealState::Done
        } else {
            RevealState::Idle
        };
        Self {
            config,
            state,
            trigger: EdgeTrigger::new(),
        }
    }

    /// Current stage.
    #[must_use]
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Whether the whole text is shown.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == RevealState::Done
    }

    fn apply(&mut self, event: RevealEvent) {
        let prev = self.state;
        self.state = prev.transition(event, self.config.text.len());
        match (prev, self.state) {
            (RevealState::Idle, RevealState::Typing { .. }) => {
                log::debug!(
                    "reveal: started ({} graphemes)",
                    self.config.text.len()
                );
            }
            (RevealState::Typing { .. }, RevealState::Done) => {
                log::debug!("reveal: done");
            }
            _ => {}
        }
    }
}

impl TextAnimator for Reveal {
    fn text(&self) -> &str {
        let len = self.config.text.len();
        self.config.text.prefix(self.state.visible(len))
    }

    fn caret(&self) -> Caret {
        match self.state {
            RevealState::Typing { .. } => Caret::Typing,
            RevealState::Idle | RevealState::Done => Caret::Resting,
        }
    }

    fn next_delay(&self) -> Option<Duration> {
        match self.state {
            RevealState::Typing { .. } => Some(self.config.speed),
            RevealState::Idle | RevealState::Done => None,
        }
    }

    fn tick(&mut self) {
        self.apply(RevealEvent::Tick);
    }

    fn set_visible(&mut self, visible: bool) {
        if self.trigger.observe(visible) {
            self.apply(RevealEvent::Trigger);
        }
    }

    fn name(&self) -> &'static str {
        "reveal"
    }
}
