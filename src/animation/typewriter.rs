//! Cyclic typewriter: type a phrase, pause, delete it, pause, move on.
//!
//! The state machine is a plain value ([`TypewriterState`]) with a pure
//! transition function ([`TypewriterState::advance`]). [`Typewriter`] wraps
//! it as a [`TextAnimator`] so any host can drive it.
//!
//! ```text
//! Typing ──(full, pause_after_typed)──▶ PausingBeforeDelete
//!   ▲                                          │ immediate
//!   │                                          ▼
//! PausingAfterDelete ◀──(empty, immediate)── Deleting
//!   └──(pause_after_deleted: next phrase)──▶ Typing
//! ```
//!
//! # Invariants
//!
//! 1. `visible <= len(active phrase)` at all times.
//! 2. `Typing` only grows the text and `Deleting` only shrinks it, one
//!    grapheme per tick.
//! 3. Leaving `PausingAfterDelete` advances the phrase index by one
//!    (mod the phrase count) and starts from empty text.
//! 4. Exactly one timed transition happens per tick; immediate relabels are
//!    settled within the same tick, so a host never holds more than one
//!    pending timer.

use web_time::Duration;

use super::{Caret, PhraseSet, TextAnimator};
use crate::error::ConfigError;

/// Stage of the cyclic state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Adding characters; also holds through the post-typed pause.
    Typing,
    /// Zero-duration relabel between the post-typed pause and deletion.
    PausingBeforeDelete,
    /// Removing characters.
    Deleting,
    /// Dwelling on empty text before the next phrase.
    PausingAfterDelete,
}

/// How long a state waits before its next transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// Transition without scheduling a timer.
    Immediate,
    /// Transition after the given delay.
    After(Duration),
}

/// Typing/deleting speeds and pause lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    /// Delay before each typed character.
    pub typing_speed: Duration,
    /// Delay before each deleted character.
    pub deleting_speed: Duration,
    /// Dwell on the fully typed phrase.
    pub pause_after_typed: Duration,
    /// Dwell on empty text before the next phrase.
    pub pause_after_deleted: Duration,
}

impl TypewriterTiming {
    /// Default delay per typed character.
    pub const DEFAULT_TYPING_SPEED: Duration = Duration::from_millis(100);
    /// Default delay per deleted character.
    pub const DEFAULT_DELETING_SPEED: Duration = Duration::from_millis(50);
    /// Default dwell on a fully typed phrase.
    pub const DEFAULT_PAUSE_AFTER_TYPED: Duration = Duration::from_millis(2000);
    /// Default dwell on empty text.
    pub const DEFAULT_PAUSE_AFTER_DELETED: Duration =
        Duration::from_millis(500);

    /// Timing from signed millisecond values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-positive speed or negative pause.
    pub fn from_millis(
        typing_speed_ms: i64,
        deleting_speed_ms: i64,
        pause_after_typed_ms: i64,
        pause_after_deleted_ms: i64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            typing_speed: super::speed_from_millis(
                "typing_speed_ms",
                typing_speed_ms,
            )?,
            deleting_speed: super::speed_from_millis(
                "deleting_speed_ms",
                deleting_speed_ms,
            )?,
            pause_after_typed: super::pause_from_millis(
                "pause_after_typed_ms",
                pause_after_typed_ms,
            )?,
            pause_after_deleted: super::pause_from_millis(
                "pause_after_deleted_ms",
                pause_after_deleted_ms,
            )?,
        })
    }
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            typing_speed: Self::DEFAULT_TYPING_SPEED,
            deleting_speed: Self::DEFAULT_DELETING_SPEED,
            pause_after_typed: Self::DEFAULT_PAUSE_AFTER_TYPED,
            pause_after_deleted: Self::DEFAULT_PAUSE_AFTER_DELETED,
        }
    }
}

/// Validated typewriter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterConfig {
    phrases: PhraseSet,
    timing: TypewriterTiming,
}

impl TypewriterConfig {
    /// Combine phrases and timing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveSpeed`] if either speed is zero.
    pub fn new(
        phrases: PhraseSet,
        timing: TypewriterTiming,
    ) -> Result<Self, ConfigError> {
        for (field, speed) in [
            ("typing_speed_ms", timing.typing_speed),
            ("deleting_speed_ms", timing.deleting_speed),
        ] {
            if speed.is_zero() {
                return Err(ConfigError::NonPositiveSpeed { field, value_ms: 0 });
            }
        }
        Ok(Self { phrases, timing })
    }

    /// Phrases with default timing.
    #[must_use]
    pub fn with_defaults(phrases: PhraseSet) -> Self {
        Self {
            phrases,
            timing: TypewriterTiming::default(),
        }
    }

    /// The phrase list.
    #[must_use]
    pub fn phrases(&self) -> &PhraseSet {
        &self.phrases
    }

    /// Speeds and pauses.
    #[must_use]
    pub fn timing(&self) -> TypewriterTiming {
        self.timing
    }

    /// Time one full pass over every phrase takes. Zero only when every
    /// phrase is empty and both pauses are zero.
    #[must_use]
    pub fn cycle_duration(&self) -> Duration {
        let t = self.timing;
        let per_char = t.typing_speed.saturating_add(t.deleting_speed);
        let pauses = t.pause_after_typed.saturating_add(t.pause_after_deleted);
        self.phrases.iter().fold(Duration::ZERO, |total, phrase| {
            let chars = u32::try_from(phrase.len()).unwrap_or(u32::MAX);
            total
                .saturating_add(per_char.saturating_mul(chars))
                .saturating_add(pauses)
        })
    }
}

/// One snapshot of the cyclic state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypewriterState {
    /// Index of the active phrase.
    pub phrase_index: usize,
    /// Graphemes of the active phrase currently visible.
    pub visible: usize,
    /// Current stage.
    pub phase: Phase,
}

impl TypewriterState {
    /// Empty text, first phrase, typing.
    pub const INITIAL: Self = Self {
        phrase_index: 0,
        visible: 0,
        phase: Phase::Typing,
    };

    /// What this state waits for before [`advance`](Self::advance).
    #[must_use]
    pub fn wait(&self, config: &TypewriterConfig) -> Wait {
        let timing = config.timing;
        match self.phase {
            Phase::Typing if self.visible < self.phrase_len(config) => {
                Wait::After(timing.typing_speed)
            }
            Phase::Typing => Wait::After(timing.pause_after_typed),
            Phase::PausingBeforeDelete => Wait::Immediate,
            Phase::Deleting if self.visible > 0 => {
                Wait::After(timing.deleting_speed)
            }
            Phase::Deleting => Wait::Immediate,
            Phase::PausingAfterDelete => Wait::After(timing.pause_after_deleted),
        }
    }

    /// Pure transition to the next state.
    #[must_use]
    pub fn advance(self, config: &TypewriterConfig) -> Self {
        match self.phase {
            Phase::Typing if self.visible < self.phrase_len(config) => Self {
                visible: self.visible + 1,
                ..self
            },
            Phase::Typing => Self {
                phase: Phase::PausingBeforeDelete,
                ..self
            },
            Phase::PausingBeforeDelete => Self {
                phase: Phase::Deleting,
                ..self
            },
            Phase::Deleting if self.visible > 0 => Self {
                visible: self.visible - 1,
                ..self
            },
            Phase::Deleting => Self {
                phase: Phase::PausingAfterDelete,
                ..self
            },
            Phase::PausingAfterDelete => Self {
                phrase_index: config.phrases.next_index(self.phrase_index),
                visible: 0,
                phase: Phase::Typing,
            },
        }
    }

    /// Apply every [`Wait::Immediate`] transition, in order.
    ///
    /// At most two relabels happen (`PausingBeforeDelete -> Deleting ->
    /// PausingAfterDelete` for an empty phrase); `PausingAfterDelete` always
    /// waits, so this terminates.
    #[must_use]
    pub fn settle(mut self, config: &TypewriterConfig) -> Self {
        while self.wait(config) == Wait::Immediate {
            self = self.advance(config);
        }
        self
    }

    fn phrase_len(&self, config: &TypewriterConfig) -> usize {
        config.phrases.get(self.phrase_index).len()
    }
}

/// Cyclic typewriter animator.
///
/// A configuration whose whole cycle takes no time (only empty phrases,
/// zero pauses) would ask for back-to-back zero-delay ticks forever; such a
/// typewriter holds its empty text and never schedules.
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    state: TypewriterState,
    still: bool,
}

impl Typewriter {
    /// Start at [`TypewriterState::INITIAL`].
    #[must_use]
    pub fn new(config: TypewriterConfig) -> Self {
        let state = TypewriterState::INITIAL.settle(&config);
        let still = config.cycle_duration().is_zero();
        if still {
            log::debug!("typewriter: zero-length cycle, not scheduling");
        }
        Self {
            config,
            state,
            still,
        }
    }

    /// Current state record.
    #[must_use]
    pub fn state(&self) -> TypewriterState {
        self.state
    }

    /// Configuration this animator runs with.
    #[must_use]
    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    /// Index of the active phrase.
    #[must_use]
    pub fn phrase_index(&self) -> usize {
        self.state.phrase_index
    }

    /// Whether the state machine is in the typing phase.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.state.phase == Phase::Typing
    }

    /// Whether the state machine is in the deleting phase.
    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.state.phase == Phase::Deleting
    }
}

impl TextAnimator for Typewriter {
    fn text(&self) -> &str {
        self.config
            .phrases
            .get(self.state.phrase_index)
            .prefix(self.state.visible)
    }

    fn caret(&self) -> Caret {
        if self.still {
            return Caret::Resting;
        }
        match self.state.phase {
            Phase::Typing => Caret::Typing,
            Phase::Deleting => Caret::Deleting,
            Phase::PausingBeforeDelete | Phase::PausingAfterDelete => {
                Caret::Resting
            }
        }
    }

    fn next_delay(&self) -> Option<Duration> {
        if self.still {
            return None;
        }
        match self.state.wait(&self.config) {
            Wait::After(delay) => Some(delay),
            Wait::Immediate => Some(Duration::ZERO),
        }
    }

    fn tick(&mut self) {
        let prev = self.state;
        self.state = prev.advance(&self.config).settle(&self.config);
        if self.state.phrase_index != prev.phrase_index {
            log::debug!(
                "typewriter: phrase {} -> {}",
                prev.phrase_index,
                self.state.phrase_index
            );
        } else if self.state.phase != prev.phase {
            log::trace!(
                "typewriter: {:?} -> {:?}",
                prev.phase,
                self.state.phase
            );
        }
    }

    fn name(&self) -> &'static str {
        "typewriter"
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn config(phrases: &[&str], timing: TypewriterTiming) -> TypewriterConfig {
        TypewriterConfig::new(
            PhraseSet::new(phrases.iter().copied()).unwrap(),
            timing,
        )
        .unwrap()
    }

    fn fast_timing() -> TypewriterTiming {
        TypewriterTiming::from_millis(10, 5, 0, 0).unwrap()
    }

    /// Text after construction and after each of `ticks` ticks.
    fn texts(tw: &mut Typewriter, ticks: usize) -> Vec<String> {
        let mut out = vec![tw.text().to_owned()];
        for _ in 0..ticks {
            tw.tick();
            out.push(tw.text().to_owned());
        }
        out
    }

    #[test]
    fn test_single_phrase_round_trip() {
        let mut tw =
            Typewriter::new(config(&["Hi"], TypewriterTiming::default()));
        assert_eq!(tw.next_delay(), Some(Duration::from_millis(100)));

        let seen = texts(&mut tw, 6);
        assert_eq!(seen, ["", "H", "Hi", "Hi", "H", "", ""]);

        // One full cycle later the state is identical to the initial state.
        assert_eq!(tw.state(), TypewriterState::INITIAL);
    }

    #[test]
    fn test_delays_follow_phases() {
        let mut tw =
            Typewriter::new(config(&["Hi"], TypewriterTiming::default()));
        let mut delays = Vec::new();
        for _ in 0..6 {
            delays.push(tw.next_delay().unwrap().as_millis());
            tw.tick();
        }
        // type, type, dwell, delete, delete, dwell
        assert_eq!(delays, [100, 100, 2000, 50, 50, 500]);
    }

    #[test]
    fn test_two_phrase_scenario_with_zero_pauses() {
        let mut tw = Typewriter::new(config(&["AI", "ML"], fast_timing()));
        let mut seen = vec![(tw.phrase_index(), tw.text().to_owned())];
        for _ in 0..12 {
            tw.tick();
            seen.push((tw.phrase_index(), tw.text().to_owned()));
        }
        let expected = [
            (0, ""),
            (0, "A"),
            (0, "AI"),
            (0, "AI"), // post-typed pause elapsed, now deleting
            (0, "A"),
            (0, ""),
            (1, ""),
            (1, "M"),
            (1, "ML"),
            (1, "ML"),
            (1, "M"),
            (1, ""),
            (0, ""), // wrapped
        ];
        let expected: Vec<(usize, String)> = expected
            .iter()
            .map(|&(i, s)| (i, s.to_owned()))
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_empty_phrase_skips_typing() {
        let mut tw =
            Typewriter::new(config(&[""], TypewriterTiming::default()));
        assert_eq!(tw.state().phase, Phase::Typing);
        assert_eq!(tw.next_delay(), Some(Duration::from_millis(2000)));

        tw.tick();
        assert_eq!(tw.state().phase, Phase::PausingAfterDelete);
        assert_eq!(tw.text(), "");
        assert_eq!(tw.next_delay(), Some(Duration::from_millis(500)));

        tw.tick();
        assert_eq!(tw.state(), TypewriterState::INITIAL);
    }

    #[test]
    fn test_zero_length_cycle_is_still() {
        let cfg = config(&["", ""], fast_timing());
        assert_eq!(cfg.cycle_duration(), Duration::ZERO);
        let tw = Typewriter::new(cfg);
        assert_eq!(tw.next_delay(), None);
        assert_eq!(tw.text(), "");
        assert_eq!(tw.caret(), Caret::Resting);

        // One character or one non-zero pause is enough to animate.
        assert_eq!(
            config(&["", "a"], fast_timing()).cycle_duration(),
            Duration::from_millis(15)
        );
        let paused = TypewriterTiming::from_millis(10, 5, 0, 1).unwrap();
        assert!(Typewriter::new(config(&[""], paused)).next_delay().is_some());
    }

    #[test]
    fn test_caret_flags() {
        let mut tw = Typewriter::new(config(&["A"], fast_timing()));
        assert!(tw.is_typing());
        assert_eq!(tw.caret(), Caret::Typing);
        tw.tick(); // "A"
        tw.tick(); // pause elapsed -> deleting
        assert!(tw.is_deleting());
        assert_eq!(tw.caret(), Caret::Deleting);
        tw.tick(); // "" -> pausing after delete
        assert!(!tw.is_typing() && !tw.is_deleting());
        assert_eq!(tw.caret(), Caret::Resting);
    }

    #[test]
    fn test_pausing_before_delete_is_immediate() {
        let cfg = config(&["Hi"], TypewriterTiming::default());
        let state = TypewriterState {
            phrase_index: 0,
            visible: 2,
            phase: Phase::PausingBeforeDelete,
        };
        assert_eq!(state.wait(&cfg), Wait::Immediate);
        assert_eq!(state.settle(&cfg).phase, Phase::Deleting);
        assert_eq!(state.settle(&cfg).visible, 2);
    }

    #[test]
    fn test_rejects_zero_speed() {
        let timing = TypewriterTiming {
            deleting_speed: Duration::ZERO,
            ..TypewriterTiming::default()
        };
        let err = TypewriterConfig::new(PhraseSet::new(["x"]).unwrap(), timing)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonPositiveSpeed {
                field: "deleting_speed_ms",
                value_ms: 0
            }
        );
    }

    #[test]
    fn test_rejects_negative_pause() {
        assert_eq!(
            TypewriterTiming::from_millis(100, 50, -1, 500),
            Err(ConfigError::NegativePause {
                field: "pause_after_typed_ms",
                value_ms: -1
            })
        );
    }

    proptest! {
        #[test]
        fn prop_phrases_visited_round_robin(
            phrases in prop::collection::vec("[a-z]{0,5}", 1..5),
            ticks in 1usize..300,
        ) {
            let n = phrases.len();
            let set = PhraseSet::new(phrases).unwrap();
            let mut tw = Typewriter::new(
                TypewriterConfig::new(set, fast_timing()).unwrap(),
            );
            let mut advances = 0;
            for _ in 0..ticks {
                let before = tw.state();
                tw.tick();
                let after = tw.state();
                if before.phase == Phase::PausingAfterDelete {
                    prop_assert_eq!(
                        after.phrase_index,
                        (before.phrase_index + 1) % n
                    );
                    prop_assert_eq!(after.visible, 0);
                    prop_assert_eq!(after.phase, Phase::Typing);
                    advances += 1;
                } else {
                    prop_assert_eq!(after.phrase_index, before.phrase_index);
                }
            }
            // A phrase of len graphemes takes 2 * len + 2 ticks, at most 12.
            prop_assert!(advances >= ticks / 12);
        }

        #[test]
        fn prop_text_moves_one_grapheme_per_tick(
            phrases in prop::collection::vec("[a-zé]{0,6}", 1..4),
            ticks in 1usize..300,
        ) {
            let set = PhraseSet::new(phrases).unwrap();
            let mut tw = Typewriter::new(
                TypewriterConfig::new(set, fast_timing()).unwrap(),
            );
            for _ in 0..ticks {
                let before = tw.state();
                tw.tick();
                let after = tw.state();
                let len = tw.config().phrases().get(after.phrase_index).len();
                prop_assert!(after.visible <= len);
                match before.phase {
                    Phase::Typing if after.phase == Phase::Typing
                        && after.phrase_index == before.phrase_index =>
                    {
                        prop_assert_eq!(after.visible, before.visible + 1);
                    }
                    Phase::Deleting if after.phase == Phase::Deleting => {
                        prop_assert_eq!(after.visible + 1, before.visible);
                    }
                    _ => {}
                }
            }
        }
    }
}
