use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::{
    PhraseSet, StaticText, TextAnimator, Typewriter, TypewriterConfig,
    TypewriterTiming,
};
use crate::error::ConfigError;

/// Roles cycled through under the hero name.
pub const DEFAULT_HERO_PHRASES: [&str; 4] = [
    "Senior AI Engineer",
    "Generative AI",
    "LLMOps",
    "Agentic Systems",
];

/// Hero headline typewriter: phrases and timing in milliseconds.
///
/// Durations are signed so a negative value in a preset surfaces as a
/// [`ConfigError`] instead of a TOML type error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Hero", inline)]
#[serde(default)]
pub struct TypewriterOptions {
    /// Phrases typed in order, wrapping after the last.
    #[schemars(title = "Phrases")]
    pub phrases: Vec<String>,
    /// Delay before each typed character.
    #[schemars(title = "Typing Speed (ms)", range(min = 1, max = 1000))]
    pub typing_speed_ms: i64,
    /// Delay before each deleted character.
    #[schemars(title = "Deleting Speed (ms)", range(min = 1, max = 1000))]
    pub deleting_speed_ms: i64,
    /// Dwell on the fully typed phrase.
    #[schemars(title = "Pause After Typed (ms)", range(min = 0, max = 10000))]
    pub pause_after_typed_ms: i64,
    /// Dwell on empty text before the next phrase.
    #[schemars(title = "Pause After Deleted (ms)", range(min = 0, max = 10000))]
    pub pause_after_deleted_ms: i64,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        let timing = TypewriterTiming::default();
        Self {
            phrases: DEFAULT_HERO_PHRASES.map(str::to_owned).to_vec(),
            typing_speed_ms: timing.typing_speed.as_millis() as i64,
            deleting_speed_ms: timing.deleting_speed.as_millis() as i64,
            pause_after_typed_ms: timing.pause_after_typed.as_millis() as i64,
            pause_after_deleted_ms: timing.pause_after_deleted.as_millis()
                as i64,
        }
    }
}

impl TypewriterOptions {
    /// Validate into a typewriter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an empty phrase list, a non-positive
    /// speed or a negative pause.
    pub fn config(&self) -> Result<TypewriterConfig, ConfigError> {
        let phrases = PhraseSet::new(self.phrases.iter().cloned())?;
        let timing = TypewriterTiming::from_millis(
            self.typing_speed_ms,
            self.deleting_speed_ms,
            self.pause_after_typed_ms,
            self.pause_after_deleted_ms,
        )?;
        TypewriterConfig::new(phrases, timing)
    }

    /// Build the animator, falling back to the first phrase as static text
    /// when the options are invalid.
    #[must_use]
    pub fn build_animator(&self) -> Box<dyn TextAnimator> {
        match self.config() {
            Ok(config) => Box::new(Typewriter::new(config)),
            Err(e) => {
                log::warn!("hero typewriter disabled: {e}");
                Box::new(StaticText::new(
                    self.phrases.first().cloned().unwrap_or_default(),
                ))
            }
        }
    }
}
