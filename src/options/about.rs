use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::{Reveal, RevealConfig, StaticText, TextAnimator};
use crate::error::ConfigError;

/// Terminal-style About block revealed when the section scrolls into view.
pub const DEFAULT_ABOUT_TEXT: &str = "\
> Senior AI Engineer at Synechron working on Validate.AI
> Building enterprise-wide LLMOps platform handling 100% organizational LLM traffic
> Implementing RBAC, observability, cost tracking, and compliance systems
> Standardizing LLM interfaces across the organization

> Previous experience at Infosys:
> - Developed Agentic RAG systems for test case generation
> - Fine-tuned LLMs and built evaluation pipelines
> - Led large-scale automation initiatives

> Core focus areas:
> - System Design & Scalability
> - Applied Generative AI
> - Enterprise-grade AI Solutions";

/// About-section reveal: text and per-character speed in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "About", inline)]
#[serde(default)]
pub struct RevealOptions {
    /// Text revealed once, top to bottom.
    #[schemars(title = "Text", extend("multiline" = true))]
    pub text: String,
    /// Delay before each revealed character.
    #[schemars(title = "Reveal Speed (ms)", range(min = 1, max = 500))]
    pub reveal_speed_ms: i64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            text: DEFAULT_ABOUT_TEXT.to_owned(),
            reveal_speed_ms: RevealConfig::DEFAULT_SPEED.as_millis() as i64,
        }
    }
}

impl RevealOptions {
    /// Validate into a reveal configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveSpeed`] for a zero or negative
    /// speed.
    pub fn config(&self) -> Result<RevealConfig, ConfigError> {
        RevealConfig::from_millis(self.text.clone(), self.reveal_speed_ms)
    }

    /// Build the animator, falling back to the full text shown statically
    /// when the options are invalid.
    #[must_use]
    pub fn build_animator(&self) -> Box<dyn TextAnimator> {
        match self.config() {
            Ok(config) => Box::new(Reveal::new(config)),
            Err(e) => {
                log::warn!("about reveal disabled: {e}");
                Box::new(StaticText::new(self.text.clone()))
            }
        }
    }
}
