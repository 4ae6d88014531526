//! Crate-level error types.

use std::fmt;

/// Invalid animator construction input.
///
/// Raised before an animator starts; an animator that fails validation is
/// never scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The cyclic animator needs at least one phrase.
    EmptyPhrases,
    /// A per-character speed was zero or negative.
    NonPositiveSpeed {
        /// Option name, e.g. `typing_speed_ms`.
        field: &'static str,
        /// Offending value in milliseconds.
        value_ms: i64,
    },
    /// A pause duration was negative.
    NegativePause {
        /// Option name, e.g. `pause_after_typed_ms`.
        field: &'static str,
        /// Offending value in milliseconds.
        value_ms: i64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPhrases => write!(f, "phrase list is empty"),
            Self::NonPositiveSpeed { field, value_ms } => {
                write!(f, "{field} must be positive, got {value_ms}ms")
            }
            Self::NegativePause { field, value_ms } => {
                write!(f, "{field} must not be negative, got {value_ms}ms")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors produced by the folio crate.
#[derive(Debug)]
pub enum FolioError {
    /// Animator configuration was rejected.
    Config(ConfigError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn an animation thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for FolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<ConfigError> for FolioError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for FolioError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
