//! Section content and animation timing with TOML preset support.
//!
//! Each animated section of the page has one options struct. Options
//! serialize to/from TOML so a preset can retune speeds or swap content
//! without a rebuild; every struct uses `#[serde(default)]` so partial files
//! (e.g. only overriding `[hero]`) work.

mod about;
mod hero;

use std::path::Path;

pub use about::{RevealOptions, DEFAULT_ABOUT_TEXT};
pub use hero::{TypewriterOptions, DEFAULT_HERO_PHRASES};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Hero headline typewriter.
    pub hero: TypewriterOptions,
    /// About-section terminal reveal.
    pub about: RevealOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Io`] if the file cannot be read and
    /// [`FolioError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, FolioError> {
        let content = std::fs::read_to_string(path).map_err(FolioError::Io)?;
        toml::from_str(&content)
            .map_err(|e| FolioError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::OptionsParse`] if serialization fails and
    /// [`FolioError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), FolioError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FolioError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(FolioError::Io)?;
        }
        std::fs::write(path, content).map_err(FolioError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
