//! Grapheme-indexed phrases.
//!
//! Animators count "characters" as extended grapheme clusters so a typed
//! prefix never ends halfway through an emoji or a combining sequence.

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::ConfigError;

/// A string plus the byte offset of every grapheme boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    text: String,
    /// `bounds[n]` is the byte length of the first `n` graphemes.
    bounds: Vec<usize>,
}

impl Phrase {
    /// Index a phrase by grapheme cluster.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut bounds = Vec::with_capacity(text.len() + 1);
        bounds.push(0);
        bounds.extend(
            text.grapheme_indices(true)
                .map(|(start, g)| start + g.len()),
        );
        Self { text, bounds }
    }

    /// Number of graphemes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Whether the phrase has no visible characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first `count` graphemes. Clamped to the whole phrase.
    #[must_use]
    pub fn prefix(&self, count: usize) -> &str {
        let end = self.bounds[count.min(self.len())];
        &self.text[..end]
    }

    /// The full text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Ordered, non-empty, immutable list of phrases.
///
/// Cheap to clone; animators rebuilt on a configuration change share the
/// same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSet {
    phrases: Arc<[Phrase]>,
}

impl PhraseSet {
    /// Build a phrase set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPhrases`] when `phrases` yields nothing.
    pub fn new<I, S>(phrases: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Arc<[Phrase]> =
            phrases.into_iter().map(Phrase::new).collect();
        if phrases.is_empty() {
            return Err(ConfigError::EmptyPhrases);
        }
        Ok(Self { phrases })
    }

    /// Number of phrases (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Phrase at `index`, wrapping around the end of the list.
    #[must_use]
    pub fn get(&self, index: usize) -> &Phrase {
        &self.phrases[index % self.phrases.len()]
    }

    /// Index following `index`, wrapping to zero after the last phrase.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.phrases.len()
    }

    /// Iterate over the phrases in order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &Phrase> {
        self.phrases.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_prefixes() {
        let p = Phrase::new("LLMOps");
        assert_eq!(p.len(), 6);
        assert_eq!(p.prefix(0), "");
        assert_eq!(p.prefix(3), "LLM");
        assert_eq!(p.prefix(6), "LLMOps");
        assert_eq!(p.prefix(99), "LLMOps");
    }

    #[test]
    fn test_grapheme_prefixes_never_split_clusters() {
        // "e" + combining acute, then a flag made of two regional indicators.
        let p = Phrase::new("e\u{301}\u{1F1EE}\u{1F1F3}!");
        assert_eq!(p.len(), 3);
        assert_eq!(p.prefix(1), "e\u{301}");
        assert_eq!(p.prefix(2), "e\u{301}\u{1F1EE}\u{1F1F3}");
        assert_eq!(p.prefix(3), p.as_str());
    }

    #[test]
    fn test_empty_phrase() {
        let p = Phrase::new("");
        assert!(p.is_empty());
        assert_eq!(p.prefix(0), "");
        assert_eq!(p.prefix(1), "");
    }

    #[test]
    fn test_phrase_set_rejects_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(PhraseSet::new(empty), Err(ConfigError::EmptyPhrases));
    }

    #[test]
    fn test_phrase_set_wraps() {
        let set = PhraseSet::new(["AI", "ML", "Ops"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.next_index(0), 1);
        assert_eq!(set.next_index(2), 0);
        assert_eq!(set.get(4).as_str(), "ML");
        let texts: Vec<&str> = set.iter().map(Phrase::as_str).collect();
        assert_eq!(texts, ["AI", "ML", "Ops"]);
    }
}
