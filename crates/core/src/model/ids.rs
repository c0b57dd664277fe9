use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::word::Difficulty;

/// Stable identifier for a word: difficulty label plus lowercase word text,
/// joined by a colon, e.g. `"One Bee:jogging"`.
///
/// Solved and starred membership key on this form and it is what ends up in
/// persisted storage, so the shape must never change once written.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(String);

impl WordId {
    /// Builds the identifier for a word within a difficulty tier.
    ///
    /// The word text is lowercased so `"Jogging"` and `"jogging"` map to the
    /// same identifier.
    #[must_use]
    pub fn new(difficulty: Difficulty, word: &str) -> Self {
        Self(format!("{}:{}", difficulty.label(), word.to_lowercase()))
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordId({:?})", self.0)
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── PARSING ───────────────────────────────────────────────────────────────────
//

/// Error type for parsing a `WordId` from its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWordIdError {
    /// The string has no `:` separating tier label from word text.
    MissingSeparator,
    /// The tier label is not a known difficulty.
    UnknownTier(String),
    /// The word part is empty.
    EmptyWord,
}

impl fmt::Display for ParseWordIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWordIdError::MissingSeparator => {
                write!(f, "word id is missing the ':' separator")
            }
            ParseWordIdError::UnknownTier(label) => {
                write!(f, "unknown difficulty tier in word id: {label:?}")
            }
            ParseWordIdError::EmptyWord => write!(f, "word id has an empty word part"),
        }
    }
}

impl std::error::Error for ParseWordIdError {}

impl FromStr for WordId {
    type Err = ParseWordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, word) = s
            .split_once(':')
            .ok_or(ParseWordIdError::MissingSeparator)?;
        let difficulty = Difficulty::from_label(label)
            .ok_or_else(|| ParseWordIdError::UnknownTier(label.to_string()))?;
        if word.is_empty() {
            return Err(ParseWordIdError::EmptyWord);
        }
        Ok(WordId::new(difficulty, word))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
