use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::WordId;
use crate::normalize::normalize_answer;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("word text cannot be empty")]
    EmptyWord,
}

/// Error returned when a string is not a known tier label.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty tier: {0:?}")]
pub struct ParseDifficultyError(pub String);

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty tier a word belongs to.
///
/// Labels are stable: they appear inside persisted `WordId` strings and in
/// the word-list source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    OneBee,
    TwoBee,
    ThreeBee,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 3] = [
        Difficulty::OneBee,
        Difficulty::TwoBee,
        Difficulty::ThreeBee,
    ];

    /// Returns the human-readable tier label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::OneBee => "One Bee",
            Difficulty::TwoBee => "Two Bee",
            Difficulty::ThreeBee => "Three Bee",
        }
    }

    /// Looks a tier up by its label. Returns `None` for unknown labels.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "One Bee" => Some(Difficulty::OneBee),
            "Two Bee" => Some(Difficulty::TwoBee),
            "Three Bee" => Some(Difficulty::ThreeBee),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ParseDifficultyError(s.to_owned()))
    }
}

//
// ─── WORD ENTRY ────────────────────────────────────────────────────────────────
//

/// A single entry in the study list.
///
/// Entries are immutable once loaded; everything the practice flow needs to
/// present or judge a word lives here. The identifier is derived, never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    pronunciation: String,
    definition: String,
    origin: String,
    sentence: String,
    part_of_speech: String,
    difficulty: Difficulty,
    alternate: Option<String>,
}

impl WordEntry {
    /// Creates a validated entry.
    ///
    /// The word text must survive normalization (a string of only dots and
    /// whitespace is not a word). The alternate spelling collapses to `None`
    /// when blank.
    ///
    /// # Errors
    ///
    /// Returns `WordError::EmptyWord` if the word text is effectively empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        word: impl Into<String>,
        pronunciation: impl Into<String>,
        definition: impl Into<String>,
        origin: impl Into<String>,
        sentence: impl Into<String>,
        part_of_speech: impl Into<String>,
        difficulty: Difficulty,
        alternate: Option<String>,
    ) -> Result<Self, WordError> {
        let word = word.into().trim().to_string();
        if normalize_answer(&word).is_empty() {
            return Err(WordError::EmptyWord);
        }
        let alternate = alternate
            .map(|alt| alt.trim().to_string())
            .filter(|alt| !alt.is_empty());

        Ok(Self {
            word,
            pronunciation: pronunciation.into(),
            definition: definition.into(),
            origin: origin.into(),
            sentence: sentence.into(),
            part_of_speech: part_of_speech.into(),
            difficulty,
            alternate,
        })
    }

    /// Identifier used for solved/starred membership.
    #[must_use]
    pub fn id(&self) -> WordId {
        WordId::new(self.difficulty, &self.word)
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn pronunciation(&self) -> &str {
        &self.pronunciation
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    #[must_use]
    pub fn part_of_speech(&self) -> &str {
        &self.part_of_speech
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Alternate accepted spelling, when the list provides one.
    #[must_use]
    pub fn alternate(&self) -> Option<&str> {
        self.alternate.as_deref()
    }

    /// First character of the word text; used by the one-time hint.
    #[must_use]
    pub fn first_letter(&self) -> Option<char> {
        self.word.chars().next()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
