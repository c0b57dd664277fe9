use std::collections::BTreeSet;

use crate::model::ids::WordId;
use crate::model::word::{Difficulty, WordEntry};

/// Which slice of the word list a practice session draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionScope {
    /// Every word in the list.
    #[default]
    All,
    /// Only words of one difficulty tier.
    Tier(Difficulty),
    /// Only words the student has starred.
    Starred,
}

/// Session filters chosen before practice starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    scope: SessionScope,
    letter: Option<char>,
}

impl SessionConfig {
    #[must_use]
    pub fn new(scope: SessionScope) -> Self {
        Self {
            scope,
            letter: None,
        }
    }

    /// Restricts the session to words starting with `letter`.
    ///
    /// Stored lowercased so the filter is case-insensitive.
    #[must_use]
    pub fn with_letter(mut self, letter: char) -> Self {
        self.letter = letter.to_lowercase().next();
        self
    }

    #[must_use]
    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    #[must_use]
    pub fn letter(&self) -> Option<char> {
        self.letter
    }
}

/// Selects the words a session will cycle through.
///
/// Word-list order is preserved; filters only remove entries. An empty
/// result is a valid (if short) session.
#[must_use]
pub fn active_words<'a>(
    words: &'a [WordEntry],
    config: &SessionConfig,
    starred: &BTreeSet<WordId>,
) -> Vec<&'a WordEntry> {
    words
        .iter()
        .filter(|entry| match config.scope() {
            SessionScope::All => true,
            SessionScope::Tier(tier) => entry.difficulty() == tier,
            SessionScope::Starred => starred.contains(&entry.id()),
        })
        .filter(|entry| match config.letter() {
            Some(letter) => entry
                .first_letter()
                .is_some_and(|first| first.to_lowercase().next() == Some(letter)),
            None => true,
        })
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, difficulty: Difficulty) -> WordEntry {
        WordEntry::new(
            word,
            "pron",
            "def",
            "origin",
            "sentence",
            "noun",
            difficulty,
            None,
        )
        .unwrap()
    }

    fn sample() -> Vec<WordEntry> {
        vec![
            entry("apple", Difficulty::OneBee),
            entry("banana", Difficulty::OneBee),
            entry("arcane", Difficulty::TwoBee),
            entry("Abyssal", Difficulty::ThreeBee),
        ]
    }

    #[test]
    fn all_scope_keeps_everything_in_order() {
        let words = sample();
        let picked = active_words(&words, &SessionConfig::default(), &BTreeSet::new());
        let names: Vec<&str> = picked.iter().map(|w| w.word()).collect();
        assert_eq!(names, ["apple", "banana", "arcane", "Abyssal"]);
    }

    #[test]
    fn tier_scope_filters_by_difficulty() {
        let words = sample();
        let config = SessionConfig::new(SessionScope::Tier(Difficulty::OneBee));
        let picked = active_words(&words, &config, &BTreeSet::new());
        let names: Vec<&str> = picked.iter().map(|w| w.word()).collect();
        assert_eq!(names, ["apple", "banana"]);
    }

    #[test]
    fn starred_scope_uses_the_star_set() {
        let words = sample();
        let starred = BTreeSet::from([WordId::new(Difficulty::TwoBee, "arcane")]);
        let config = SessionConfig::new(SessionScope::Starred);
        let picked = active_words(&words, &config, &starred);
        let names: Vec<&str> = picked.iter().map(|w| w.word()).collect();
        assert_eq!(names, ["arcane"]);
    }

    #[test]
    fn letter_filter_is_case_insensitive() {
        let words = sample();
        let config = SessionConfig::default().with_letter('A');
        let picked = active_words(&words, &config, &BTreeSet::new());
        let names: Vec<&str> = picked.iter().map(|w| w.word()).collect();
        // "Abyssal" starts with an uppercase letter and still matches.
        assert_eq!(names, ["apple", "arcane", "Abyssal"]);
    }

    #[test]
    fn filters_compose_and_may_leave_nothing() {
        let words = sample();
        let config = SessionConfig::new(SessionScope::Tier(Difficulty::OneBee)).with_letter('z');
        let picked = active_words(&words, &config, &BTreeSet::new());
        assert!(picked.is_empty());
    }
}
