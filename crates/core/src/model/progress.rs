use std::collections::BTreeSet;

use crate::model::ids::WordId;

/// Durable study progress: which words were solved, which are starred, and
/// the streak counters.
///
/// The sets grow only through the explicit actions below (a correct
/// judgment, a star toggle) and are never regenerated from the word list.
/// `BTreeSet` keeps persistence ordered and duplicate-free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    solved: BTreeSet<WordId>,
    starred: BTreeSet<WordId>,
    streak: u32,
    best_streak: u32,
}

/// What changed when a correct answer was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectOutcome {
    /// False when the word had already been solved before.
    pub newly_solved: bool,
    pub streak: u32,
    pub best_streak: u32,
    /// True when this answer pushed the best streak higher.
    pub best_improved: bool,
}

impl Progress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates progress from persisted parts.
    ///
    /// The current streak always restarts at zero; only the best streak is
    /// durable across sessions.
    #[must_use]
    pub fn from_persisted(
        solved: BTreeSet<WordId>,
        starred: BTreeSet<WordId>,
        best_streak: u32,
    ) -> Self {
        Self {
            solved,
            starred,
            streak: 0,
            best_streak,
        }
    }

    /// Records a correct judgment: idempotent solved insert, streak bump,
    /// best-streak update when exceeded.
    pub fn record_correct(&mut self, id: WordId) -> CorrectOutcome {
        let newly_solved = self.solved.insert(id);
        self.streak = self.streak.saturating_add(1);
        let best_improved = self.streak > self.best_streak;
        if best_improved {
            self.best_streak = self.streak;
        }
        CorrectOutcome {
            newly_solved,
            streak: self.streak,
            best_streak: self.best_streak,
            best_improved,
        }
    }

    /// Records a wrong judgment: the streak resets, nothing else moves.
    pub fn record_wrong(&mut self) {
        self.streak = 0;
    }

    /// Toggles starred membership for a word. Returns whether the word is
    /// starred afterwards. Toggling twice restores the original state.
    pub fn toggle_star(&mut self, id: WordId) -> bool {
        if self.starred.remove(&id) {
            false
        } else {
            self.starred.insert(id);
            true
        }
    }

    #[must_use]
    pub fn is_solved(&self, id: &WordId) -> bool {
        self.solved.contains(id)
    }

    #[must_use]
    pub fn is_starred(&self, id: &WordId) -> bool {
        self.starred.contains(id)
    }

    #[must_use]
    pub fn solved(&self) -> &BTreeSet<WordId> {
        &self.solved
    }

    #[must_use]
    pub fn starred(&self) -> &BTreeSet<WordId> {
        &self.starred
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Wipes everything back to a fresh state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::word::Difficulty;

    fn id(word: &str) -> WordId {
        WordId::new(Difficulty::OneBee, word)
    }

    #[test]
    fn correct_marks_solved_and_bumps_streak() {
        let mut progress = Progress::new();
        let outcome = progress.record_correct(id("jogging"));

        assert!(outcome.newly_solved);
        assert_eq!(outcome.streak, 1);
        assert_eq!(outcome.best_streak, 1);
        assert!(progress.is_solved(&id("jogging")));
    }

    #[test]
    fn solving_the_same_word_twice_is_idempotent_on_the_set() {
        let mut progress = Progress::new();
        progress.record_correct(id("jogging"));
        let outcome = progress.record_correct(id("jogging"));

        assert!(!outcome.newly_solved);
        assert_eq!(progress.solved().len(), 1);
        // The streak still counts consecutive correct answers.
        assert_eq!(outcome.streak, 2);
    }

    #[test]
    fn streak_sequence_matches_expected_bookkeeping() {
        // Outcomes C,C,C,W,C: streak ends at 1, best at 3.
        let mut progress = Progress::new();
        progress.record_correct(id("a"));
        progress.record_correct(id("b"));
        progress.record_correct(id("c"));
        progress.record_wrong();
        progress.record_correct(id("d"));

        assert_eq!(progress.streak(), 1);
        assert_eq!(progress.best_streak(), 3);
    }

    #[test]
    fn best_streak_never_decreases() {
        let mut progress = Progress::from_persisted(BTreeSet::new(), BTreeSet::new(), 5);
        progress.record_correct(id("a"));
        progress.record_wrong();

        assert_eq!(progress.streak(), 0);
        assert_eq!(progress.best_streak(), 5);

        for word in ["b", "c", "d", "e", "f", "g"] {
            progress.record_correct(id(word));
        }
        assert_eq!(progress.best_streak(), 6);
    }

    #[test]
    fn star_toggle_is_its_own_inverse() {
        let mut progress = Progress::new();
        let was_empty = progress.starred().clone();

        assert!(progress.toggle_star(id("zephyr")));
        assert!(progress.is_starred(&id("zephyr")));
        assert!(!progress.toggle_star(id("zephyr")));
        assert_eq!(progress.starred(), &was_empty);
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut progress = Progress::new();
        progress.record_correct(id("a"));
        progress.toggle_star(id("b"));
        progress.reset();

        assert_eq!(progress, Progress::new());
    }

    #[test]
    fn rehydration_keeps_best_but_restarts_streak() {
        let solved = BTreeSet::from([id("a"), id("b")]);
        let starred = BTreeSet::from([id("b")]);
        let progress = Progress::from_persisted(solved, starred, 9);

        assert_eq!(progress.streak(), 0);
        assert_eq!(progress.best_streak(), 9);
        assert_eq!(progress.solved().len(), 2);
        assert!(progress.is_starred(&id("b")));
    }
}
