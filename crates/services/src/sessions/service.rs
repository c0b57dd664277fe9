use chrono::{DateTime, Utc};

use spell_core::judge::{Judgment, judge};
use spell_core::model::{
    Attempt, AttemptStatus, Progress, SessionConfig, WordEntry, active_words,
};

use super::progress::SessionSnapshot;
use crate::error::SessionError;

//
// ─── JUDGED SUBMISSION ─────────────────────────────────────────────────────────
//

/// Outcome of judging one submission, before persistence or audio effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgedSubmission {
    pub verdict: Judgment,
    pub newly_solved: bool,
    pub streak: u32,
    pub best_streak: u32,
    pub best_improved: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Single owner of mutable practice state: the active word list, the
/// current index and attempt, progress counters, and the activation
/// generation.
///
/// Activating a word (at construction, on explicit selection, or on
/// advance) discards the previous attempt and bumps `generation`; anything
/// scheduled against an older generation is stale. The session itself never
/// touches storage or audio; `PracticeService` wraps it with those effects.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    config: SessionConfig,
    words: Vec<WordEntry>,
    current: usize,
    attempt: Option<Attempt>,
    progress: Progress,
    generation: u64,
}

impl PracticeSession {
    /// Opens a session over the subset of `words` selected by `config`,
    /// activating the first word when the subset is non-empty.
    ///
    /// An empty subset is a valid session that rejects word operations with
    /// `SessionError::NoActiveWord`.
    #[must_use]
    pub fn new(
        words: &[WordEntry],
        config: SessionConfig,
        progress: Progress,
        now: DateTime<Utc>,
    ) -> Self {
        let active: Vec<WordEntry> = active_words(words, &config, progress.starred())
            .into_iter()
            .cloned()
            .collect();

        let mut session = Self {
            config,
            words: active,
            current: 0,
            attempt: None,
            progress,
            generation: 0,
        };
        if !session.words.is_empty() {
            session.activate_current(now);
        }
        session
    }

    fn activate_current(&mut self, now: DateTime<Utc>) {
        self.generation += 1;
        self.attempt = Some(Attempt::new(now));
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    #[must_use]
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_word(&self) -> Option<&WordEntry> {
        self.words.get(self.current)
    }

    #[must_use]
    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub(crate) fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    /// Generation of the most recent activation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Jumps to the word at `index` with a fresh attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSuchWord` when `index` is out of range.
    pub fn activate(&mut self, index: usize, now: DateTime<Utc>) -> Result<(), SessionError> {
        if index >= self.words.len() {
            return Err(SessionError::NoSuchWord(index));
        }
        self.current = index;
        self.activate_current(now);
        Ok(())
    }

    /// Moves to the next word. At the end of the list this is a no-op and
    /// returns `false`.
    pub fn advance(&mut self, now: DateTime<Utc>) -> bool {
        if self.current + 1 < self.words.len() {
            self.current += 1;
            self.activate_current(now);
            true
        } else {
            false
        }
    }

    /// Replaces the typed buffer of the current attempt. Ignored outside
    /// `Idle`, matching the attempt's own contract.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty.
    pub fn set_buffer(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        let attempt = self.attempt.as_mut().ok_or(SessionError::NoActiveWord)?;
        attempt.set_buffer(text);
        Ok(())
    }

    /// Judges the typed buffer against the current word and applies the
    /// verdict to the attempt and the progress counters.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty, or the
    /// attempt's own guard rejections.
    pub fn submit_current(&mut self, now: DateTime<Utc>) -> Result<JudgedSubmission, SessionError> {
        let Some(word) = self.words.get(self.current) else {
            return Err(SessionError::NoActiveWord);
        };
        let attempt = self.attempt.as_mut().ok_or(SessionError::NoActiveWord)?;

        attempt.submit()?;
        let verdict = judge(attempt.buffer(), word);
        attempt.resolve(verdict, now)?;
        let id = word.id();

        match verdict {
            Judgment::Correct => {
                let outcome = self.progress.record_correct(id);
                Ok(JudgedSubmission {
                    verdict,
                    newly_solved: outcome.newly_solved,
                    streak: outcome.streak,
                    best_streak: outcome.best_streak,
                    best_improved: outcome.best_improved,
                })
            }
            Judgment::Wrong => {
                self.progress.record_wrong();
                Ok(JudgedSubmission {
                    verdict,
                    newly_solved: false,
                    streak: 0,
                    best_streak: self.progress.best_streak(),
                    best_improved: false,
                })
            }
        }
    }

    /// Clears a wrong verdict and accepts input again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty, or the
    /// attempt's guard rejection.
    pub fn retry_current(&mut self) -> Result<(), SessionError> {
        let attempt = self.attempt.as_mut().ok_or(SessionError::NoActiveWord)?;
        attempt.retry()?;
        Ok(())
    }

    /// Fills the buffer with the correct spelling after a wrong verdict.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty, or the
    /// attempt's guard rejection.
    pub fn reveal_current(&mut self) -> Result<(), SessionError> {
        let Some(word) = self.words.get(self.current) else {
            return Err(SessionError::NoActiveWord);
        };
        let attempt = self.attempt.as_mut().ok_or(SessionError::NoActiveWord)?;
        attempt.reveal_answer(word.word())?;
        Ok(())
    }

    /// Spends the current word's one hint.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty, or the
    /// attempt's guard rejection.
    pub fn use_hint_current(&mut self) -> Result<(), SessionError> {
        let attempt = self.attempt.as_mut().ok_or(SessionError::NoActiveWord)?;
        attempt.use_hint()?;
        Ok(())
    }

    /// Latches the definition as shown for the current word.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty.
    pub fn reveal_definition_current(&mut self) -> Result<(), SessionError> {
        let attempt = self.attempt.as_mut().ok_or(SessionError::NoActiveWord)?;
        attempt.reveal_definition();
        Ok(())
    }

    /// Toggles the star on the current word. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty.
    pub fn toggle_star_current(&mut self) -> Result<bool, SessionError> {
        let Some(word) = self.words.get(self.current) else {
            return Err(SessionError::NoActiveWord);
        };
        let id = word.id();
        Ok(self.progress.toggle_star(id))
    }

    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> SessionSnapshot {
        let solved_in_scope = self
            .words
            .iter()
            .filter(|word| self.progress.is_solved(&word.id()))
            .count();
        let starred = self
            .current_word()
            .is_some_and(|word| self.progress.is_starred(&word.id()));
        let (status, time_remaining, hint_used, definition_revealed) = match &self.attempt {
            Some(attempt) => (
                attempt.status(),
                attempt.time_remaining(now),
                attempt.hint_used(),
                attempt.definition_revealed(),
            ),
            None => (AttemptStatus::Idle, 0, false, false),
        };

        SessionSnapshot {
            position: if self.words.is_empty() {
                0
            } else {
                self.current + 1
            },
            total: self.words.len(),
            solved_in_scope,
            streak: self.progress.streak(),
            best_streak: self.progress.best_streak(),
            status,
            time_remaining,
            starred,
            hint_used,
            definition_revealed,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use spell_core::model::{Difficulty, SessionScope, WORD_TIME_LIMIT_SECS};
    use spell_core::time::fixed_now;

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
            entry("jogging", Difficulty::OneBee),
            entry("mimic", Difficulty::TwoBee),
            entry("zephyr", Difficulty::ThreeBee),
        ]
    }

    fn open(words: &[WordEntry]) -> PracticeSession {
        PracticeSession::new(
            words,
            SessionConfig::new(SessionScope::All),
            Progress::new(),
            fixed_now(),
        )
    }

    #[test]
    fn construction_activates_the_first_word() {
        let session = open(&sample());
        assert_eq!(session.current_word().unwrap().word(), "jogging");
        assert_eq!(session.generation(), 1);
        assert!(session.attempt().is_some());
    }

    #[test]
    fn empty_subset_is_a_valid_session() {
        let words = sample();
        let config =
            SessionConfig::new(SessionScope::Tier(Difficulty::OneBee)).with_letter('z');
        let mut session =
            PracticeSession::new(&words, config, Progress::new(), fixed_now());

        assert!(session.is_empty());
        assert_eq!(session.generation(), 0);
        let err = session.submit_current(fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::NoActiveWord));
    }

    #[test]
    fn every_activation_bumps_the_generation() {
        let mut session = open(&sample());
        assert_eq!(session.generation(), 1);

        assert!(session.advance(fixed_now()));
        assert_eq!(session.generation(), 2);

        session.activate(0, fixed_now()).unwrap();
        assert_eq!(session.generation(), 3);
    }

    #[test]
    fn advance_stops_at_the_last_word() {
        let mut session = open(&sample());
        assert!(session.advance(fixed_now()));
        assert!(session.advance(fixed_now()));
        assert!(!session.advance(fixed_now()));
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn activate_rejects_out_of_range_indices() {
        let mut session = open(&sample());
        let err = session.activate(9, fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::NoSuchWord(9)));
    }

    #[test]
    fn correct_submission_walks_the_full_status_path() {
        let mut session = open(&sample());
        assert_eq!(session.attempt().unwrap().status(), AttemptStatus::Idle);

        session.set_buffer("Jogging").unwrap();
        let judged = session.submit_current(fixed_now()).unwrap();

        assert_eq!(judged.verdict, Judgment::Correct);
        assert!(judged.newly_solved);
        assert_eq!(judged.streak, 1);
        assert_eq!(session.attempt().unwrap().status(), AttemptStatus::Correct);
        assert!(
            session
                .progress()
                .solved()
                .iter()
                .any(|id| id.as_str() == "One Bee:jogging")
        );
    }

    #[test]
    fn wrong_submission_resets_streak_and_reveals_definition() {
        let mut session = open(&sample());
        session.set_buffer("joging").unwrap();
        let judged = session.submit_current(fixed_now()).unwrap();

        assert_eq!(judged.verdict, Judgment::Wrong);
        assert_eq!(judged.streak, 0);
        assert_eq!(session.attempt().unwrap().status(), AttemptStatus::Wrong);
        assert!(session.attempt().unwrap().definition_revealed());
    }

    #[test]
    fn double_submit_is_rejected() {
        let mut session = open(&sample());
        session.set_buffer("jogging").unwrap();
        session.submit_current(fixed_now()).unwrap();

        let err = session.submit_current(fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Attempt(spell_core::model::AttemptError::NotIdle)
        ));
    }

    #[test]
    fn starred_scope_with_letter_filter() {
        let words = vec![
            entry("mimic", Difficulty::OneBee),
            entry("marble", Difficulty::TwoBee),
            entry("zephyr", Difficulty::OneBee),
        ];
        let mut progress = Progress::new();
        progress.toggle_star(entry("mimic", Difficulty::OneBee).id());
        progress.toggle_star(entry("zephyr", Difficulty::OneBee).id());

        let config = SessionConfig::new(SessionScope::Starred).with_letter('M');
        let session = PracticeSession::new(&words, config, progress, fixed_now());

        let names: Vec<&str> = session.words().iter().map(WordEntry::word).collect();
        assert_eq!(names, ["mimic"]);
    }

    #[test]
    fn snapshot_reports_counts_and_countdown() {
        let mut session = open(&sample());
        session.set_buffer("jogging").unwrap();
        session.submit_current(fixed_now()).unwrap();

        let snap = session.snapshot(fixed_now());
        assert_eq!(snap.position, 1);
        assert_eq!(snap.total, 3);
        assert_eq!(snap.solved_in_scope, 1);
        assert_eq!(snap.streak, 1);
        assert_eq!(snap.status, AttemptStatus::Correct);
        assert_eq!(snap.time_remaining, WORD_TIME_LIMIT_SECS);
    }
}
