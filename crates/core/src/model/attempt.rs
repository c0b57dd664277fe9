use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::judge::Judgment;

/// Seconds granted per word before the countdown reads zero.
pub const WORD_TIME_LIMIT_SECS: u32 = 80;

/// Where a single attempt at one word currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttemptStatus {
    /// Accepting input.
    #[default]
    Idle,
    /// Submitted, verdict pending.
    Judging,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("nothing has been typed yet")]
    EmptyBuffer,
    #[error("attempt is not accepting input")]
    NotIdle,
    #[error("attempt is not awaiting a verdict")]
    NotJudging,
    #[error("attempt has not been judged wrong")]
    NotWrong,
    #[error("the hint was already used for this word")]
    HintUsed,
}

/// One try at spelling one word.
///
/// The status moves `Idle -> Judging -> Correct | Wrong`, and from `Wrong`
/// back to `Idle` via [`Attempt::retry`] or [`Attempt::reveal_answer`].
/// Every transition is guarded; a call made in the wrong status returns an
/// error instead of corrupting state. Hint and definition reveals stick for
/// the lifetime of the attempt, across retries of the same word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    buffer: String,
    status: AttemptStatus,
    started_at: DateTime<Utc>,
    solved_at: Option<DateTime<Utc>>,
    hint_used: bool,
    definition_revealed: bool,
}

impl Attempt {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            buffer: String::new(),
            status: AttemptStatus::Idle,
            started_at: now,
            solved_at: None,
            hint_used: false,
            definition_revealed: false,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn solved_at(&self) -> Option<DateTime<Utc>> {
        self.solved_at
    }

    #[must_use]
    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    #[must_use]
    pub fn definition_revealed(&self) -> bool {
        self.definition_revealed
    }

    /// Replaces the typed buffer. Edits outside `Idle` are ignored.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        if self.status == AttemptStatus::Idle {
            self.buffer = text.into();
        }
    }

    /// Hands the buffer over for judging.
    ///
    /// Requires `Idle` and a buffer that is non-empty once normalized, so a
    /// submission of pure whitespace never reaches the judge.
    pub fn submit(&mut self) -> Result<(), AttemptError> {
        if self.status != AttemptStatus::Idle {
            return Err(AttemptError::NotIdle);
        }
        if crate::normalize::normalize_answer(&self.buffer).is_empty() {
            return Err(AttemptError::EmptyBuffer);
        }
        self.status = AttemptStatus::Judging;
        Ok(())
    }

    /// Applies the judge's verdict.
    ///
    /// A correct verdict freezes the countdown at `now`; a wrong one reveals
    /// the definition so the word can be studied before a retry.
    pub fn resolve(&mut self, verdict: Judgment, now: DateTime<Utc>) -> Result<(), AttemptError> {
        if self.status != AttemptStatus::Judging {
            return Err(AttemptError::NotJudging);
        }
        match verdict {
            Judgment::Correct => {
                self.status = AttemptStatus::Correct;
                self.solved_at = Some(now);
            }
            Judgment::Wrong => {
                self.status = AttemptStatus::Wrong;
                self.definition_revealed = true;
            }
        }
        Ok(())
    }

    /// Clears a wrong answer and goes back to accepting input.
    ///
    /// The countdown keeps running from the original start; retries do not
    /// grant extra time.
    pub fn retry(&mut self) -> Result<(), AttemptError> {
        if self.status != AttemptStatus::Wrong {
            return Err(AttemptError::NotWrong);
        }
        self.buffer.clear();
        self.status = AttemptStatus::Idle;
        Ok(())
    }

    /// Shows the correct spelling after a wrong answer.
    ///
    /// The buffer is filled with the word and the attempt returns to `Idle`
    /// so the student can study or retype it. Revealing never marks the
    /// word solved.
    pub fn reveal_answer(&mut self, word: &str) -> Result<(), AttemptError> {
        if self.status != AttemptStatus::Wrong {
            return Err(AttemptError::NotWrong);
        }
        self.buffer = word.to_owned();
        self.status = AttemptStatus::Idle;
        Ok(())
    }

    /// Spends the one hint this attempt gets. Only available while idle.
    pub fn use_hint(&mut self) -> Result<(), AttemptError> {
        if self.status != AttemptStatus::Idle {
            return Err(AttemptError::NotIdle);
        }
        if self.hint_used {
            return Err(AttemptError::HintUsed);
        }
        self.hint_used = true;
        Ok(())
    }

    /// Marks the definition as shown. Idempotent.
    pub fn reveal_definition(&mut self) {
        self.definition_revealed = true;
    }

    /// Seconds left on the countdown at `now`.
    ///
    /// Clamped at zero once the limit has passed, and frozen at the moment
    /// of a correct answer.
    #[must_use]
    pub fn time_remaining(&self, now: DateTime<Utc>) -> u32 {
        let end = self.solved_at.unwrap_or(now);
        let elapsed = end.signed_duration_since(self.started_at).num_seconds().max(0);
        let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
        WORD_TIME_LIMIT_SECS.saturating_sub(elapsed)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn judged(verdict: Judgment) -> Attempt {
        let mut attempt = Attempt::new(fixed_now());
        attempt.set_buffer("anything");
        attempt.submit().unwrap();
        attempt.resolve(verdict, fixed_now()).unwrap();
        attempt
    }

    #[test]
    fn submit_requires_a_non_empty_buffer() {
        let mut attempt = Attempt::new(fixed_now());
        assert_eq!(attempt.submit(), Err(AttemptError::EmptyBuffer));

        attempt.set_buffer("  ., ");
        assert_eq!(attempt.submit(), Err(AttemptError::EmptyBuffer));

        attempt.set_buffer("jogging");
        assert_eq!(attempt.submit(), Ok(()));
        assert_eq!(attempt.status(), AttemptStatus::Judging);
    }

    #[test]
    fn submit_twice_is_rejected() {
        let mut attempt = Attempt::new(fixed_now());
        attempt.set_buffer("jogging");
        attempt.submit().unwrap();
        assert_eq!(attempt.submit(), Err(AttemptError::NotIdle));
    }

    #[test]
    fn resolve_outside_judging_is_rejected() {
        let mut attempt = Attempt::new(fixed_now());
        assert_eq!(
            attempt.resolve(Judgment::Correct, fixed_now()),
            Err(AttemptError::NotJudging)
        );
    }

    #[test]
    fn edits_are_ignored_while_judging() {
        let mut attempt = Attempt::new(fixed_now());
        attempt.set_buffer("jogging");
        attempt.submit().unwrap();

        attempt.set_buffer("tampered");
        assert_eq!(attempt.buffer(), "jogging");
    }

    #[test]
    fn correct_verdict_records_solved_time() {
        let solved = fixed_now() + Duration::seconds(12);
        let mut attempt = Attempt::new(fixed_now());
        attempt.set_buffer("jogging");
        attempt.submit().unwrap();
        attempt.resolve(Judgment::Correct, solved).unwrap();

        assert_eq!(attempt.status(), AttemptStatus::Correct);
        assert_eq!(attempt.solved_at(), Some(solved));
    }

    #[test]
    fn wrong_verdict_reveals_the_definition() {
        let attempt = judged(Judgment::Wrong);
        assert_eq!(attempt.status(), AttemptStatus::Wrong);
        assert!(attempt.definition_revealed());
    }

    #[test]
    fn retry_clears_the_buffer_but_keeps_reveals() {
        let mut attempt = Attempt::new(fixed_now());
        attempt.use_hint().unwrap();
        attempt.set_buffer("joging");
        attempt.submit().unwrap();
        attempt.resolve(Judgment::Wrong, fixed_now()).unwrap();
        attempt.retry().unwrap();

        assert_eq!(attempt.status(), AttemptStatus::Idle);
        assert_eq!(attempt.buffer(), "");
        assert!(attempt.definition_revealed());
        assert!(attempt.hint_used());
    }

    #[test]
    fn retry_requires_a_wrong_verdict() {
        let mut attempt = Attempt::new(fixed_now());
        assert_eq!(attempt.retry(), Err(AttemptError::NotWrong));

        let mut attempt = judged(Judgment::Correct);
        assert_eq!(attempt.retry(), Err(AttemptError::NotWrong));
    }

    #[test]
    fn reveal_answer_fills_the_buffer_and_returns_to_idle() {
        let mut attempt = judged(Judgment::Wrong);
        attempt.reveal_answer("jogging").unwrap();
        assert_eq!(attempt.buffer(), "jogging");
        assert_eq!(attempt.status(), AttemptStatus::Idle);
    }

    #[test]
    fn hint_is_single_use_per_word() {
        let mut attempt = Attempt::new(fixed_now());
        assert_eq!(attempt.use_hint(), Ok(()));
        assert_eq!(attempt.use_hint(), Err(AttemptError::HintUsed));
    }

    #[test]
    fn hint_requires_idle() {
        let mut attempt = Attempt::new(fixed_now());
        attempt.set_buffer("jogging");
        attempt.submit().unwrap();
        assert_eq!(attempt.use_hint(), Err(AttemptError::NotIdle));
    }

    #[test]
    fn countdown_clamps_at_zero() {
        let attempt = Attempt::new(fixed_now());
        let late = fixed_now() + Duration::seconds(i64::from(WORD_TIME_LIMIT_SECS) + 40);
        assert_eq!(attempt.time_remaining(late), 0);
    }

    #[test]
    fn countdown_freezes_once_solved() {
        let solved = fixed_now() + Duration::seconds(30);
        let mut attempt = Attempt::new(fixed_now());
        attempt.set_buffer("jogging");
        attempt.submit().unwrap();
        attempt.resolve(Judgment::Correct, solved).unwrap();

        let much_later = solved + Duration::seconds(500);
        assert_eq!(attempt.time_remaining(much_later), WORD_TIME_LIMIT_SECS - 30);
    }

    #[test]
    fn countdown_counts_down_from_the_limit() {
        let attempt = Attempt::new(fixed_now());
        assert_eq!(attempt.time_remaining(fixed_now()), WORD_TIME_LIMIT_SECS);
        assert_eq!(
            attempt.time_remaining(fixed_now() + Duration::seconds(15)),
            WORD_TIME_LIMIT_SECS - 15
        );
    }
}
