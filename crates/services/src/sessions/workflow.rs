use std::sync::Arc;

use spell_core::Clock;
use spell_core::judge::Judgment;
use spell_core::model::{SessionConfig, WordEntry};
use spell_core::normalize_answer;
use storage::repository::StateStore;

use super::service::PracticeSession;
use crate::error::SessionError;
use crate::feedback;
use crate::progress::{ProgressService, Theme};
use crate::speech::{SpeechInput, SpeechOutput, TranscriptEvent};

/// Milliseconds between a correct answer and the automatic advance.
pub const ADVANCE_DELAY_MS: u64 = 1800;

/// Claim ticket for a scheduled advance.
///
/// Valid only while the word that produced it is still active; any
/// activation in between makes it stale, and a stale token does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken {
    generation: u64,
}

impl AdvanceToken {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the caller learns from one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub verdict: Judgment,
    pub newly_solved: bool,
    pub streak: u32,
    pub best_streak: u32,
    /// Present after a correct answer: schedule the delayed advance with it.
    pub advance: Option<AdvanceToken>,
}

/// Orchestrates practice: judging via [`PracticeSession`], write-through
/// persistence, and spoken feedback.
///
/// Storage and speech failures inside the game flow are logged and
/// swallowed; the in-memory session stays authoritative.
#[derive(Clone)]
pub struct PracticeService {
    clock: Clock,
    progress: ProgressService,
    speech: Arc<dyn SpeechOutput>,
}

impl PracticeService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn StateStore>, speech: Arc<dyn SpeechOutput>) -> Self {
        Self {
            clock,
            progress: ProgressService::new(store),
            speech,
        }
    }

    /// Loads persisted progress (degrading to defaults) and opens a session
    /// over the words selected by `config`.
    pub async fn start_session(
        &self,
        words: &[WordEntry],
        config: SessionConfig,
    ) -> PracticeSession {
        let progress = self.progress.load().await;
        PracticeSession::new(words, config, progress, self.clock.now())
    }

    /// Judges the typed buffer.
    ///
    /// On a correct answer the solved set (and the best streak, when it
    /// improved) is written through, praise is spoken, and the returned
    /// outcome carries an [`AdvanceToken`] for the delayed advance. On a
    /// wrong answer the streak resets and a gentler line is spoken.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for guard rejections; persistence and speech
    /// failures are logged, never returned.
    pub async fn submit_answer(
        &self,
        session: &mut PracticeSession,
    ) -> Result<SubmitOutcome, SessionError> {
        let judged = session.submit_current(self.clock.now())?;

        match judged.verdict {
            Judgment::Correct => {
                if let Err(err) = self.progress.save_solved(session.progress().solved()).await {
                    log::warn!("could not persist solved words: {err}");
                }
                if judged.best_improved {
                    if let Err(err) = self.progress.save_best_streak(judged.best_streak).await {
                        log::warn!("could not persist best streak: {err}");
                    }
                }
                self.say(feedback::praise()).await;
                Ok(SubmitOutcome {
                    verdict: judged.verdict,
                    newly_solved: judged.newly_solved,
                    streak: judged.streak,
                    best_streak: judged.best_streak,
                    advance: Some(AdvanceToken {
                        generation: session.generation(),
                    }),
                })
            }
            Judgment::Wrong => {
                self.say(feedback::encouragement()).await;
                Ok(SubmitOutcome {
                    verdict: judged.verdict,
                    newly_solved: false,
                    streak: 0,
                    best_streak: judged.best_streak,
                    advance: None,
                })
            }
        }
    }

    /// Applies a scheduled advance when the word that produced `token` is
    /// still active. Returns whether the session moved.
    pub fn advance_if_current(&self, session: &mut PracticeSession, token: AdvanceToken) -> bool {
        if token.generation() != session.generation() {
            return false;
        }
        session.advance(self.clock.now())
    }

    /// Jumps to the word at `index`, cancelling any in-flight speech.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSuchWord` when `index` is out of range.
    pub async fn activate(
        &self,
        session: &mut PracticeSession,
        index: usize,
    ) -> Result<(), SessionError> {
        if let Err(err) = self.speech.stop().await {
            log::warn!("could not stop speech: {err}");
        }
        session.activate(index, self.clock.now())
    }

    /// Clears a wrong verdict and accepts input again.
    ///
    /// # Errors
    ///
    /// Returns the session's guard rejections.
    pub fn retry(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        session.retry_current()
    }

    /// Fills the buffer with the correct spelling. Never marks the word
    /// solved.
    ///
    /// # Errors
    ///
    /// Returns the session's guard rejections.
    pub fn reveal_word(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        session.reveal_current()
    }

    /// Spends the word's one hint and speaks its opening letter.
    ///
    /// # Errors
    ///
    /// Returns the session's guard rejections.
    pub async fn play_hint(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        session.use_hint_current()?;
        if let Some(letter) = session.current_word().and_then(WordEntry::first_letter) {
            self.say(&feedback::hint_phrase(letter)).await;
        }
        Ok(())
    }

    /// Speaks the current word and its example sentence.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty.
    pub async fn pronounce_current(&self, session: &PracticeSession) -> Result<(), SessionError> {
        let word = session.current_word().ok_or(SessionError::NoActiveWord)?;
        let line = format!("{}. {}", word.word(), word.sentence());
        self.say(&line).await;
        Ok(())
    }

    /// Latches the definition as shown for the current word.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty.
    pub fn reveal_definition(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        session.reveal_definition_current()
    }

    /// Toggles the star on the current word and writes the set through.
    /// Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveWord` when the list is empty.
    pub async fn toggle_star(&self, session: &mut PracticeSession) -> Result<bool, SessionError> {
        let starred = session.toggle_star_current()?;
        if let Err(err) = self.progress.save_starred(session.progress().starred()).await {
            log::warn!("could not persist starred words: {err}");
        }
        Ok(starred)
    }

    pub async fn theme(&self) -> Theme {
        self.progress.theme().await
    }

    pub async fn set_theme(&self, theme: Theme) {
        if let Err(err) = self.progress.save_theme(theme).await {
            log::warn!("could not persist theme: {err}");
        }
    }

    pub async fn has_consent(&self) -> bool {
        self.progress.has_consent().await
    }

    pub async fn acknowledge_consent(&self) {
        if let Err(err) = self.progress.record_consent().await {
            log::warn!("could not persist consent: {err}");
        }
    }

    /// Clears the persisted keys and the in-memory counters. Unlike the
    /// write-throughs inside the game flow, a failed removal is returned.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when a removal fails.
    pub async fn reset_progress(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        self.progress.reset().await?;
        session.progress_mut().reset();
        Ok(())
    }

    /// Runs one recognition pass and submits the spoken answer.
    ///
    /// Partial transcripts update the buffer, a final transcript replaces
    /// it, and `Ended` submits. When nothing usable was heard this returns
    /// `Ok(None)` and the word stays open.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SpeechInput` when no pass can be started, or
    /// the usual guard rejections on submission.
    pub async fn listen_and_submit(
        &self,
        session: &mut PracticeSession,
        input: &dyn SpeechInput,
    ) -> Result<Option<SubmitOutcome>, SessionError> {
        if session.current_word().is_none() {
            return Err(SessionError::NoActiveWord);
        }

        let mut events = input.listen().await?;
        while let Some(event) = events.recv().await {
            match event {
                TranscriptEvent::Partial(text) | TranscriptEvent::Final(text) => {
                    session.set_buffer(text)?;
                }
                TranscriptEvent::Ended => break,
            }
        }

        let nothing_heard = session
            .attempt()
            .is_none_or(|attempt| normalize_answer(attempt.buffer()).is_empty());
        if nothing_heard {
            return Ok(None);
        }
        self.submit_answer(session).await.map(Some)
    }

    async fn say(&self, text: &str) {
        if let Err(err) = self.speech.speak(text).await {
            log::warn!("speech output failed: {err}");
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
