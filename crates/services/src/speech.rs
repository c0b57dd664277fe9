//! Speech seams: the output (synthesis) and input (recognition) contracts,
//! plus the implementations that ship with the crate.
//!
//! Real engines live behind these traits in platform-specific crates; the
//! game logic only ever sees the contracts. Callers log speech failures and
//! keep going rather than let audio stall the game.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{SpeechError, SpeechInputError};

/// One step of a recognition pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// Interim hypothesis; replaces any previous partial.
    Partial(String),
    /// Committed transcript; replaces the buffer.
    Final(String),
    /// The recognizer closed the pass.
    Ended,
}

/// Spoken-audio output.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Speak `text`, resolving once the utterance completes.
    ///
    /// Implementations follow last-call-wins: a new `speak` interrupts any
    /// utterance still in flight. Nothing is queued.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when the engine cannot speak.
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;

    /// Cancel the in-flight utterance, if any.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when the engine cannot be reached.
    async fn stop(&self) -> Result<(), SpeechError>;
}

/// Spoken-answer input. One `listen` call is one recognition pass.
#[async_trait]
pub trait SpeechInput: Send + Sync {
    /// Begin a single-shot recognition pass and stream its events.
    ///
    /// The channel closes after [`TranscriptEvent::Ended`].
    ///
    /// # Errors
    ///
    /// Returns `SpeechInputError` when no pass can be started.
    async fn listen(&self) -> Result<mpsc::Receiver<TranscriptEvent>, SpeechInputError>;
}

/// Output implementation that swallows everything. Shipped default for
/// builds without a synthesis engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpeech;

#[async_trait]
impl SpeechOutput for NullSpeech {
    async fn speak(&self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        Ok(())
    }
}

type Script = Result<Vec<TranscriptEvent>, SpeechInputError>;

/// Replays scripted recognition passes; each `listen` call consumes the
/// next queued script. Used to drive voice flows in tests.
#[derive(Default)]
pub struct ScriptedSpeechInput {
    scripts: Mutex<VecDeque<Script>>,
}

impl ScriptedSpeechInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a pass that emits `events` in order.
    pub fn push_script(&self, events: Vec<TranscriptEvent>) {
        self.lock().push_back(Ok(events));
    }

    /// Queue a pass that fails to start.
    pub fn push_failure(&self, error: SpeechInputError) {
        self.lock().push_back(Err(error));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Script>> {
        self.scripts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SpeechInput for ScriptedSpeechInput {
    async fn listen(&self) -> Result<mpsc::Receiver<TranscriptEvent>, SpeechInputError> {
        let script = self
            .lock()
            .pop_front()
            .unwrap_or(Err(SpeechInputError::NoSpeech))?;

        let (tx, rx) = mpsc::channel(script.len().max(1));
        for event in script {
            // Capacity matches the script length, so this cannot fail.
            let _ = tx.try_send(event);
        }
        Ok(rx)
    }
}
