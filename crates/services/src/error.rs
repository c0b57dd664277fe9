//! Shared error types for the services crate.

use thiserror::Error;

use spell_core::model::AttemptError;
use storage::repository::StorageError;

/// Errors emitted by `SpeechOutput` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech output is unavailable")]
    Unavailable,
    #[error("speech output failed: {0}")]
    Failed(String),
}

/// Errors emitted by `SpeechInput` implementations.
///
/// All of these are user-visible and transient: the caller reports them and
/// offers another listening pass. None of them end a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SpeechInputError {
    #[error("no microphone is available")]
    NoMicrophone,
    #[error("microphone permission was denied")]
    PermissionDenied,
    #[error("no speech was detected")]
    NoSpeech,
    #[error("speech recognition network failure: {0}")]
    Network(String),
}

/// Errors emitted by the practice session service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no word is active in this session")]
    NoActiveWord,
    #[error("no word at position {0}")]
    NoSuchWord(usize),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    SpeechInput(#[from] SpeechInputError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error("leaderboard is not configured")]
    Disabled,
    #[error("leaderboard request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
