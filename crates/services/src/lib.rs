#![forbid(unsafe_code)]

pub mod error;
pub mod feedback;
pub mod leaderboard;
pub mod progress;
pub mod sessions;
pub mod speech;

pub use spell_core::Clock;

pub use error::{LeaderboardError, SessionError, SpeechError, SpeechInputError};
pub use leaderboard::{LEADERBOARD_LIMIT, LeaderboardEntry, LeaderboardService};
pub use progress::{ProgressService, Theme};
pub use sessions::{
    ADVANCE_DELAY_MS, AdvanceToken, PracticeService, PracticeSession, SessionSnapshot,
    SubmitOutcome,
};
pub use speech::{NullSpeech, ScriptedSpeechInput, SpeechInput, SpeechOutput, TranscriptEvent};
