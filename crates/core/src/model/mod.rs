pub mod attempt;
pub mod ids;
pub mod progress;
pub mod session;
pub mod word;

pub use attempt::{Attempt, AttemptError, AttemptStatus, WORD_TIME_LIMIT_SECS};
pub use ids::{ParseWordIdError, WordId};
pub use progress::{CorrectOutcome, Progress};
pub use session::{SessionConfig, SessionScope, active_words};
pub use word::{Difficulty, ParseDifficultyError, WordEntry, WordError};
