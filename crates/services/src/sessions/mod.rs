mod progress;
mod service;
mod workflow;

// Public API of the practice subsystem.
pub use crate::error::SessionError;
pub use progress::SessionSnapshot;
pub use service::{JudgedSubmission, PracticeSession};
pub use workflow::{ADVANCE_DELAY_MS, AdvanceToken, PracticeService, SubmitOutcome};
