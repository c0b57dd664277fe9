use thiserror::Error;

use crate::model::attempt::AttemptError;
use crate::model::ids::ParseWordIdError;
use crate::model::word::WordError;
use crate::wordlist::WordListError;

/// Aggregate error for everything this crate can reject.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    WordList(#[from] WordListError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    ParseId(#[from] ParseWordIdError),
}
