use thiserror::Error;

use crate::model::{FlashcardError, QuestionError, SessionRecordError};
use crate::session::{DeckError, QuizError};

/// Coarse classification shared by every rejected operation.
///
/// Rejections never mutate engine state; the caller is expected to re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument was outside its allowed domain (index out of range, empty list).
    InvalidInput,
    /// The operation is not allowed in the current state (advance before reveal).
    InvalidState,
    /// Submitted content failed validation (too short, blank).
    ValidationFailure,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Flashcard(#[from] FlashcardError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Record(#[from] SessionRecordError),
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Question(_) | Error::Flashcard(_) | Error::Record(_) => ErrorKind::InvalidInput,
            Error::Quiz(err) => err.kind(),
            Error::Deck(err) => err.kind(),
        }
    }
}
