//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use study_core::ErrorKind;
use study_core::model::SessionRecordError;
use study_core::session::{DeckError, QuizError};

/// Errors emitted by `ContentService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("content is required")]
    Empty,
    #[error("content is {len} characters; at least {min} are required")]
    TooShort { len: usize, min: usize },
    #[error("content generation failed: {0}")]
    Generation(String),
}

impl ContentError {
    /// Classification for validation rejections; `None` for backend failures.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ContentError::Empty | ContentError::TooShort { .. } => {
                Some(ErrorKind::ValidationFailure)
            }
            ContentError::Generation(_) => None,
        }
    }
}

/// Errors emitted while reading or writing session history.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error(transparent)]
    Record(#[from] SessionRecordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StudyLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("session is not completed yet")]
    NotCompleted,
    #[error(transparent)]
    History(#[from] HistoryError),
}

impl StudyError {
    /// Engine classification, when the error came from an engine.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            StudyError::Quiz(err) => Some(err.kind()),
            StudyError::Deck(err) => Some(err.kind()),
            StudyError::NotCompleted => Some(ErrorKind::InvalidState),
            StudyError::History(_) => None,
        }
    }
}

impl From<StorageError> for StudyError {
    fn from(err: StorageError) -> Self {
        Self::History(HistoryError::Storage(err))
    }
}
