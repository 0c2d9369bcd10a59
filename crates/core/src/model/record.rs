use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::session::percentage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionRecordError {
    #[error("a session record needs at least one item")]
    NoItems,

    #[error("correct answers ({correct}) exceed question count ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

/// What kind of session produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Quiz { correct: u32, total: u32 },
    Flashcards { cards: u32 },
}

/// Result of one finished study session, as kept in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    kind: SessionKind,
    subject: Option<String>,
    completed_at: DateTime<Utc>,
}

impl SessionRecord {
    /// # Errors
    ///
    /// Returns `SessionRecordError::NoItems` for an empty quiz and
    /// `SessionRecordError::CorrectExceedsTotal` when counts disagree.
    pub fn quiz(
        subject: Option<String>,
        correct: u32,
        total: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionRecordError> {
        if total == 0 {
            return Err(SessionRecordError::NoItems);
        }
        if correct > total {
            return Err(SessionRecordError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self {
            kind: SessionKind::Quiz { correct, total },
            subject: normalize_subject(subject),
            completed_at,
        })
    }

    /// # Errors
    ///
    /// Returns `SessionRecordError::NoItems` when no cards were reviewed.
    pub fn flashcards(
        subject: Option<String>,
        cards: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionRecordError> {
        if cards == 0 {
            return Err(SessionRecordError::NoItems);
        }
        Ok(Self {
            kind: SessionKind::Flashcards { cards },
            subject: normalize_subject(subject),
            completed_at,
        })
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn is_quiz(&self) -> bool {
        matches!(self.kind, SessionKind::Quiz { .. })
    }

    /// Rounded percentage for quiz records, `None` for flashcard reviews.
    #[must_use]
    pub fn score(&self) -> Option<u8> {
        match self.kind {
            SessionKind::Quiz { correct, total } => {
                Some(percentage(correct as usize, total as usize))
            }
            SessionKind::Flashcards { .. } => None,
        }
    }
}

fn normalize_subject(subject: Option<String>) -> Option<String> {
    subject
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
