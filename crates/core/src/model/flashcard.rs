use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::FlashcardId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlashcardError {
    #[error("flashcard front cannot be empty")]
    EmptyFront,

    #[error("flashcard back cannot be empty")]
    EmptyBack,

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = FlashcardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(FlashcardError::UnknownDifficulty(s.to_owned())),
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardDraft {
    pub id: FlashcardId,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl FlashcardDraft {
    /// # Errors
    ///
    /// Returns `FlashcardError::EmptyFront` / `EmptyBack` for blank sides.
    pub fn validate(self) -> Result<Flashcard, FlashcardError> {
        let front = self.front.trim();
        if front.is_empty() {
            return Err(FlashcardError::EmptyFront);
        }
        let back = self.back.trim();
        if back.is_empty() {
            return Err(FlashcardError::EmptyBack);
        }

        Ok(Flashcard {
            id: self.id,
            front: front.to_owned(),
            back: back.to_owned(),
            subject: self.subject.trim().to_owned(),
            difficulty: self.difficulty,
        })
    }
}

//
// ─── FLASHCARD ─────────────────────────────────────────────────────────────────
//

/// A two-sided review card. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flashcard {
    id: FlashcardId,
    front: String,
    back: String,
    subject: String,
    difficulty: Difficulty,
}

impl Flashcard {
    /// # Errors
    ///
    /// See [`FlashcardDraft::validate`].
    pub fn new(
        id: FlashcardId,
        front: impl Into<String>,
        back: impl Into<String>,
        subject: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, FlashcardError> {
        FlashcardDraft {
            id,
            front: front.into(),
            back: back.into(),
            subject: subject.into(),
            difficulty,
        }
        .validate()
    }

    #[must_use]
    pub fn id(&self) -> FlashcardId {
        self.id
    }

    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_sides_are_rejected() {
        let front = Flashcard::new(FlashcardId::new(1), " ", "b", "", Difficulty::Easy);
        assert_eq!(front.unwrap_err(), FlashcardError::EmptyFront);

        let back = Flashcard::new(FlashcardId::new(1), "f", "\n", "", Difficulty::Easy);
        assert_eq!(back.unwrap_err(), FlashcardError::EmptyBack);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(FlashcardError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn draft_reads_lowercase_difficulty() {
        let json = r#"{"id": 2, "front": "Q", "back": "A", "difficulty": "easy"}"#;
        let card = serde_json::from_str::<FlashcardDraft>(json)
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(card.difficulty(), Difficulty::Easy);
        assert_eq!(card.difficulty().to_string(), "easy");
    }
}
