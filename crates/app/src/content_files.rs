use std::path::{Path, PathBuf};

use study_core::model::{
    Flashcard, FlashcardDraft, FlashcardError, Question, QuestionDraft, QuestionError,
};
use thiserror::Error;

/// Failure to load a JSON content file.
#[derive(Debug, Error)]
pub enum ContentFileError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} question #{index}: {source}", .path.display())]
    Question {
        path: PathBuf,
        index: usize,
        #[source]
        source: QuestionError,
    },
    #[error("{} flashcard #{index}: {source}", .path.display())]
    Flashcard {
        path: PathBuf,
        index: usize,
        #[source]
        source: FlashcardError,
    },
}

fn read(path: &Path) -> Result<String, ContentFileError> {
    std::fs::read_to_string(path).map_err(|source| ContentFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON array of questions (`id`, `question`, `options`, `correctAnswer`, …).
pub fn parse_questions(path: &Path, raw: &str) -> Result<Vec<Question>, ContentFileError> {
    let drafts: Vec<QuestionDraft> =
        serde_json::from_str(raw).map_err(|source| ContentFileError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            draft.validate().map_err(|source| ContentFileError::Question {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

/// Parse a JSON array of flashcards (`id`, `front`, `back`, `subject`, `difficulty`).
pub fn parse_flashcards(path: &Path, raw: &str) -> Result<Vec<Flashcard>, ContentFileError> {
    let drafts: Vec<FlashcardDraft> =
        serde_json::from_str(raw).map_err(|source| ContentFileError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            draft.validate().map_err(|source| ContentFileError::Flashcard {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

pub fn load_questions(path: &Path) -> Result<Vec<Question>, ContentFileError> {
    parse_questions(path, &read(path)?)
}

pub fn load_flashcards(path: &Path) -> Result<Vec<Flashcard>, ContentFileError> {
    parse_flashcards(path, &read(path)?)
}
