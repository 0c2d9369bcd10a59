use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least 2 options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct answer {index} is out of range for {len} options")]
    CorrectAnswerOutOfRange { index: usize, len: usize },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question, as loaded from a content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub subject: String,
}

impl QuestionDraft {
    /// Checks the draft and freezes it into a `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt or an option is blank, fewer than two
    /// options are given, or the correct answer does not index an option.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let prompt = self.question.trim();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let len = self.options.len();
        if len < 2 {
            return Err(QuestionError::TooFewOptions { len });
        }
        if let Some(index) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        if self.correct_answer >= len {
            return Err(QuestionError::CorrectAnswerOutOfRange {
                index: self.correct_answer,
                len,
            });
        }

        Ok(Question {
            id: self.id,
            prompt: prompt.to_owned(),
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation.trim().to_owned(),
            subject: self.subject.trim().to_owned(),
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_answer: usize,
    explanation: String,
    subject: String,
}

impl Question {
    /// Convenience constructor that validates in one step.
    ///
    /// # Errors
    ///
    /// See [`QuestionDraft::validate`].
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        explanation: impl Into<String>,
        subject: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        QuestionDraft {
            id,
            question: prompt.into(),
            options,
            correct_answer,
            explanation: explanation.into(),
            subject: subject.into(),
        }
        .validate()
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }

    /// Letter shown next to an option: `A` for 0, `B` for 1, and so on.
    ///
    /// Falls back to the 1-based number past `Z`.
    #[must_use]
    pub fn option_label(index: usize) -> String {
        match u8::try_from(index) {
            Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
            _ => (index + 1).to_string(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            id: QuestionId::new(1),
            question: "Where does photosynthesis occur?".into(),
            options: vec!["Nucleus".into(), "Chloroplasts".into()],
            correct_answer: 1,
            explanation: "Chloroplasts hold chlorophyll.".into(),
            subject: "Biology".into(),
        }
    }

    #[test]
    fn valid_draft_builds_question() {
        let q = draft().validate().unwrap();
        assert_eq!(q.id(), QuestionId::new(1));
        assert_eq!(q.option_count(), 2);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let mut d = draft();
        d.question = "   ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyPrompt);
    }

    #[test]
    fn single_option_is_rejected() {
        let mut d = draft();
        d.options.truncate(1);
        d.correct_answer = 0;
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::TooFewOptions { len: 1 }
        );
    }

    #[test]
    fn correct_answer_must_index_an_option() {
        let mut d = draft();
        d.correct_answer = 2;
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::CorrectAnswerOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn blank_option_is_rejected() {
        let mut d = draft();
        d.options[0] = " ".into();
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::EmptyOption { index: 0 }
        );
    }

    #[test]
    fn draft_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": 9,
            "question": "2 + 2?",
            "options": ["3", "4"],
            "correctAnswer": 1
        }"#;
        let q = serde_json::from_str::<QuestionDraft>(json)
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(q.id(), QuestionId::new(9));
        assert_eq!(q.subject(), "");
    }

    #[test]
    fn option_labels_are_letters() {
        assert_eq!(Question::option_label(0), "A");
        assert_eq!(Question::option_label(3), "D");
        assert_eq!(Question::option_label(26), "27");
    }
}
