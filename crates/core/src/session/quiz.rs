use std::collections::HashSet;

use thiserror::Error;

use crate::error::ErrorKind;
use crate::model::{Question, QuestionId};
use crate::progress::Progress;

use super::percentage;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a quiz needs at least one question")]
    Empty,

    #[error("question {0} appears more than once")]
    DuplicateQuestion(QuestionId),

    #[error("option {index} is out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },

    #[error("answer must be revealed before advancing")]
    NotRevealed,

    #[error("quiz already completed")]
    Completed,
}

impl QuizError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::Empty
            | QuizError::DuplicateQuestion(_)
            | QuizError::OptionOutOfRange { .. } => ErrorKind::InvalidInput,
            QuizError::AlreadyAnswered { .. } | QuizError::NotRevealed | QuizError::Completed => {
                ErrorKind::InvalidState
            }
        }
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for an answer to the current question.
    Answering,
    /// The current answer and its explanation are visible; selection is locked.
    Revealed,
    /// The last question has been confirmed. Only `reset` is accepted.
    Completed,
}

/// Outcome of checking one question's recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Unanswered,
    Correct,
    Incorrect,
}

/// How an option should be rendered for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// Nothing revealed yet.
    Idle,
    /// The correct option, once revealed.
    Correct,
    /// The selected option when it was wrong.
    Incorrect,
    /// Any other option after reveal.
    Dimmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAdvance {
    Next(usize),
    Completed,
}

/// Feedback tier for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    KeepStudying,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            _ => ScoreBand::KeepStudying,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent work! You've mastered this topic.",
            ScoreBand::Good => "Good job! Keep practicing to improve.",
            ScoreBand::KeepStudying => "Keep studying! Review the material and try again.",
        }
    }
}

/// User intents accepted by [`QuizSession::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Advance,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    Answered { index: usize, status: AnswerStatus },
    Advanced(QuizAdvance),
    Reset,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Multiple-choice quiz over a fixed, ordered list of questions.
///
/// Each question is answered once: selecting reveals the result, and the caller
/// must confirm with [`advance`](Self::advance) before the next question shows.
/// Rejected operations leave the session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<usize>>,
    revealed: bool,
    completed: bool,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` for an empty list and `QuizError::DuplicateQuestion`
    /// when two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for q in &questions {
            if !seen.insert(q.id()) {
                return Err(QuizError::DuplicateQuestion(q.id()));
            }
        }

        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            current: 0,
            answers,
            revealed: false,
            completed: false,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: construction rejects empty quizzes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.answers[self.current]
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.completed {
            QuizPhase::Completed
        } else if self.revealed {
            QuizPhase::Revealed
        } else {
            QuizPhase::Answering
        }
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.current, self.questions.len())
    }

    /// True when the current question is the last one.
    #[must_use]
    pub fn on_last_question(&self) -> bool {
        self.progress().is_last()
    }

    /// Record an answer for the current question and reveal the result.
    ///
    /// # Errors
    ///
    /// - `QuizError::Completed` once the quiz has finished.
    /// - `QuizError::AlreadyAnswered` while the current result is revealed.
    /// - `QuizError::OptionOutOfRange` for an option the question does not have.
    pub fn select_answer(&mut self, option: usize) -> Result<AnswerStatus, QuizError> {
        if self.completed {
            return Err(QuizError::Completed);
        }
        if self.revealed || self.answers[self.current].is_some() {
            return Err(QuizError::AlreadyAnswered {
                index: self.current,
            });
        }
        let question = &self.questions[self.current];
        let len = question.option_count();
        if option >= len {
            return Err(QuizError::OptionOutOfRange { index: option, len });
        }

        self.answers[self.current] = Some(option);
        self.revealed = true;

        let status = if question.is_correct(option) {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        };
        log::debug!(
            "quiz question {} answered with option {option}: {status:?}",
            question.id()
        );
        Ok(status)
    }

    /// Confirm the revealed result and move on.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` after the last question was confirmed and
    /// `QuizError::NotRevealed` when no answer is showing.
    pub fn advance(&mut self) -> Result<QuizAdvance, QuizError> {
        if self.completed {
            return Err(QuizError::Completed);
        }
        if !self.revealed {
            return Err(QuizError::NotRevealed);
        }

        self.revealed = false;
        if self.on_last_question() {
            self.completed = true;
            log::debug!(
                "quiz completed: {}/{} correct",
                self.correct_count(),
                self.questions.len()
            );
            return Ok(QuizAdvance::Completed);
        }

        self.current += 1;
        Ok(QuizAdvance::Next(self.current))
    }

    /// Back to the first question with every answer cleared.
    pub fn reset(&mut self) {
        self.current = 0;
        self.answers.fill(None);
        self.revealed = false;
        self.completed = false;
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .zip(&self.questions)
            .filter(|(answer, q)| answer.is_some_and(|a| q.is_correct(a)))
            .count()
    }

    /// Share of all questions answered correctly, as a rounded percentage.
    ///
    /// Unanswered questions count as incorrect.
    #[must_use]
    pub fn score(&self) -> u8 {
        percentage(self.correct_count(), self.questions.len())
    }

    #[must_use]
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score())
    }

    /// Status of the recorded answer for question `index`.
    ///
    /// An index past the end has no answer and reports `Unanswered`.
    #[must_use]
    pub fn is_correct(&self, index: usize) -> AnswerStatus {
        match (self.answers.get(index), self.questions.get(index)) {
            (Some(Some(answer)), Some(question)) if question.is_correct(*answer) => {
                AnswerStatus::Correct
            }
            (Some(Some(_)), Some(_)) => AnswerStatus::Incorrect,
            _ => AnswerStatus::Unanswered,
        }
    }

    /// Rendering mark for option `option` of the current question.
    #[must_use]
    pub fn option_mark(&self, option: usize) -> OptionMark {
        if !self.revealed {
            return OptionMark::Idle;
        }
        let question = self.current_question();
        if question.is_correct(option) {
            OptionMark::Correct
        } else if self.selected_answer() == Some(option) {
            OptionMark::Incorrect
        } else {
            OptionMark::Dimmed
        }
    }

    /// Dispatch a user intent.
    ///
    /// # Errors
    ///
    /// Same as the operation the intent maps to.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<QuizEvent, QuizError> {
        match intent {
            QuizIntent::Select(option) => {
                let index = self.current;
                let status = self.select_answer(option)?;
                Ok(QuizEvent::Answered { index, status })
            }
            QuizIntent::Advance => self.advance().map(QuizEvent::Advanced),
            QuizIntent::Reset => {
                self.reset();
                Ok(QuizEvent::Reset)
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
