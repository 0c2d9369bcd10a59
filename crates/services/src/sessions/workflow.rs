use std::collections::HashSet;
use std::sync::Arc;

use storage::SessionHistoryRepository;
use study_core::model::{Flashcard, FlashcardId, Question, SessionRecord, SessionRecordId};
use study_core::session::{
    FlashcardIntent, FlashcardSession, QuizAdvance, QuizEvent, QuizIntent, QuizSession,
};

use crate::Clock;
use crate::error::{HistoryError, StudyError};

/// A quiz in progress, plus the history record it produced once completed.
#[derive(Debug, Clone)]
pub struct QuizRun {
    session: QuizSession,
    subject: Option<String>,
    record_id: Option<SessionRecordId>,
}

impl QuizRun {
    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Set once the completed attempt has been written to history.
    #[must_use]
    pub fn record_id(&self) -> Option<SessionRecordId> {
        self.record_id
    }
}

/// Result of forwarding one quiz intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizStep {
    pub event: QuizEvent,
    pub record_id: Option<SessionRecordId>,
}

/// A flashcard review in progress.
#[derive(Debug, Clone)]
pub struct FlashcardRun {
    session: FlashcardSession,
    subject: Option<String>,
    seen: HashSet<FlashcardId>,
    record_id: Option<SessionRecordId>,
}

impl FlashcardRun {
    #[must_use]
    pub fn session(&self) -> &FlashcardSession {
        &self.session
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Distinct cards shown so far.
    #[must_use]
    pub fn cards_seen(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn record_id(&self) -> Option<SessionRecordId> {
        self.record_id
    }
}

/// Drives the session engines and writes finished sessions to history.
#[derive(Clone)]
pub struct StudyLoopService {
    clock: Clock,
    history: Arc<dyn SessionHistoryRepository>,
}

impl StudyLoopService {
    #[must_use]
    pub fn new(clock: Clock, history: Arc<dyn SessionHistoryRepository>) -> Self {
        Self { clock, history }
    }

    /// # Errors
    ///
    /// Returns `StudyError::Quiz` when the question list is rejected.
    pub fn start_quiz(&self, questions: Vec<Question>) -> Result<QuizRun, StudyError> {
        let subject = shared_subject(questions.iter().map(Question::subject));
        let session = QuizSession::new(questions)?;
        log::debug!("quiz started with {} questions", session.len());
        Ok(QuizRun {
            session,
            subject,
            record_id: None,
        })
    }

    /// Forward an intent to the quiz; a completing advance is written to history.
    ///
    /// Resetting starts a new attempt, which is recorded separately when it completes.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Quiz` for rejected intents (the session is unchanged)
    /// and `StudyError::History` if the completed attempt cannot be stored. In the
    /// latter case the quiz stays completed and `finalize_quiz` can retry.
    pub async fn apply_quiz(
        &self,
        run: &mut QuizRun,
        intent: QuizIntent,
    ) -> Result<QuizStep, StudyError> {
        let event = match run.session.apply(intent) {
            Ok(event) => event,
            Err(err) => {
                log::warn!("quiz intent {intent:?} rejected: {err}");
                return Err(err.into());
            }
        };

        match event {
            QuizEvent::Advanced(QuizAdvance::Completed) => {
                self.finalize_quiz(run).await?;
            }
            QuizEvent::Reset => run.record_id = None,
            QuizEvent::Answered { .. } | QuizEvent::Advanced(QuizAdvance::Next(_)) => {}
        }

        Ok(QuizStep {
            event,
            record_id: run.record_id,
        })
    }

    /// Store the completed attempt if it has not been stored yet.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NotCompleted` before the last question is confirmed and
    /// `StudyError::History` when persistence fails.
    pub async fn finalize_quiz(&self, run: &mut QuizRun) -> Result<SessionRecordId, StudyError> {
        if let Some(id) = run.record_id {
            return Ok(id);
        }
        if !run.session.is_complete() {
            return Err(StudyError::NotCompleted);
        }

        let record = SessionRecord::quiz(
            run.subject.clone(),
            count_u32(run.session.correct_count()),
            count_u32(run.session.len()),
            self.clock.now(),
        )
        .map_err(HistoryError::from)?;
        let id = self.history.append_record(&record).await?;
        log::info!("quiz recorded as {id} with score {}", run.session.score());
        run.record_id = Some(id);
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `StudyError::Deck` when the card list is rejected.
    pub fn start_flashcards(&self, cards: Vec<Flashcard>) -> Result<FlashcardRun, StudyError> {
        let subject = shared_subject(cards.iter().map(Flashcard::subject));
        let session = FlashcardSession::new(cards)?;
        let mut seen = HashSet::new();
        seen.insert(session.current_card().id());
        log::debug!("flashcard review started with {} cards", session.len());
        Ok(FlashcardRun {
            session,
            subject,
            seen,
            record_id: None,
        })
    }

    /// Forward an intent to the flashcard session. Never fails.
    pub fn apply_flashcards(&self, run: &mut FlashcardRun, intent: FlashcardIntent) {
        run.session.apply(intent);
        run.seen.insert(run.session.current_card().id());
    }

    /// Record the review in history. Repeated calls return the first record id.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::History` when persistence fails.
    pub async fn finish_flashcards(
        &self,
        run: &mut FlashcardRun,
    ) -> Result<SessionRecordId, StudyError> {
        if let Some(id) = run.record_id {
            return Ok(id);
        }

        let record = SessionRecord::flashcards(
            run.subject.clone(),
            count_u32(run.cards_seen()),
            self.clock.now(),
        )
        .map_err(HistoryError::from)?;
        let id = self.history.append_record(&record).await?;
        log::info!("flashcard review recorded as {id} ({} cards)", run.cards_seen());
        run.record_id = Some(id);
        Ok(id)
    }
}

/// The common subject of all items, if they agree on a non-empty one.
fn shared_subject<'a>(mut subjects: impl Iterator<Item = &'a str>) -> Option<String> {
    let first = subjects.next()?.trim();
    if first.is_empty() {
        return None;
    }
    subjects
        .all(|s| s.trim() == first)
        .then(|| first.to_owned())
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;
    use study_core::time::fixed_clock;

    #[test]
    fn shared_subject_requires_agreement() {
        assert_eq!(
            shared_subject(["Biology", " Biology"].into_iter()),
            Some("Biology".into())
        );
        assert_eq!(shared_subject(["Biology", "History"].into_iter()), None);
        assert_eq!(shared_subject(["", ""].into_iter()), None);
        assert_eq!(shared_subject(std::iter::empty()), None);
    }

    #[tokio::test]
    async fn finalize_before_completion_is_rejected() {
        let service = StudyLoopService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        let mut run = service
            .start_quiz(crate::samples::sample_questions().unwrap())
            .unwrap();
        let err = service.finalize_quiz(&mut run).await.unwrap_err();
        assert!(matches!(err, StudyError::NotCompleted));
    }
}
