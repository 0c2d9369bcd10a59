use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use services::samples::{sample_flashcards, sample_questions};
use services::{Clock, DashboardService, StudyError, StudyLoopService};
use storage::{InMemoryRepository, SessionHistoryRepository};
use study_core::ErrorKind;
use study_core::model::SessionKind;
use study_core::session::{FlashcardIntent, QuizAdvance, QuizEvent, QuizIntent};
use study_core::time::fixed_now;

fn services(repo: &InMemoryRepository) -> (StudyLoopService, DashboardService) {
    let clock = Clock::fixed(fixed_now());
    (
        StudyLoopService::new(clock, Arc::new(repo.clone())),
        DashboardService::new(clock, Arc::new(repo.clone())),
    )
}

#[tokio::test]
async fn completed_quiz_is_recorded_once() {
    let repo = InMemoryRepository::new();
    let (study, dashboard) = services(&repo);
    let mut run = study.start_quiz(sample_questions().unwrap()).unwrap();
    assert_eq!(run.subject(), Some("Biology"));

    for pick in [1, 2, 0] {
        study.apply_quiz(&mut run, QuizIntent::Select(pick)).await.unwrap();
        study.apply_quiz(&mut run, QuizIntent::Advance).await.unwrap();
    }

    assert!(run.session().is_complete());
    assert_eq!(run.session().score(), 67);
    let id = run.record_id().expect("record persisted");

    // Further advances are rejected and do not write again.
    let err = study
        .apply_quiz(&mut run, QuizIntent::Advance)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidState));
    assert_eq!(study.finalize_quiz(&mut run).await.unwrap(), id);

    let rows = repo.list_records().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record.kind(), SessionKind::Quiz { correct: 2, total: 3 });

    let snapshot = dashboard.snapshot().await.unwrap();
    assert_eq!(snapshot.total_quizzes, 1);
    assert_eq!(snapshot.average_score, Some(67));
    assert_eq!(snapshot.study_streak_days, 1);
}

#[tokio::test]
async fn retaking_a_quiz_records_a_second_attempt() {
    let repo = InMemoryRepository::new();
    let (study, dashboard) = services(&repo);
    let mut run = study.start_quiz(sample_questions().unwrap()).unwrap();

    for attempt in [[1, 2, 0], [1, 2, 1]] {
        for pick in attempt {
            study.apply_quiz(&mut run, QuizIntent::Select(pick)).await.unwrap();
            study.apply_quiz(&mut run, QuizIntent::Advance).await.unwrap();
        }
        assert!(run.record_id().is_some());
        let step = study.apply_quiz(&mut run, QuizIntent::Reset).await.unwrap();
        assert_eq!(step.event, QuizEvent::Reset);
        assert_eq!(step.record_id, None);
    }

    let snapshot = dashboard.snapshot().await.unwrap();
    assert_eq!(snapshot.total_quizzes, 2);
    assert_eq!(snapshot.correct_answers, 5);
    assert_eq!(snapshot.average_score, Some(84));
}

#[tokio::test]
async fn last_advance_reports_completion() {
    let repo = InMemoryRepository::new();
    let (study, _) = services(&repo);
    let questions = sample_questions().unwrap().into_iter().take(1).collect();
    let mut run = study.start_quiz(questions).unwrap();

    study.apply_quiz(&mut run, QuizIntent::Select(1)).await.unwrap();
    let step = study.apply_quiz(&mut run, QuizIntent::Advance).await.unwrap();
    assert_eq!(step.event, QuizEvent::Advanced(QuizAdvance::Completed));
    assert!(step.record_id.is_some());
}

#[tokio::test]
async fn rejected_selection_leaves_quiz_untouched() {
    let repo = InMemoryRepository::new();
    let (study, _) = services(&repo);
    let mut run = study.start_quiz(sample_questions().unwrap()).unwrap();

    let err = study
        .apply_quiz(&mut run, QuizIntent::Select(9))
        .await
        .unwrap_err();
    assert!(matches!(err, StudyError::Quiz(_)));
    assert_eq!(err.kind(), Some(ErrorKind::InvalidInput));
    assert!(!run.session().is_revealed());
    assert!(repo.list_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_inputs_are_rejected() {
    let repo = InMemoryRepository::new();
    let (study, _) = services(&repo);
    let quiz = study.start_quiz(Vec::new()).unwrap_err();
    assert_eq!(quiz.kind(), Some(ErrorKind::InvalidInput));
    let cards = study.start_flashcards(Vec::new()).unwrap_err();
    assert_eq!(cards.kind(), Some(ErrorKind::InvalidInput));
}

#[tokio::test]
async fn flashcard_review_counts_distinct_cards_seen() {
    let repo = InMemoryRepository::new();
    let (study, dashboard) = services(&repo);
    let mut run = study.start_flashcards(sample_flashcards().unwrap()).unwrap();
    assert_eq!(run.cards_seen(), 1);

    study.apply_flashcards(&mut run, FlashcardIntent::Flip);
    study.apply_flashcards(&mut run, FlashcardIntent::Next);
    study.apply_flashcards(&mut run, FlashcardIntent::Next);
    study.apply_flashcards(&mut run, FlashcardIntent::Previous);
    assert_eq!(run.cards_seen(), 3);

    let id = study.finish_flashcards(&mut run).await.unwrap();
    assert_eq!(study.finish_flashcards(&mut run).await.unwrap(), id);

    let snapshot = dashboard.snapshot().await.unwrap();
    assert_eq!(snapshot.flashcards_reviewed, 3);
    assert_eq!(snapshot.total_quizzes, 0);
    assert_eq!(snapshot.recent.len(), 1);
}

#[test]
fn five_card_cycle_returns_to_start() {
    let mut session =
        study_core::session::FlashcardSession::new(sample_flashcards().unwrap()).unwrap();
    session.shuffle_with(&mut StdRng::seed_from_u64(3));
    for _ in 0..5 {
        session.next();
    }
    assert_eq!(session.current_index(), 0);
    session.reset();
    let ids: Vec<_> = session.cards().iter().map(|c| c.id().value()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}
