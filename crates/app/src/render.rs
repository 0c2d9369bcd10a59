//! Plain-text rendering of engine state. Pure functions so they can be tested directly.

use chrono::{DateTime, Utc};
use services::{ActivityItem, DashboardSnapshot, SubmissionReceipt};
use study_core::Progress;
use study_core::model::{Question, SessionKind};
use study_core::session::{AnswerStatus, CardFace, FlashcardSession, OptionMark, QuizSession};

fn progress_line(label: &str, progress: Progress) -> String {
    format!(
        "{label} {} of {} ({}%)",
        progress.position,
        progress.total,
        progress.percent()
    )
}

#[must_use]
pub fn question(session: &QuizSession) -> String {
    let q = session.current_question();
    let mut lines = vec![
        progress_line("Question", session.progress()),
        String::new(),
        q.prompt().to_owned(),
    ];

    for (index, option) in q.options().iter().enumerate() {
        let marker = match session.option_mark(index) {
            OptionMark::Idle => "   ",
            OptionMark::Correct => "[+]",
            OptionMark::Incorrect => "[x]",
            OptionMark::Dimmed => " · ",
        };
        lines.push(format!(
            "{marker} {}. {option}",
            Question::option_label(index)
        ));
    }

    if session.is_revealed() {
        let verdict = match session.is_correct(session.current_index()) {
            AnswerStatus::Correct => "Correct!",
            AnswerStatus::Incorrect | AnswerStatus::Unanswered => "Incorrect",
        };
        let next = if session.on_last_question() {
            "Complete Quiz"
        } else {
            "Next Question"
        };
        lines.push(String::new());
        lines.push(format!("{verdict} {}", q.explanation()));
        lines.push(format!("Press enter for: {next}"));
    }
    lines.join("\n")
}

#[must_use]
pub fn quiz_result(session: &QuizSession) -> String {
    [
        "Quiz Completed!".to_owned(),
        format!("{}%", session.score()),
        format!(
            "You got {} out of {} questions correct",
            session.correct_count(),
            session.len()
        ),
        session.score_band().message().to_owned(),
        "Type `retry` to try again or `leave` to return.".to_owned(),
    ]
    .join("\n")
}

#[must_use]
pub fn flashcard(session: &FlashcardSession) -> String {
    let card = session.current_card();
    let mut lines = vec![progress_line("Card", session.progress())];
    if session.is_shuffled() {
        lines.push("(cards have been shuffled)".to_owned());
    }
    let subject = if card.subject().is_empty() {
        String::new()
    } else {
        format!(" · {}", card.subject())
    };
    lines.push(format!("[{}]{subject}", card.difficulty()));
    let (title, hint) = match session.visible_face() {
        CardFace::Front => ("Question", "flip to reveal answer"),
        CardFace::Back => ("Answer", "flip to see question"),
    };
    lines.push(format!("{title}: {}", session.visible_text()));
    lines.push(format!("({hint})"));
    lines.join("\n")
}

/// Coarse "2 hours ago" style age of `then` relative to `now`.
#[must_use]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let (n, unit) = if elapsed.num_days() > 0 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "just now".to_owned();
    };
    let plural = if n == 1 { "" } else { "s" };
    format!("{n} {unit}{plural} ago")
}

fn activity(item: &ActivityItem, now: DateTime<Utc>) -> String {
    let subject = item.subject.as_deref().unwrap_or("General");
    let detail = match item.kind {
        SessionKind::Quiz { .. } => format!("quiz, {}%", item.score.unwrap_or(0)),
        SessionKind::Flashcards { cards } => format!("flashcards, {cards} cards"),
    };
    format!("{subject} ({detail}) {}", time_ago(item.completed_at, now))
}

fn activity_lines(items: &[ActivityItem], now: DateTime<Utc>) -> Vec<String> {
    if items.is_empty() {
        return vec!["  nothing yet".to_owned()];
    }
    items
        .iter()
        .map(|item| format!("  {}", activity(item, now)))
        .collect()
}

#[must_use]
pub fn dashboard(snapshot: &DashboardSnapshot, now: DateTime<Utc>) -> String {
    let average = snapshot
        .average_score
        .map_or_else(|| "-".to_owned(), |s| format!("{s}%"));
    let mut lines = vec![
        "Welcome back!".to_owned(),
        format!("Study streak: {} days", snapshot.study_streak_days),
        format!(
            "Quizzes: {}  Average score: {average}  Correct answers: {}",
            snapshot.total_quizzes, snapshot.correct_answers
        ),
        format!("Flashcards reviewed: {}", snapshot.flashcards_reviewed),
        format!(
            "Weekly goal: {} / {} quizzes completed",
            snapshot.completed_this_week, snapshot.weekly_goal
        ),
        "Recent activity:".to_owned(),
    ];
    lines.extend(activity_lines(&snapshot.recent, now));

    lines.push("Achievements:".to_owned());
    lines.extend(snapshot.achievements.iter().map(|a| {
        let mark = if a.earned { "*" } else { " " };
        format!("  [{mark}] {}: {}", a.title, a.description)
    }));
    lines.join("\n")
}

/// Full activity feed, newest first.
#[must_use]
pub fn history(items: &[ActivityItem], now: DateTime<Utc>) -> String {
    let mut lines = vec![format!("History ({} sessions):", items.len())];
    lines.extend(activity_lines(items, now));
    lines.join("\n")
}

#[must_use]
pub fn receipt(receipt: &SubmissionReceipt) -> String {
    let subject = receipt.subject.as_deref().unwrap_or("untitled");
    format!(
        "Content processed! {} characters of {subject} material accepted.",
        receipt.characters
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use services::samples::{sample_flashcards, sample_questions};
    use study_core::time::fixed_now;

    #[test]
    fn question_shows_progress_and_labels() {
        let session = QuizSession::new(sample_questions().unwrap()).unwrap();
        let text = question(&session);
        assert!(text.starts_with("Question 1 of 3 (33%)"));
        assert!(text.contains("B. To convert light energy into chemical energy"));
        assert!(!text.contains("Press enter"));
    }

    #[test]
    fn revealed_question_marks_options() {
        let mut session = QuizSession::new(sample_questions().unwrap()).unwrap();
        session.select_answer(0).unwrap();
        let text = question(&session);
        assert!(text.contains("[x] A."));
        assert!(text.contains("[+] B."));
        assert!(text.contains("Incorrect"));
        assert!(text.contains("Next Question"));
    }

    #[test]
    fn result_reports_score_and_band() {
        let mut session = QuizSession::new(sample_questions().unwrap()).unwrap();
        for pick in [1, 2, 0] {
            session.select_answer(pick).unwrap();
            session.advance().unwrap();
        }
        let text = quiz_result(&session);
        assert!(text.contains("67%"));
        assert!(text.contains("You got 2 out of 3 questions correct"));
        assert!(text.contains("Good job!"));
    }

    #[test]
    fn flashcard_shows_face() {
        let mut session = FlashcardSession::new(sample_flashcards().unwrap()).unwrap();
        assert!(flashcard(&session).contains("Question: What is photosynthesis?"));
        session.flip();
        assert!(flashcard(&session).contains("Answer: Photosynthesis is the process"));
    }

    #[test]
    fn time_ago_units() {
        let now = fixed_now();
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(time_ago(now - Duration::days(1), now), "1 day ago");
    }

    #[test]
    fn history_lists_items_or_placeholder() {
        let now = fixed_now();
        assert!(history(&[], now).contains("nothing yet"));

        let item = ActivityItem {
            id: study_core::model::SessionRecordId::new(7),
            kind: SessionKind::Flashcards { cards: 4 },
            score: None,
            subject: None,
            completed_at: now - Duration::minutes(3),
        };
        let text = history(&[item], now);
        assert!(text.starts_with("History (1 sessions):"));
        assert!(text.contains("General (flashcards, 4 cards) 3 minutes ago"));
    }
}
