use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use storage::{SessionHistoryRepository, SessionRecordRow};
use study_core::model::{SessionKind, SessionRecordId};

use crate::Clock;
use crate::error::HistoryError;

/// Sessions per week the dashboard tracks progress against.
pub const WEEKLY_GOAL: u32 = 5;

/// Number of entries in the recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: u32 = 3;

/// One line of the recent-activity feed.
///
/// Presentation-agnostic: the caller formats the timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub id: SessionRecordId,
    pub kind: SessionKind,
    pub score: Option<u8>,
    pub subject: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl ActivityItem {
    #[must_use]
    pub fn from_row(row: &SessionRecordRow) -> Self {
        Self {
            id: row.id,
            kind: row.record.kind(),
            score: row.record.score(),
            subject: row.record.subject().map(str::to_owned),
            completed_at: row.record.completed_at(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementKind {
    Streak,
    Score,
    Milestone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub title: &'static str,
    pub description: &'static str,
    pub earned: bool,
}

/// Read projection of session history for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub total_quizzes: u32,
    pub correct_answers: u32,
    /// Mean quiz score, `None` before the first quiz.
    pub average_score: Option<u8>,
    pub flashcards_reviewed: u32,
    /// Consecutive days with at least one session, ending today or yesterday.
    pub study_streak_days: u32,
    /// Quizzes completed since Monday (UTC). Flashcard reviews do not count.
    pub completed_this_week: u32,
    pub weekly_goal: u32,
    pub recent: Vec<ActivityItem>,
    pub achievements: Vec<Achievement>,
}

impl DashboardSnapshot {
    /// Build the projection from history rows ordered oldest first.
    #[must_use]
    pub fn from_rows(rows: &[SessionRecordRow], today: NaiveDate) -> Self {
        let mut total_quizzes = 0_u32;
        let mut correct_answers = 0_u32;
        let mut score_sum = 0_u32;
        let mut flashcards_reviewed = 0_u32;
        let mut completed_this_week = 0_u32;
        let mut active_days = BTreeSet::new();
        let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));

        for row in rows {
            let record = &row.record;
            let day = record.completed_at().date_naive();
            match record.kind() {
                SessionKind::Quiz { correct, .. } => {
                    total_quizzes = total_quizzes.saturating_add(1);
                    correct_answers = correct_answers.saturating_add(correct);
                    score_sum = score_sum.saturating_add(u32::from(record.score().unwrap_or(0)));
                    if day >= week_start && day <= today {
                        completed_this_week = completed_this_week.saturating_add(1);
                    }
                }
                SessionKind::Flashcards { cards } => {
                    flashcards_reviewed = flashcards_reviewed.saturating_add(cards);
                }
            }
            active_days.insert(day);
        }

        let average_score = (total_quizzes > 0).then(|| {
            let avg = (score_sum + total_quizzes / 2) / total_quizzes;
            u8::try_from(avg).unwrap_or(100)
        });
        let study_streak_days = streak(&active_days, today);

        let recent = rows
            .iter()
            .rev()
            .take(RECENT_ACTIVITY_LIMIT as usize)
            .map(ActivityItem::from_row)
            .collect();

        let achievements = vec![
            Achievement {
                kind: AchievementKind::Streak,
                title: "Week Warrior",
                description: "7 day study streak",
                earned: study_streak_days >= 7,
            },
            Achievement {
                kind: AchievementKind::Score,
                title: "Quiz Master",
                description: "90% average score",
                earned: average_score.is_some_and(|s| s >= 90),
            },
            Achievement {
                kind: AchievementKind::Milestone,
                title: "Century Club",
                description: "Complete 100 quizzes",
                earned: total_quizzes >= 100,
            },
        ];

        Self {
            total_quizzes,
            correct_answers,
            average_score,
            flashcards_reviewed,
            study_streak_days,
            completed_this_week,
            weekly_goal: WEEKLY_GOAL,
            recent,
            achievements,
        }
    }

    #[must_use]
    pub fn weekly_goal_met(&self) -> bool {
        self.completed_this_week >= self.weekly_goal
    }
}

fn streak(active_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut day = if active_days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if active_days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut count = 0_u32;
    while active_days.contains(&day) {
        count += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    count
}

/// Dashboard facade: owns the clock and repository access, not formatting.
#[derive(Clone)]
pub struct DashboardService {
    clock: Clock,
    history: Arc<dyn SessionHistoryRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(clock: Clock, history: Arc<dyn SessionHistoryRepository>) -> Self {
        Self { clock, history }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn snapshot(&self) -> Result<DashboardSnapshot, HistoryError> {
        let rows = self.history.list_records().await?;
        Ok(DashboardSnapshot::from_rows(&rows, self.clock.today()))
    }

    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn recent_activity(&self, limit: u32) -> Result<Vec<ActivityItem>, HistoryError> {
        let rows = self.history.list_recent(limit).await?;
        Ok(rows.iter().map(ActivityItem::from_row).collect())
    }
}
