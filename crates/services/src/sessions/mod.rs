mod view;
mod workflow;

// Public API of the session subsystem.
pub use view::{
    Achievement, AchievementKind, ActivityItem, DashboardService, DashboardSnapshot,
    RECENT_ACTIVITY_LIMIT, WEEKLY_GOAL,
};
pub use workflow::{FlashcardRun, QuizRun, QuizStep, StudyLoopService};
