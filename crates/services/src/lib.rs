#![forbid(unsafe_code)]

pub mod app_services;
pub mod content_service;
pub mod error;
pub mod samples;
pub mod sessions;

pub use study_core::Clock;

pub use app_services::AppServices;
pub use content_service::{
    ContentConfig, ContentGenerator, ContentService, ContentSubmission, MIN_CONTENT_CHARS,
    SAMPLE_CONTENT, SimulatedGenerator, SubmissionReceipt,
};
pub use error::{ContentError, HistoryError, StudyError};
pub use sessions::{
    ActivityItem, DashboardService, DashboardSnapshot, FlashcardRun, QuizRun, QuizStep,
    StudyLoopService,
};
