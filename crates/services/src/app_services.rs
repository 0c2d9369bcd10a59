use std::sync::Arc;

use storage::Storage;

use crate::Clock;
use crate::content_service::{ContentConfig, ContentService};
use crate::sessions::{DashboardService, StudyLoopService};

/// Assembles the app-facing services over one shared history store.
#[derive(Clone)]
pub struct AppServices {
    study_loop: Arc<StudyLoopService>,
    dashboard: Arc<DashboardService>,
    content: Arc<ContentService>,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock, storage: &Storage, content: ContentService) -> Self {
        let study_loop = Arc::new(StudyLoopService::new(clock, Arc::clone(&storage.history)));
        let dashboard = Arc::new(DashboardService::new(clock, Arc::clone(&storage.history)));
        Self {
            study_loop,
            dashboard,
            content: Arc::new(content),
        }
    }

    /// Services over process-local history and the simulated generator.
    #[must_use]
    pub fn in_memory(clock: Clock, config: &ContentConfig) -> Self {
        Self::new(
            clock,
            &Storage::in_memory(),
            ContentService::simulated(clock, config),
        )
    }

    #[must_use]
    pub fn study_loop(&self) -> Arc<StudyLoopService> {
        Arc::clone(&self.study_loop)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn content(&self) -> Arc<ContentService> {
        Arc::clone(&self.content)
    }
}
