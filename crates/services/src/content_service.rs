use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Clock;
use crate::error::ContentError;

/// Submissions shorter than this many characters are rejected up front.
pub const MIN_CONTENT_CHARS: usize = 50;

/// Delay used by `SimulatedGenerator` when nothing else is configured.
pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_secs(2);

/// Study text offered by the "try sample content" action.
pub const SAMPLE_CONTENT: &str = "Photosynthesis is the process by which plants convert light \
energy into chemical energy. This process occurs in the chloroplasts of plant cells and involves \
two main stages: the light-dependent reactions and the Calvin cycle. During photosynthesis, \
plants absorb carbon dioxide from the atmosphere and water from the soil, using sunlight to \
produce glucose and oxygen.";

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

/// Study material submitted for question and flashcard generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSubmission {
    pub content: String,
    pub subject: Option<String>,
}

impl ContentSubmission {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            subject: None,
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        let trimmed = subject.trim();
        self.subject = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Length in characters (Unicode scalar values), not bytes.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// # Errors
    ///
    /// Returns `ContentError::Empty` for blank content and `ContentError::TooShort`
    /// below `MIN_CONTENT_CHARS`.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.content.trim().is_empty() {
            return Err(ContentError::Empty);
        }
        let len = self.char_count();
        if len < MIN_CONTENT_CHARS {
            return Err(ContentError::TooShort {
                len,
                min: MIN_CONTENT_CHARS,
            });
        }
        Ok(())
    }
}

/// Acknowledgement for an accepted submission.
///
/// Generated questions and cards are not returned; callers feed the engines
/// from whatever content source they choose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub subject: Option<String>,
    pub characters: usize,
    pub accepted_at: DateTime<Utc>,
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Backend that turns accepted study material into quiz content.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns `ContentError::Generation` when the backend fails.
    async fn generate(&self, submission: &ContentSubmission) -> Result<(), ContentError>;
}

/// Stand-in backend: waits for a fixed delay and produces nothing.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGenerator {
    delay: Duration,
}

impl SimulatedGenerator {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATION_DELAY)
    }
}

#[async_trait]
impl ContentGenerator for SimulatedGenerator {
    async fn generate(&self, submission: &ContentSubmission) -> Result<(), ContentError> {
        log::debug!(
            "simulating generation for {} characters over {:?}",
            submission.char_count(),
            self.delay
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    pub generation_delay: Duration,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            generation_delay: DEFAULT_GENERATION_DELAY,
        }
    }
}

impl ContentConfig {
    /// Reads `STUDY_GENERATION_DELAY_MS`; unset or unparsable values keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        let generation_delay = env::var("STUDY_GENERATION_DELAY_MS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map_or(DEFAULT_GENERATION_DELAY, Duration::from_millis);
        Self { generation_delay }
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Validates submissions and hands accepted ones to a `ContentGenerator`.
#[derive(Clone)]
pub struct ContentService {
    clock: Clock,
    generator: Arc<dyn ContentGenerator>,
}

impl ContentService {
    #[must_use]
    pub fn new(clock: Clock, generator: Arc<dyn ContentGenerator>) -> Self {
        Self { clock, generator }
    }

    #[must_use]
    pub fn simulated(clock: Clock, config: &ContentConfig) -> Self {
        Self::new(
            clock,
            Arc::new(SimulatedGenerator::new(config.generation_delay)),
        )
    }

    /// Validate, then run generation.
    ///
    /// Validation failures return before anything is awaited.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Empty` / `ContentError::TooShort` for invalid content
    /// and `ContentError::Generation` when the backend fails.
    pub async fn submit(
        &self,
        submission: ContentSubmission,
    ) -> Result<SubmissionReceipt, ContentError> {
        if let Err(err) = submission.validate() {
            log::warn!("rejected content submission: {err}");
            return Err(err);
        }

        self.generator.generate(&submission).await?;

        let receipt = SubmissionReceipt {
            characters: submission.char_count(),
            subject: submission.subject,
            accepted_at: self.clock.now(),
        };
        log::info!(
            "content accepted ({} characters, subject {:?})",
            receipt.characters,
            receipt.subject
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::ErrorKind;
    use study_core::time::{fixed_clock, fixed_now};

    struct FailingGenerator;

    #[async_trait]
    impl ContentGenerator for FailingGenerator {
        async fn generate(&self, _submission: &ContentSubmission) -> Result<(), ContentError> {
            Err(ContentError::Generation("backend offline".into()))
        }
    }

    fn instant_service() -> ContentService {
        ContentService::new(fixed_clock(), Arc::new(SimulatedGenerator::new(Duration::ZERO)))
    }

    #[test]
    fn forty_nine_characters_fail_validation() {
        let err = ContentSubmission::new("x".repeat(49)).validate().unwrap_err();
        assert_eq!(err, ContentError::TooShort { len: 49, min: 50 });
        assert_eq!(err.kind(), Some(ErrorKind::ValidationFailure));
    }

    #[test]
    fn fifty_characters_pass_validation() {
        assert!(ContentSubmission::new("x".repeat(50)).validate().is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let err = ContentSubmission::new("é".repeat(30)).validate().unwrap_err();
        assert_eq!(err, ContentError::TooShort { len: 30, min: 50 });
    }

    #[test]
    fn blank_content_is_empty() {
        let err = ContentSubmission::new(" ".repeat(80)).validate().unwrap_err();
        assert_eq!(err, ContentError::Empty);
    }

    #[test]
    fn blank_subject_is_dropped() {
        let submission = ContentSubmission::new("x").with_subject("  ");
        assert_eq!(submission.subject, None);
        let submission = ContentSubmission::new("x").with_subject(" Biology ");
        assert_eq!(submission.subject.as_deref(), Some("Biology"));
    }

    #[test]
    fn sample_content_is_long_enough() {
        assert!(ContentSubmission::new(SAMPLE_CONTENT).validate().is_ok());
    }

    #[tokio::test]
    async fn accepted_submission_returns_receipt() {
        let receipt = instant_service()
            .submit(ContentSubmission::new(SAMPLE_CONTENT).with_subject("Biology"))
            .await
            .unwrap();
        assert_eq!(receipt.subject.as_deref(), Some("Biology"));
        assert_eq!(receipt.characters, SAMPLE_CONTENT.chars().count());
        assert_eq!(receipt.accepted_at, fixed_now());
    }

    #[tokio::test]
    async fn generator_failure_is_reported() {
        let service = ContentService::new(fixed_clock(), Arc::new(FailingGenerator));
        let err = service
            .submit(ContentSubmission::new(SAMPLE_CONTENT))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Generation(_)));
        assert_eq!(err.kind(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_generator_waits_for_its_delay() {
        let service = ContentService::simulated(fixed_clock(), &ContentConfig::default());
        let start = tokio::time::Instant::now();
        service
            .submit(ContentSubmission::new(SAMPLE_CONTENT))
            .await
            .unwrap();
        assert!(start.elapsed() >= DEFAULT_GENERATION_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn rejection_does_not_wait() {
        let service = ContentService::simulated(fixed_clock(), &ContentConfig::default());
        let start = tokio::time::Instant::now();
        let err = service
            .submit(ContentSubmission::new("too short"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::TooShort { .. }));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
