use std::sync::Arc;

use seekho_core::model::{LessonFinished, ProgressRecord, UserId};
use seekho_core::Clock;
use storage::repository::ProgressRepository;

use crate::error::ProgressServiceError;

/// Owns all writes to per-user progress records.
///
/// Both producers (lesson workflow and speech practice) go through here, so
/// updates apply in the order their triggering events complete.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, repo }
    }

    /// Current snapshot for a user; a zero-value record if never touched.
    ///
    /// First touch does not persist anything. A record only exists in
    /// storage once something has been recorded against it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` for storage failures.
    pub async fn get(&self, user_id: &UserId) -> Result<ProgressRecord, ProgressServiceError> {
        Ok(self
            .repo
            .get_progress(user_id)
            .await?
            .unwrap_or_else(|| ProgressRecord::new(user_id.clone(), self.clock.now())))
    }

    /// Apply a lesson finish event to the user's record and persist it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` for storage failures.
    pub async fn record_lesson_completion(
        &self,
        user_id: &UserId,
        event: &LessonFinished,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let mut record = self.get(user_id).await?;
        record.record_lesson_completion(
            event.lesson_id.clone(),
            event.score,
            event.time_spent_seconds,
            self.clock.now(),
        );
        self.repo.put_progress(&record).await?;
        Ok(record)
    }

    /// Fold a practice attempt summary into the user's record.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` for storage failures.
    pub async fn record_practice_attempt(
        &self,
        user_id: &UserId,
        time_spent_seconds: i64,
    ) -> Result<ProgressRecord, ProgressServiceError> {
        let mut record = self.get(user_id).await?;
        record.record_practice_attempt(time_spent_seconds, self.clock.now());
        self.repo.put_progress(&record).await?;
        Ok(record)
    }
}
