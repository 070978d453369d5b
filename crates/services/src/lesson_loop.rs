use std::sync::Arc;

use seekho_core::model::{
    AnswerResult, LessonFinished, LessonId, LessonSession, LessonSummary, ProgressRecord, UserId,
};
use seekho_core::Clock;
use storage::repository::{LessonRepository, StorageError};

use crate::error::LessonFlowError;
use crate::progress_service::ProgressService;

/// What happened when the learner pressed "next".
#[derive(Debug)]
pub enum LessonAdvance {
    /// Moved to the step at this index.
    Moved { step: usize },
    /// The session completed; the finish event has been folded into the
    /// user's progress record.
    Finished {
        event: LessonFinished,
        progress: ProgressRecord,
    },
}

/// Orchestrates lesson sessions: opens lessons from the catalog, applies
/// answers, and reports completions to the progress aggregate.
#[derive(Clone)]
pub struct LessonLoopService {
    clock: Clock,
    lessons: Arc<dyn LessonRepository>,
    progress: ProgressService,
}

impl LessonLoopService {
    #[must_use]
    pub fn new(clock: Clock, lessons: Arc<dyn LessonRepository>, progress: ProgressService) -> Self {
        Self {
            clock,
            lessons,
            progress,
        }
    }

    /// Lesson summaries for the catalog listing.
    ///
    /// # Errors
    ///
    /// Returns `LessonFlowError` for storage failures.
    pub async fn list_lessons(&self) -> Result<Vec<LessonSummary>, LessonFlowError> {
        Ok(self.lessons.list_lessons().await?)
    }

    /// Open a lesson at its first step.
    ///
    /// # Errors
    ///
    /// Returns `LessonFlowError::NotFound` if the id is not in the catalog.
    pub async fn open_lesson(&self, id: &LessonId) -> Result<LessonSession, LessonFlowError> {
        let lesson = self.lessons.get_lesson(id).await.map_err(|e| match e {
            StorageError::NotFound => LessonFlowError::NotFound,
            other => LessonFlowError::Storage(other),
        })?;
        Ok(LessonSession::new(lesson, self.clock.now()))
    }

    /// Record an answer for the session's current exercise step.
    ///
    /// # Errors
    ///
    /// Returns `LessonFlowError::Session` when the current step cannot take
    /// an answer.
    pub fn answer_current(
        &self,
        session: &mut LessonSession,
        option: &str,
    ) -> Result<AnswerResult, LessonFlowError> {
        Ok(session.submit_answer(option)?.clone())
    }

    /// Advance the session; on completion, fold the finish event into the
    /// user's progress record.
    ///
    /// # Errors
    ///
    /// Returns `LessonFlowError::Session` when advancing is blocked, or
    /// `LessonFlowError::Progress` if the completion cannot be recorded.
    pub async fn advance(
        &self,
        user_id: &UserId,
        session: &mut LessonSession,
    ) -> Result<LessonAdvance, LessonFlowError> {
        match session.next(self.clock.now())? {
            None => {
                let step = session
                    .current_index()
                    .ok_or(LessonFlowError::Session(
                        seekho_core::model::LessonSessionError::Completed,
                    ))?;
                Ok(LessonAdvance::Moved { step })
            }
            Some(event) => {
                let progress = self
                    .progress
                    .record_lesson_completion(user_id, &event)
                    .await?;
                Ok(LessonAdvance::Finished { event, progress })
            }
        }
    }

    /// Reset the session to its first step.
    pub fn restart(&self, session: &mut LessonSession) {
        session.restart(self.clock.now());
    }
}
