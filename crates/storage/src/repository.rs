use async_trait::async_trait;
use seekho_core::model::{Lesson, LessonId, LessonSummary, ProgressRecord, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read-only contract over the lesson catalog (the Content Store).
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// List all lessons without their step content.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_lessons(&self) -> Result<Vec<LessonSummary>, StorageError>;

    /// Fetch a full lesson by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no lesson matches.
    async fn get_lesson(&self, id: &LessonId) -> Result<Lesson, StorageError>;
}

/// Contract over per-user progress records.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the progress record for a user, `None` if never touched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures; a missing record is not
    /// an error.
    async fn get_progress(&self, user_id: &UserId)
        -> Result<Option<ProgressRecord>, StorageError>;

    /// Persist or replace a user's progress record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn put_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// In-memory repository: the only backend this system ships with, since all
/// state is process-lifetime by design. Also used by tests.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    lessons: Arc<Mutex<Vec<Lesson>>>,
    progress: Arc<Mutex<HashMap<UserId, ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-loaded with the given lessons.
    #[must_use]
    pub fn with_lessons(lessons: Vec<Lesson>) -> Self {
        Self {
            lessons: Arc::new(Mutex::new(lessons)),
            progress: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// A repository pre-loaded with the built-in Hindi catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded catalog fails to parse or
    /// validate, which indicates a build-time defect.
    pub fn with_builtin_catalog() -> Result<Self, crate::catalog::CatalogError> {
        Ok(Self::with_lessons(crate::catalog::builtin_lessons()?))
    }

    /// Add a lesson to the catalog, replacing any lesson with the same id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the catalog lock is poisoned.
    pub fn insert_lesson(&self, lesson: Lesson) -> Result<(), StorageError> {
        let mut guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if let Some(existing) = guard.iter_mut().find(|l| l.id() == lesson.id()) {
            *existing = lesson;
        } else {
            guard.push(lesson);
        }
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for InMemoryRepository {
    async fn list_lessons(&self) -> Result<Vec<LessonSummary>, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().map(Lesson::summary).collect())
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<Lesson, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .iter()
            .find(|l| l.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(user_id).cloned())
    }

    async fn put_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.user_id().clone(), record.clone());
        Ok(())
    }
}
