//! Shared error types for the services crate.

use thiserror::Error;

use seekho_core::model::LessonSessionError;
use storage::repository::StorageError;

use crate::practice::speech::{RecognizerError, SynthesizerError};

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the lesson workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonFlowError {
    #[error("lesson not found")]
    NotFound,
    #[error(transparent)]
    Session(#[from] LessonSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

/// Errors emitted by `PracticeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    /// The recognition capability failed. `suggest_demo` is set once the
    /// failure kind (or a streak of failures) warrants offering the demo
    /// backend instead.
    #[error("recognition failed: {source}")]
    Recognition {
        source: RecognizerError,
        suggest_demo: bool,
    },
    #[error(transparent)]
    Synthesizer(#[from] SynthesizerError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

/// Errors emitted by the session gate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GateError {
    #[error("name and email are required")]
    MissingFields,
    #[error("invalid or expired session token")]
    Unauthorized,
    #[error("session store unavailable: {0}")]
    Internal(String),
}
