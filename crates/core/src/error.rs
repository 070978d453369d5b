use thiserror::Error;

use crate::model::{LessonError, LessonSessionError, ParseIdError};

/// Umbrella error for the domain crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Session(#[from] LessonSessionError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}
