mod ids;
mod lesson;
mod progress;
mod session;

pub use ids::{LessonId, ParseIdError, UserId};
pub use lesson::{Lesson, LessonDraft, LessonError, LessonLevel, LessonSummary, PhrasePair, Step};
pub use progress::{
    level_for_completed, Achievement, CompletedLesson, ProgressRecord, ADVANCED_AT,
    EXERCISES_PER_LESSON, INTERMEDIATE_AT,
};
pub use session::{
    AnswerResult, LessonFinished, LessonSession, LessonSessionError, SessionState,
};
