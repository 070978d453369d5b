use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::ids::LessonId;
use crate::model::lesson::{Lesson, Step};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonSessionError {
    #[error("lesson is already completed")]
    Completed,

    #[error("current step is not an exercise")]
    NotAnExercise,

    #[error("current exercise must be answered before advancing")]
    ExerciseUnanswered,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where the learner currently is within a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Viewing step `i`, `0 <= i < steps.len()`.
    AtStep(usize),
    /// Past the last step; the finish event has been emitted.
    Completed,
}

/// Recorded outcome of answering one exercise step. Immutable once set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub message: String,
}

/// Emitted exactly once when a session walks past its last step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonFinished {
    pub lesson_id: LessonId,
    pub score: u32,
    pub time_spent_seconds: i64,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a lesson: steps through the lesson's content in order,
/// gating advancement on answered exercises and accumulating a score.
///
/// Purely in-memory; dropped or restarted when the learner leaves.
#[derive(Debug)]
pub struct LessonSession {
    lesson: Lesson,
    state: SessionState,
    results: Vec<Option<AnswerResult>>,
    score: u32,
    started_at: DateTime<Utc>,
}

impl LessonSession {
    /// Open a lesson at its first step with a zero score.
    ///
    /// `started_at` should come from the services layer clock.
    #[must_use]
    pub fn new(lesson: Lesson, started_at: DateTime<Utc>) -> Self {
        let results = vec![None; lesson.steps().len()];
        Self {
            lesson,
            state: SessionState::AtStep(0),
            results,
            score: 0,
            started_at,
        }
    }

    #[must_use]
    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::Completed)
    }

    /// Index of the current step, or `None` once completed.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::AtStep(i) => Some(i),
            SessionState::Completed => None,
        }
    }

    /// The step the learner is currently viewing.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.current_index().map(|i| &self.lesson.steps()[i])
    }

    /// Recorded answer for the current step, if any.
    #[must_use]
    pub fn current_result(&self) -> Option<&AnswerResult> {
        self.current_index()
            .and_then(|i| self.results[i].as_ref())
    }

    /// Whether `next` would currently be allowed.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.state {
            SessionState::Completed => false,
            SessionState::AtStep(i) => {
                !self.lesson.steps()[i].is_exercise() || self.results[i].is_some()
            }
        }
    }

    /// Record an answer for the current exercise step.
    ///
    /// Correctness is exact string equality with the exercise's correct
    /// answer; a correct answer increments the score. Submitting again for a
    /// step that already has a result is a no-op that returns the recorded
    /// result unchanged. The step index never moves.
    ///
    /// # Errors
    ///
    /// Returns `Completed` after the last step, or `NotAnExercise` when the
    /// current step has no question to answer.
    pub fn submit_answer(&mut self, option: &str) -> Result<&AnswerResult, LessonSessionError> {
        let i = self.current_index().ok_or(LessonSessionError::Completed)?;
        let Step::Exercise { correct_answer, .. } = &self.lesson.steps()[i] else {
            return Err(LessonSessionError::NotAnExercise);
        };

        let is_correct = option == correct_answer;
        let message = if is_correct {
            "Correct! Great job!".to_owned()
        } else {
            format!("Incorrect. The correct answer is: {correct_answer}")
        };

        let slot = &mut self.results[i];
        let first_submission = slot.is_none();
        let result = slot.get_or_insert_with(|| AnswerResult {
            is_correct,
            message,
        });
        if first_submission && is_correct {
            self.score += 1;
        }
        Ok(result)
    }

    /// Advance to the next step, or complete the lesson from the last one.
    ///
    /// Returns `Some(LessonFinished)` exactly once, when the session enters
    /// `Completed`; `None` for an ordinary advance.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseUnanswered` while the current step is an exercise
    /// without a recorded result, and `Completed` once the session is over.
    pub fn next(&mut self, now: DateTime<Utc>) -> Result<Option<LessonFinished>, LessonSessionError> {
        let i = self.current_index().ok_or(LessonSessionError::Completed)?;
        if !self.can_advance() {
            return Err(LessonSessionError::ExerciseUnanswered);
        }

        if i + 1 < self.lesson.steps().len() {
            self.state = SessionState::AtStep(i + 1);
            return Ok(None);
        }

        self.state = SessionState::Completed;
        Ok(Some(LessonFinished {
            lesson_id: self.lesson.id().clone(),
            score: self.score,
            time_spent_seconds: (now - self.started_at).num_seconds(),
        }))
    }

    /// Step back to the previous step, clearing the transient answer of the
    /// step being left so it must be answered again. No-op at step 0.
    ///
    /// # Errors
    ///
    /// Returns `Completed` once the session is over; use [`Self::restart`].
    pub fn back(&mut self) -> Result<(), LessonSessionError> {
        let i = self.current_index().ok_or(LessonSessionError::Completed)?;
        if i == 0 {
            return Ok(());
        }

        // The score tracks recorded results, so clearing a correct answer
        // also takes its point back.
        if let Some(result) = self.results[i].take() {
            if result.is_correct {
                self.score -= 1;
            }
        }
        self.state = SessionState::AtStep(i - 1);
        Ok(())
    }

    /// Reset to the first step with a zero score, from any state.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.state = SessionState::AtStep(0);
        self.results = vec![None; self.lesson.steps().len()];
        self.score = 0;
        self.started_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lesson::LessonLevel;
    use crate::model::LessonId;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn exercise(n: u32) -> Step {
        Step::Exercise {
            question: format!("Q{n}"),
            options: vec!["right".to_owned(), "wrong".to_owned()],
            correct_answer: "right".to_owned(),
            audio_prompt: None,
        }
    }

    fn lesson(steps: Vec<Step>) -> Lesson {
        Lesson::new(
            LessonId::new("1").unwrap(),
            "Test",
            LessonLevel::Beginner,
            "",
            steps,
        )
        .unwrap()
    }

    #[test]
    fn opens_at_step_zero_with_zero_score() {
        let session = LessonSession::new(lesson(vec![exercise(1)]), fixed_now());
        assert_eq!(session.state(), SessionState::AtStep(0));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn next_is_blocked_on_unanswered_exercise() {
        let mut session = LessonSession::new(lesson(vec![exercise(1)]), fixed_now());
        assert!(!session.can_advance());
        assert_eq!(
            session.next(fixed_now()),
            Err(LessonSessionError::ExerciseUnanswered)
        );
    }

    #[test]
    fn submit_answer_is_idempotent_per_step() {
        let mut session = LessonSession::new(lesson(vec![exercise(1)]), fixed_now());
        let first = session.submit_answer("right").unwrap().clone();
        assert!(first.is_correct);
        // A second submission with a different option leaves the first intact.
        let second = session.submit_answer("wrong").unwrap().clone();
        assert_eq!(second, first);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn completing_emits_finished_exactly_once() {
        let mut session = LessonSession::new(
            lesson(vec![
                Step::Text {
                    body: "intro".to_owned(),
                },
                exercise(1),
            ]),
            fixed_now(),
        );
        assert!(session.next(fixed_now()).unwrap().is_none());
        session.submit_answer("right").unwrap();

        let done_at = fixed_now() + Duration::seconds(42);
        let event = session.next(done_at).unwrap().expect("finish event");
        assert_eq!(event.score, 1);
        assert_eq!(event.time_spent_seconds, 42);
        assert!(session.is_complete());
        assert_eq!(session.next(done_at), Err(LessonSessionError::Completed));
    }

    #[test]
    fn three_correct_exercises_score_three() {
        let mut session = LessonSession::new(
            lesson(vec![exercise(1), exercise(2), exercise(3)]),
            fixed_now(),
        );
        let mut finished = None;
        for _ in 0..3 {
            session.submit_answer("right").unwrap();
            finished = session.next(fixed_now()).unwrap();
        }
        assert_eq!(finished.expect("finish event").score, 3);
    }

    #[test]
    fn back_clears_the_left_step_and_its_point() {
        let mut session = LessonSession::new(
            lesson(vec![
                Step::Text {
                    body: "intro".to_owned(),
                },
                exercise(1),
            ]),
            fixed_now(),
        );
        session.next(fixed_now()).unwrap();
        session.submit_answer("right").unwrap();
        assert_eq!(session.score(), 1);

        session.back().unwrap();
        assert_eq!(session.state(), SessionState::AtStep(0));
        assert_eq!(session.score(), 0);

        // Coming forward again, the exercise is unanswered.
        session.next(fixed_now()).unwrap();
        assert!(session.current_result().is_none());
        assert!(!session.can_advance());
    }

    #[test]
    fn back_is_a_noop_at_the_first_step() {
        let mut session = LessonSession::new(lesson(vec![exercise(1)]), fixed_now());
        session.back().unwrap();
        assert_eq!(session.state(), SessionState::AtStep(0));
    }

    #[test]
    fn restart_leaves_completed() {
        let mut session = LessonSession::new(lesson(vec![exercise(1)]), fixed_now());
        session.submit_answer("right").unwrap();
        session.next(fixed_now()).unwrap();
        assert!(session.is_complete());

        let later = fixed_now() + Duration::seconds(5);
        session.restart(later);
        assert_eq!(session.state(), SessionState::AtStep(0));
        assert_eq!(session.score(), 0);
        assert_eq!(session.started_at(), later);
    }

    #[test]
    fn submit_on_text_step_is_rejected() {
        let mut session = LessonSession::new(
            lesson(vec![Step::Text {
                body: "intro".to_owned(),
            }]),
            fixed_now(),
        );
        assert_eq!(
            session.submit_answer("anything").unwrap_err(),
            LessonSessionError::NotAnExercise
        );
    }
}
