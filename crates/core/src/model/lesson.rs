use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::LessonId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson must contain at least one step")]
    NoSteps,

    #[error("exercise {question:?} has no options")]
    EmptyOptions { question: String },

    #[error("exercise {question:?} has a correct answer that is not among its options")]
    AnswerNotInOptions { question: String },
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// Difficulty band of a lesson, also the learner's derived level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for LessonLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LessonLevel::Beginner => "beginner",
            LessonLevel::Intermediate => "intermediate",
            LessonLevel::Advanced => "advanced",
        };
        write!(f, "{name}")
    }
}

//
// ─── STEPS ─────────────────────────────────────────────────────────────────────
//

/// A phrase together with its translation, used for audio prompt examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrasePair {
    pub phrase: String,
    pub translation: String,
}

/// One unit of lesson content, traversed in fixed order.
///
/// The `type` tag matches the catalog's JSON shape
/// (`"text"`, `"audio"`, `"exercise"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Free-form explanatory text.
    Text { body: String },

    /// A phrase the learner should listen to and repeat.
    Audio {
        target_phrase: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        translation: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        examples: Vec<PhrasePair>,
        /// Relative path of a pre-recorded clip, when one exists.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        clip: Option<String>,
    },

    /// A multiple-choice question with exactly one correct option.
    Exercise {
        question: String,
        options: Vec<String>,
        correct_answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        audio_prompt: Option<String>,
    },
}

impl Step {
    /// Returns true for exercise steps.
    #[must_use]
    pub fn is_exercise(&self) -> bool {
        matches!(self, Step::Exercise { .. })
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// Unvalidated lesson data as it comes out of the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonDraft {
    pub id: LessonId,
    pub title: String,
    pub level: LessonLevel,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<Step>,
}

impl LessonDraft {
    /// Validate the draft into an immutable `Lesson`.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` if the title is empty, the lesson has no steps,
    /// or an exercise's correct answer is not one of its options.
    pub fn validate(self) -> Result<Lesson, LessonError> {
        if self.title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if self.steps.is_empty() {
            return Err(LessonError::NoSteps);
        }
        for step in &self.steps {
            if let Step::Exercise {
                question,
                options,
                correct_answer,
                ..
            } = step
            {
                if options.is_empty() {
                    return Err(LessonError::EmptyOptions {
                        question: question.clone(),
                    });
                }
                if !options.iter().any(|o| o == correct_answer) {
                    return Err(LessonError::AnswerNotInOptions {
                        question: question.clone(),
                    });
                }
            }
        }

        Ok(Lesson {
            id: self.id,
            title: self.title,
            level: self.level,
            description: self.description,
            steps: self.steps,
        })
    }
}

/// An ordered sequence of steps with a title and difficulty level.
///
/// Immutable once validated; consumers only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    level: LessonLevel,
    description: String,
    steps: Vec<Step>,
}

impl Lesson {
    /// Build a lesson directly from parts, applying draft validation.
    ///
    /// # Errors
    ///
    /// Same as [`LessonDraft::validate`].
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        level: LessonLevel,
        description: impl Into<String>,
        steps: Vec<Step>,
    ) -> Result<Self, LessonError> {
        LessonDraft {
            id,
            title: title.into(),
            level,
            description: description.into(),
            steps,
        }
        .validate()
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn level(&self) -> LessonLevel {
        self.level
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of exercise steps in this lesson.
    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_exercise()).count()
    }

    /// Listing view of this lesson, without the step content.
    #[must_use]
    pub fn summary(&self) -> LessonSummary {
        LessonSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            level: self.level,
            description: self.description.clone(),
        }
    }
}

/// What the lesson list endpoint returns: everything but the steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    pub id: LessonId,
    pub title: String,
    pub level: LessonLevel,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(correct: &str, options: &[&str]) -> Step {
        Step::Exercise {
            question: "How do you say \"Hello\" in Hindi?".to_owned(),
            options: options.iter().map(|s| (*s).to_owned()).collect(),
            correct_answer: correct.to_owned(),
            audio_prompt: None,
        }
    }

    #[test]
    fn answer_must_be_an_option() {
        let err = Lesson::new(
            LessonId::new("1").unwrap(),
            "Greetings",
            LessonLevel::Beginner,
            "",
            vec![exercise("नमस्ते", &["धन्यवाद", "माफ़ कीजिये"])],
        )
        .unwrap_err();
        assert!(matches!(err, LessonError::AnswerNotInOptions { .. }));
    }

    #[test]
    fn valid_lesson_counts_exercises() {
        let lesson = Lesson::new(
            LessonId::new("1").unwrap(),
            "Greetings",
            LessonLevel::Beginner,
            "Learn common Hindi greetings",
            vec![
                Step::Text {
                    body: "नमस्ते (Namaste) - Hello/Greetings".to_owned(),
                },
                exercise("नमस्ते", &["नमस्ते", "धन्यवाद"]),
            ],
        )
        .unwrap();
        assert_eq!(lesson.exercise_count(), 1);
        assert_eq!(lesson.summary().title, "Greetings");
    }

    #[test]
    fn empty_lesson_rejected() {
        let err = Lesson::new(
            LessonId::new("1").unwrap(),
            "Greetings",
            LessonLevel::Beginner,
            "",
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, LessonError::NoSteps);
    }

    #[test]
    fn step_json_uses_type_tag() {
        let step = Step::Text {
            body: "एक (Ek) - One".to_owned(),
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["body"], "एक (Ek) - One");
    }
}
