use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::{LessonId, UserId};
use crate::model::lesson::LessonLevel;

/// Exercises credited for each completed lesson, matching the flat
/// per-lesson estimate the progress endpoint applies.
pub const EXERCISES_PER_LESSON: u32 = 5;

/// Completed-lesson counts at which the derived level changes.
pub const INTERMEDIATE_AT: usize = 10;
pub const ADVANCED_AT: usize = 20;

//
// ─── ACHIEVEMENTS ──────────────────────────────────────────────────────────────
//

/// One-time unlockable milestone tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Achievement {
    #[serde(rename = "5_lessons")]
    FiveLessons,
    #[serde(rename = "10_lessons")]
    TenLessons,
}

impl Achievement {
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Achievement::FiveLessons => "5_lessons",
            Achievement::TenLessons => "10_lessons",
        }
    }

    /// The achievement unlocked when the completed-lesson count lands on
    /// exactly this value, if any.
    #[must_use]
    pub fn for_exact_count(count: usize) -> Option<Self> {
        match count {
            5 => Some(Achievement::FiveLessons),
            10 => Some(Achievement::TenLessons),
            _ => None,
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// One completed lesson inside a progress record. Re-completing the same
/// lesson updates this entry instead of adding a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedLesson {
    pub lesson_id: LessonId,
    pub completed_at: DateTime<Utc>,
    pub score: u32,
    pub time_spent_seconds: i64,
}

/// Per-user learning progress, alive for the process lifetime.
///
/// Written by the lesson workflow (on completion) and the speech practice
/// service (per attempt); both only append or increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    user_id: UserId,
    completed_lessons: Vec<CompletedLesson>,
    exercises_completed: u32,
    total_practice_seconds: i64,
    level: LessonLevel,
    achievements: Vec<Achievement>,
    last_active: DateTime<Utc>,
}

impl ProgressRecord {
    /// Zero-value record created on first touch.
    #[must_use]
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            completed_lessons: Vec::new(),
            exercises_completed: 0,
            total_practice_seconds: 0,
            level: LessonLevel::Beginner,
            achievements: Vec::new(),
            last_active: now,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn completed_lessons(&self) -> &[CompletedLesson] {
        &self.completed_lessons
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_lessons.len()
    }

    #[must_use]
    pub fn has_completed(&self, lesson_id: &LessonId) -> bool {
        self.completed_lessons
            .iter()
            .any(|l| &l.lesson_id == lesson_id)
    }

    #[must_use]
    pub fn exercises_completed(&self) -> u32 {
        self.exercises_completed
    }

    #[must_use]
    pub fn total_practice_seconds(&self) -> i64 {
        self.total_practice_seconds
    }

    #[must_use]
    pub fn level(&self) -> LessonLevel {
        self.level
    }

    #[must_use]
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    #[must_use]
    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    #[must_use]
    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    /// Apply a `LessonFinished` event.
    ///
    /// Adding the same lesson twice keeps set semantics: the existing entry
    /// is refreshed in place and counters still accrue, but the completed
    /// count does not grow. Level is recomputed from the completed count and
    /// achievements unlock only when the count lands exactly on a milestone.
    pub fn record_lesson_completion(
        &mut self,
        lesson_id: LessonId,
        score: u32,
        time_spent_seconds: i64,
        now: DateTime<Utc>,
    ) {
        let entry = CompletedLesson {
            lesson_id,
            completed_at: now,
            score,
            time_spent_seconds,
        };
        match self
            .completed_lessons
            .iter_mut()
            .find(|l| l.lesson_id == entry.lesson_id)
        {
            Some(existing) => *existing = entry,
            None => self.completed_lessons.push(entry),
        }

        self.exercises_completed += EXERCISES_PER_LESSON;
        self.total_practice_seconds += time_spent_seconds;
        self.last_active = now;
        self.level = level_for_completed(self.completed_lessons.len());

        // Exact-count trigger: a batch jump past a milestone misses it.
        if let Some(unlocked) = Achievement::for_exact_count(self.completed_lessons.len()) {
            if !self.achievements.contains(&unlocked) {
                self.achievements.push(unlocked);
            }
        }
    }

    /// Apply a speech practice attempt summary.
    ///
    /// Only the time and exercise counters move; completed lessons, level
    /// and achievements are untouched.
    pub fn record_practice_attempt(&mut self, time_spent_seconds: i64, now: DateTime<Utc>) {
        self.total_practice_seconds += time_spent_seconds;
        self.exercises_completed += 1;
        self.last_active = now;
    }
}

/// Derived learner level for a completed-lesson count.
#[must_use]
pub fn level_for_completed(count: usize) -> LessonLevel {
    if count >= ADVANCED_AT {
        LessonLevel::Advanced
    } else if count >= INTERMEDIATE_AT {
        LessonLevel::Intermediate
    } else {
        LessonLevel::Beginner
    }
}
