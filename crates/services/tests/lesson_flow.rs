use std::sync::Arc;

use seekho_core::model::{Lesson, LessonId, LessonLevel, SessionState, Step, UserId};
use seekho_core::time::fixed_now;
use services::{Clock, LessonAdvance, LessonFlowError, LessonLoopService, ProgressService};
use storage::repository::InMemoryRepository;

fn service_with(repo: InMemoryRepository) -> LessonLoopService {
    let clock = Clock::fixed(fixed_now());
    let progress = ProgressService::new(clock, Arc::new(repo.clone()));
    LessonLoopService::new(clock, Arc::new(repo), progress)
}

fn exercise(question: &str, correct: &str) -> Step {
    Step::Exercise {
        question: question.to_owned(),
        options: vec![correct.to_owned(), "गलत".to_owned()],
        correct_answer: correct.to_owned(),
        audio_prompt: None,
    }
}

#[tokio::test]
async fn builtin_lesson_walkthrough() {
    let repo = InMemoryRepository::with_builtin_catalog().unwrap();
    let svc = service_with(repo);
    let user = UserId::new("learner").unwrap();

    let lessons = svc.list_lessons().await.unwrap();
    assert_eq!(lessons.len(), 3);
    assert_eq!(lessons[0].title, "Basic Greetings");

    let mut session = svc.open_lesson(&lessons[0].id).await.unwrap();
    assert_eq!(session.state(), SessionState::AtStep(0));
    assert_eq!(session.score(), 0);

    // Steps 0-3 are text/audio; the exercise is last.
    for expected in 1..=4 {
        match svc.advance(&user, &mut session).await.unwrap() {
            LessonAdvance::Moved { step } => assert_eq!(step, expected),
            LessonAdvance::Finished { .. } => panic!("finished too early"),
        }
    }

    let result = svc.answer_current(&mut session, "नमस्ते").unwrap();
    assert!(result.is_correct);

    match svc.advance(&user, &mut session).await.unwrap() {
        LessonAdvance::Finished { event, progress } => {
            assert_eq!(event.score, 1);
            assert!(progress.has_completed(&lessons[0].id));
            assert_eq!(progress.exercises_completed(), 5);
        }
        LessonAdvance::Moved { .. } => panic!("expected completion"),
    }
}

#[tokio::test]
async fn three_exercises_all_correct_scores_three() {
    let repo = InMemoryRepository::new();
    repo.insert_lesson(
        Lesson::new(
            LessonId::new("1").unwrap(),
            "Drill",
            LessonLevel::Beginner,
            "",
            vec![
                exercise("Q1", "एक"),
                exercise("Q2", "दो"),
                exercise("Q3", "तीन"),
            ],
        )
        .unwrap(),
    )
    .unwrap();
    let svc = service_with(repo);
    let user = UserId::new("learner").unwrap();

    let mut session = svc.open_lesson(&LessonId::new("1").unwrap()).await.unwrap();
    for answer in ["एक", "दो", "तीन"] {
        assert!(svc.answer_current(&mut session, answer).unwrap().is_correct);
        let _ = svc.advance(&user, &mut session).await.unwrap();
    }

    assert!(session.is_complete());
    assert_eq!(session.score(), 3);
}

#[tokio::test]
async fn unknown_lesson_is_not_found() {
    let svc = service_with(InMemoryRepository::new());
    let err = svc
        .open_lesson(&LessonId::new("99").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, LessonFlowError::NotFound));
}

#[tokio::test]
async fn advancing_past_unanswered_exercise_is_blocked() {
    let repo = InMemoryRepository::with_builtin_catalog().unwrap();
    let svc = service_with(repo);
    let user = UserId::new("learner").unwrap();

    // Lesson 3 has two text steps, then text, then the exercise at index 3.
    let mut session = svc.open_lesson(&LessonId::new("3").unwrap()).await.unwrap();
    for _ in 0..3 {
        svc.advance(&user, &mut session).await.unwrap();
    }
    assert!(!session.can_advance());
    assert!(svc.advance(&user, &mut session).await.is_err());
}

#[tokio::test]
async fn first_touch_progress_is_zero_valued() {
    let repo = InMemoryRepository::new();
    let clock = Clock::fixed(fixed_now());
    let progress = ProgressService::new(clock, Arc::new(repo));

    let record = progress.get(&UserId::new("new-user").unwrap()).await.unwrap();
    assert_eq!(record.completed_count(), 0);
    assert_eq!(record.exercises_completed(), 0);
    assert_eq!(record.total_practice_seconds(), 0);
    assert_eq!(record.level(), LessonLevel::Beginner);
}

#[tokio::test]
async fn progress_record_wire_shape() {
    let repo = InMemoryRepository::with_builtin_catalog().unwrap();
    let svc = service_with(repo);
    let user = UserId::new("learner").unwrap();

    let mut session = svc.open_lesson(&LessonId::new("3").unwrap()).await.unwrap();
    for _ in 0..3 {
        svc.advance(&user, &mut session).await.unwrap();
    }
    svc.answer_current(&mut session, "तीन").unwrap();
    let LessonAdvance::Finished { progress, .. } =
        svc.advance(&user, &mut session).await.unwrap()
    else {
        panic!("expected completion");
    };

    let json = serde_json::to_value(&progress).unwrap();
    assert_eq!(json["user_id"], "learner");
    assert_eq!(json["level"], "beginner");
    assert_eq!(json["completed_lessons"][0]["lesson_id"], "3");
    assert_eq!(json["exercises_completed"], 5);
}
