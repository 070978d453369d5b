use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use seekho_core::model::UserId;
use seekho_core::practice::{FeedbackTier, RawTranscript};
use seekho_core::time::fixed_now;
use services::practice::{RecognizerError, SpeechRecognizer};
use services::{
    Clock, DemoRecognizer, MutedSynthesizer, PracticeError, PracticeService, PracticeSettings,
    ProgressService,
};
use storage::repository::InMemoryRepository;

fn practice_service(recognizer: Arc<dyn SpeechRecognizer>) -> PracticeService {
    let clock = Clock::fixed(fixed_now());
    let repo = InMemoryRepository::new();
    let progress = ProgressService::new(clock, Arc::new(repo));
    PracticeService::new(clock, recognizer, Arc::new(MutedSynthesizer), progress)
}

struct FailingRecognizer(RecognizerError);

#[async_trait]
impl SpeechRecognizer for FailingRecognizer {
    async fn recognize(
        &self,
        _target_phrase: &str,
        _timeout: Duration,
    ) -> Result<RawTranscript, RecognizerError> {
        Err(self.0.clone())
    }
}

struct SilentRecognizer;

#[async_trait]
impl SpeechRecognizer for SilentRecognizer {
    async fn recognize(
        &self,
        _target_phrase: &str,
        _timeout: Duration,
    ) -> Result<RawTranscript, RecognizerError> {
        Ok(RawTranscript::silence())
    }
}

#[tokio::test]
async fn demo_attempt_always_lands_in_good_or_better() {
    let svc = practice_service(Arc::new(DemoRecognizer::with_seed(3)));
    let user = UserId::new("learner").unwrap();

    for _ in 0..20 {
        let outcome = svc.practice(&user, "नमस्ते").await.unwrap();
        assert!(outcome.attempt.confidence >= 70.0);
        assert!(matches!(
            outcome.attempt.feedback.tier,
            Some(FeedbackTier::Good | FeedbackTier::Excellent)
        ));
    }
}

#[tokio::test]
async fn completed_attempt_credits_fixed_time_cost() {
    let svc = practice_service(Arc::new(DemoRecognizer::with_seed(3)));
    let user = UserId::new("learner").unwrap();

    let outcome = svc.practice(&user, "धन्यवाद").await.unwrap();
    assert_eq!(outcome.progress.total_practice_seconds(), 10);
    assert_eq!(outcome.progress.exercises_completed(), 1);
    assert_eq!(outcome.progress.completed_count(), 0);

    let outcome = svc.practice(&user, "धन्यवाद").await.unwrap();
    assert_eq!(outcome.progress.total_practice_seconds(), 20);
    assert_eq!(outcome.progress.exercises_completed(), 2);
}

#[tokio::test]
async fn time_cost_is_configurable() {
    let svc = practice_service(Arc::new(DemoRecognizer::with_seed(3))).with_settings(
        PracticeSettings::default()
            .with_attempt_time_cost(25)
            .unwrap(),
    );
    let user = UserId::new("learner").unwrap();

    let outcome = svc.practice(&user, "नमस्ते").await.unwrap();
    assert_eq!(outcome.progress.total_practice_seconds(), 25);
}

#[tokio::test]
async fn empty_transcript_keeps_raw_confidence_and_updates_progress() {
    let svc = practice_service(Arc::new(SilentRecognizer));
    let user = UserId::new("learner").unwrap();

    let outcome = svc.practice(&user, "नमस्ते").await.unwrap();
    assert_eq!(outcome.attempt.confidence, 0.0);
    assert_eq!(outcome.attempt.feedback.tier, None);
    assert_eq!(outcome.attempt.feedback.message, "No speech detected");
    // A completed attempt reports progress regardless of its score.
    assert_eq!(outcome.progress.total_practice_seconds(), 10);
}

#[tokio::test]
async fn network_failure_suggests_demo_mode_and_skips_progress() {
    let repo = InMemoryRepository::new();
    let clock = Clock::fixed(fixed_now());
    let progress = ProgressService::new(clock, Arc::new(repo));
    let svc = PracticeService::new(
        clock,
        Arc::new(FailingRecognizer(RecognizerError::Network)),
        Arc::new(MutedSynthesizer),
        progress.clone(),
    );
    let user = UserId::new("learner").unwrap();

    let err = svc.practice(&user, "नमस्ते").await.unwrap_err();
    match err {
        PracticeError::Recognition {
            source,
            suggest_demo,
        } => {
            assert_eq!(source, RecognizerError::Network);
            assert!(suggest_demo);
        }
        other => panic!("unexpected error: {other}"),
    }

    let record = progress.get(&user).await.unwrap();
    assert_eq!(record.total_practice_seconds(), 0);
    assert_eq!(record.exercises_completed(), 0);
}

#[tokio::test]
async fn repeated_failures_streak_into_demo_suggestion() {
    let svc = practice_service(Arc::new(FailingRecognizer(RecognizerError::Other(
        "engine crashed".to_owned(),
    ))));
    let user = UserId::new("learner").unwrap();

    let first = svc.practice(&user, "नमस्ते").await.unwrap_err();
    let PracticeError::Recognition { suggest_demo, .. } = first else {
        panic!("expected recognition error");
    };
    assert!(!suggest_demo);

    let second = svc.practice(&user, "नमस्ते").await.unwrap_err();
    let PracticeError::Recognition { suggest_demo, .. } = second else {
        panic!("expected recognition error");
    };
    assert!(suggest_demo);
}

#[tokio::test]
async fn user_abort_is_never_a_demo_suggestion() {
    let svc = practice_service(Arc::new(FailingRecognizer(RecognizerError::Aborted)));
    let user = UserId::new("learner").unwrap();

    let err = svc.practice(&user, "नमस्ते").await.unwrap_err();
    let PracticeError::Recognition {
        source,
        suggest_demo,
    } = err
    else {
        panic!("expected recognition error");
    };
    assert!(source.is_user_abort());
    assert!(!suggest_demo);
}
