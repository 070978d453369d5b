//! Capability seams for the runtime's speech engines.
//!
//! The engines never talk to a concrete speech API; they are handed these
//! traits, which keeps the scoring pipeline testable and lets the demo
//! backend slot in as an ordinary implementation.

use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;

use seekho_core::practice::RawTranscript;

/// Language/voice hint for the target language.
pub const DEFAULT_VOICE_HINT: &str = "hi-IN";

/// Speaking rate slowed down for learners.
pub const DEFAULT_SPEECH_RATE: f32 = 0.8;

/// Failure kinds a recognition backend can report, mirroring the runtime
/// speech API's error taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecognizerError {
    #[error("no speech detected")]
    NoSpeech,
    #[error("microphone access denied")]
    PermissionDenied,
    #[error("no audio captured")]
    AudioCapture,
    #[error("network error during recognition")]
    Network,
    #[error("recognition aborted")]
    Aborted,
    #[error("speech recognition is not available: {0}")]
    Unavailable(String),
    #[error("recognition failed: {0}")]
    Other(String),
}

impl RecognizerError {
    /// Whether this failure alone justifies offering the demo backend,
    /// without waiting for a streak.
    #[must_use]
    pub fn suggests_demo_mode(&self) -> bool {
        matches!(
            self,
            RecognizerError::PermissionDenied
                | RecognizerError::Network
                | RecognizerError::Unavailable(_)
        )
    }

    /// User-initiated aborts are not surfaced as failures.
    #[must_use]
    pub fn is_user_abort(&self) -> bool {
        matches!(self, RecognizerError::Aborted)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthesizerError {
    #[error("speech synthesis is not available")]
    Unavailable,
    #[error("speech synthesis failed: {0}")]
    Other(String),
}

/// A backend that listens for one utterance and returns what it heard.
///
/// `target_phrase` is advisory: real recognizers ignore it, the demo
/// backend echoes it. Implementations must give up after `timeout`.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(
        &self,
        target_phrase: &str,
        timeout: Duration,
    ) -> Result<RawTranscript, RecognizerError>;
}

/// One utterance to synthesize.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakRequest {
    pub text: String,
    pub rate: f32,
    pub voice_hint: Option<String>,
}

impl SpeakRequest {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: DEFAULT_SPEECH_RATE,
            voice_hint: Some(DEFAULT_VOICE_HINT.to_owned()),
        }
    }

    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }
}

/// A backend that speaks text aloud.
///
/// Issuing a new utterance must first cancel any in-flight one; at most one
/// utterance is ever in flight. Completion is fire-and-forget.
pub trait SpeechSynthesizer: Send + Sync {
    /// Cancel any in-flight utterance and start speaking this one.
    ///
    /// # Errors
    ///
    /// Returns `SynthesizerError` if the capability is missing or failed.
    fn speak(&self, request: SpeakRequest) -> Result<(), SynthesizerError>;

    /// Cancel the in-flight utterance, if any.
    fn cancel(&self);
}

/// Synthesizer for environments without audio output: accepts every
/// request and plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutedSynthesizer;

impl SpeechSynthesizer for MutedSynthesizer {
    fn speak(&self, _request: SpeakRequest) -> Result<(), SynthesizerError> {
        Ok(())
    }

    fn cancel(&self) {}
}
