use chrono::Duration;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use thiserror::Error;

use seekho_core::model::{ProgressRecord, UserId};
use seekho_core::practice::PracticeAttempt;
use seekho_core::Clock;

use crate::error::PracticeError;
use crate::practice::recorder::{Recorder, RECORDING_TIMEOUT_SECS};
use crate::practice::speech::{
    SpeakRequest, SpeechRecognizer, SpeechSynthesizer, DEFAULT_SPEECH_RATE, DEFAULT_VOICE_HINT,
};
use crate::progress_service::ProgressService;

/// Consecutive recognition failures before demo mode is suggested even for
/// failure kinds that would not warrant it on their own.
pub const DEMO_SUGGESTION_AFTER: u32 = 2;

/// Practice time credited per attempt. A coarse fixed cost inherited from
/// the source system rather than measured wall-clock time.
pub const DEFAULT_ATTEMPT_TIME_COST_SECS: i64 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PracticeSettingsError {
    #[error("attempt time cost must be > 0")]
    InvalidTimeCost,
    #[error("recording timeout must be > 0")]
    InvalidTimeout,
    #[error("speech rate must be in (0, 2]")]
    InvalidRate,
}

/// Tunables for the practice pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeSettings {
    attempt_time_cost_seconds: i64,
    recording_timeout_seconds: i64,
    speech_rate: f32,
    voice_hint: Option<String>,
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            attempt_time_cost_seconds: DEFAULT_ATTEMPT_TIME_COST_SECS,
            recording_timeout_seconds: RECORDING_TIMEOUT_SECS,
            speech_rate: DEFAULT_SPEECH_RATE,
            voice_hint: Some(DEFAULT_VOICE_HINT.to_owned()),
        }
    }
}

impl PracticeSettings {
    /// # Errors
    ///
    /// Returns `PracticeSettingsError::InvalidTimeCost` for non-positive
    /// values.
    pub fn with_attempt_time_cost(mut self, seconds: i64) -> Result<Self, PracticeSettingsError> {
        if seconds <= 0 {
            return Err(PracticeSettingsError::InvalidTimeCost);
        }
        self.attempt_time_cost_seconds = seconds;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `PracticeSettingsError::InvalidTimeout` for non-positive
    /// values.
    pub fn with_recording_timeout(mut self, seconds: i64) -> Result<Self, PracticeSettingsError> {
        if seconds <= 0 {
            return Err(PracticeSettingsError::InvalidTimeout);
        }
        self.recording_timeout_seconds = seconds;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `PracticeSettingsError::InvalidRate` outside (0, 2].
    pub fn with_speech_rate(mut self, rate: f32) -> Result<Self, PracticeSettingsError> {
        if !(rate > 0.0 && rate <= 2.0) {
            return Err(PracticeSettingsError::InvalidRate);
        }
        self.speech_rate = rate;
        Ok(self)
    }

    #[must_use]
    pub fn attempt_time_cost_seconds(&self) -> i64 {
        self.attempt_time_cost_seconds
    }

    #[must_use]
    pub fn recording_timeout(&self) -> Duration {
        Duration::seconds(self.recording_timeout_seconds)
    }

    #[must_use]
    pub fn speech_rate(&self) -> f32 {
        self.speech_rate
    }

    #[must_use]
    pub fn voice_hint(&self) -> Option<&str> {
        self.voice_hint.as_deref()
    }
}

/// Result of one successful practice cycle.
#[derive(Debug, Clone)]
pub struct PracticeOutcome {
    pub attempt: PracticeAttempt,
    pub progress: ProgressRecord,
}

/// Drives the record -> recognize -> rescore -> feedback cycle for a
/// phrase and folds each completed attempt into the progress record.
#[derive(Clone)]
pub struct PracticeService {
    clock: Clock,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    progress: ProgressService,
    settings: PracticeSettings,
    error_streak: Arc<AtomicU32>,
}

impl PracticeService {
    #[must_use]
    pub fn new(
        clock: Clock,
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        progress: ProgressService,
    ) -> Self {
        Self {
            clock,
            recognizer,
            synthesizer,
            progress,
            settings: PracticeSettings::default(),
            error_streak: Arc::new(AtomicU32::new(0)),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PracticeSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &PracticeSettings {
        &self.settings
    }

    /// A recorder configured with this service's timeout, for callers that
    /// track the capture lifecycle.
    #[must_use]
    pub fn recorder(&self) -> Recorder {
        Recorder::with_timeout(self.settings.recording_timeout())
    }

    /// Run one full practice cycle against the target phrase.
    ///
    /// A completed attempt, whatever its confidence, is folded into the
    /// user's progress with the fixed per-attempt time cost. A failed
    /// recognition produces no progress update.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Recognition` when the backend fails; its
    /// `suggest_demo` flag is set for failure kinds that warrant the demo
    /// backend, or once failures have streaked.
    pub async fn practice(
        &self,
        user_id: &UserId,
        target_phrase: &str,
    ) -> Result<PracticeOutcome, PracticeError> {
        let raw = match self
            .recognizer
            .recognize(target_phrase, self.settings.recording_timeout())
            .await
        {
            Ok(raw) => {
                self.error_streak.store(0, Ordering::Relaxed);
                raw
            }
            Err(source) => {
                if source.is_user_abort() {
                    return Err(PracticeError::Recognition {
                        source,
                        suggest_demo: false,
                    });
                }
                let streak = self.error_streak.fetch_add(1, Ordering::Relaxed) + 1;
                let suggest_demo =
                    source.suggests_demo_mode() || streak >= DEMO_SUGGESTION_AFTER;
                return Err(PracticeError::Recognition {
                    source,
                    suggest_demo,
                });
            }
        };

        let attempt = PracticeAttempt::score(target_phrase, raw);
        let progress = self
            .progress
            .record_practice_attempt(user_id, self.settings.attempt_time_cost_seconds())
            .await?;
        Ok(PracticeOutcome { attempt, progress })
    }

    /// Speak the target phrase at the configured learner rate, cancelling
    /// any utterance already in flight.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Synthesizer` if synthesis is unavailable.
    pub fn hear(&self, text: &str) -> Result<(), PracticeError> {
        let mut request = SpeakRequest::new(text).with_rate(self.settings.speech_rate());
        request.voice_hint = self.settings.voice_hint().map(str::to_owned);
        self.synthesizer.speak(request)?;
        Ok(())
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}
