use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Default hard cap on a single recording.
pub const RECORDING_TIMEOUT_SECS: i64 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecorderError {
    #[error("a recording is already in progress")]
    AlreadyRecording,
    #[error("no recording in progress")]
    NotRecording,
    #[error("no result is being processed")]
    NotProcessing,
}

/// Recording lifecycle: `Idle -> Recording -> Processing -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording { started_at: DateTime<Utc> },
    Processing,
}

/// Tracks where a practice recording is in its lifecycle and enforces the
/// hard timeout on the recording phase.
#[derive(Debug, Clone)]
pub struct Recorder {
    state: RecorderState,
    timeout: Duration,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::seconds(RECORDING_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            state: RecorderState::Idle,
            timeout,
        }
    }

    #[must_use]
    pub fn state(&self) -> RecorderState {
        self.state
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Begin capturing audio.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRecording` unless the recorder is idle.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), RecorderError> {
        if !matches!(self.state, RecorderState::Idle) {
            return Err(RecorderError::AlreadyRecording);
        }
        self.state = RecorderState::Recording { started_at: now };
        Ok(())
    }

    /// Explicit stop; only legal while recording.
    ///
    /// # Errors
    ///
    /// Returns `NotRecording` in any other state.
    pub fn stop(&mut self) -> Result<(), RecorderError> {
        if !self.is_recording() {
            return Err(RecorderError::NotRecording);
        }
        self.state = RecorderState::Processing;
        Ok(())
    }

    /// Apply the hard timeout: force `Recording -> Processing` once the
    /// recording has run for at least the configured timeout. Returns true
    /// if the transition fired.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if let RecorderState::Recording { started_at } = self.state {
            if now - started_at >= self.timeout {
                self.state = RecorderState::Processing;
                return true;
            }
        }
        false
    }

    /// A result (or error) arrived; return to idle.
    ///
    /// # Errors
    ///
    /// Returns `NotProcessing` unless a result was pending.
    pub fn finish(&mut self) -> Result<(), RecorderError> {
        if !matches!(self.state, RecorderState::Processing) {
            return Err(RecorderError::NotProcessing);
        }
        self.state = RecorderState::Idle;
        Ok(())
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekho_core::time::fixed_now;

    #[test]
    fn full_cycle() {
        let mut recorder = Recorder::new();
        let now = fixed_now();

        recorder.start(now).unwrap();
        assert!(recorder.is_recording());
        recorder.stop().unwrap();
        assert_eq!(recorder.state(), RecorderState::Processing);
        recorder.finish().unwrap();
        assert_eq!(recorder.state(), RecorderState::Idle);
    }

    #[test]
    fn stop_is_only_legal_while_recording() {
        let mut recorder = Recorder::new();
        assert_eq!(recorder.stop(), Err(RecorderError::NotRecording));

        recorder.start(fixed_now()).unwrap();
        recorder.stop().unwrap();
        assert_eq!(recorder.stop(), Err(RecorderError::NotRecording));
    }

    #[test]
    fn timeout_forces_processing() {
        let mut recorder = Recorder::new();
        let now = fixed_now();
        recorder.start(now).unwrap();

        assert!(!recorder.tick(now + Duration::seconds(4)));
        assert!(recorder.is_recording());

        assert!(recorder.tick(now + Duration::seconds(5)));
        assert_eq!(recorder.state(), RecorderState::Processing);
    }

    #[test]
    fn cannot_start_twice() {
        let mut recorder = Recorder::new();
        recorder.start(fixed_now()).unwrap();
        assert_eq!(
            recorder.start(fixed_now()),
            Err(RecorderError::AlreadyRecording)
        );
    }
}
