pub mod demo;
pub mod phrases;
pub mod recorder;
pub mod service;
pub mod speech;

// Public API of the practice subsystem.
pub use demo::{DemoRecognizer, DEMO_CONFIDENCE_FLOOR};
pub use phrases::{change_phrase, translate, PracticePhrase, DEMO_PHRASES};
pub use recorder::{Recorder, RecorderError, RecorderState, RECORDING_TIMEOUT_SECS};
pub use service::{
    PracticeOutcome, PracticeService, PracticeSettings, PracticeSettingsError,
    DEFAULT_ATTEMPT_TIME_COST_SECS, DEMO_SUGGESTION_AFTER,
};
pub use speech::{
    MutedSynthesizer, RecognizerError, SpeakRequest, SpeechRecognizer, SpeechSynthesizer,
    SynthesizerError, DEFAULT_SPEECH_RATE, DEFAULT_VOICE_HINT,
};
