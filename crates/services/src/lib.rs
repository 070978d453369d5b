#![forbid(unsafe_code)]

pub mod error;
pub mod gate;
pub mod lesson_loop;
pub mod practice;
pub mod progress_service;

pub use seekho_core::Clock;

pub use error::{GateError, LessonFlowError, PracticeError, ProgressServiceError};
pub use gate::{Registration, SessionGate, SessionToken};
pub use lesson_loop::{LessonAdvance, LessonLoopService};
pub use practice::{
    DemoRecognizer, MutedSynthesizer, PracticeOutcome, PracticeService, PracticeSettings,
    Recorder, RecorderState, SpeechRecognizer, SpeechSynthesizer,
};
pub use progress_service::ProgressService;
