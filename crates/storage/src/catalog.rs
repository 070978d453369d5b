//! The built-in Hindi lesson catalog.
//!
//! Lessons ship embedded in the binary as JSON and are validated at load
//! time, so a malformed catalog is caught the first time it is opened
//! rather than mid-lesson.

use seekho_core::model::{Lesson, LessonDraft, LessonError};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] LessonError),
}

const BUILTIN_CATALOG: &str = r#"[
  {
    "id": "1",
    "title": "Basic Greetings",
    "level": "beginner",
    "description": "Learn common Hindi greetings and introductions",
    "steps": [
      { "type": "text", "body": "नमस्ते (Namaste) - Hello/Greetings" },
      {
        "type": "audio",
        "target_phrase": "नमस्ते",
        "translation": "Hello/Greetings",
        "clip": "/audio/namaste.mp3"
      },
      { "type": "text", "body": "आप कैसे हैं? (Aap kaise hain?) - How are you?" },
      {
        "type": "audio",
        "target_phrase": "आप कैसे हैं?",
        "translation": "How are you?",
        "clip": "/audio/aap-kaise-hain.mp3",
        "examples": [
          { "phrase": "मैं ठीक हूँ", "translation": "I am fine" }
        ]
      },
      {
        "type": "exercise",
        "question": "How do you say \"Hello\" in Hindi?",
        "options": ["नमस्ते", "धन्यवाद", "माफ़ कीजिये", "फिर मिलेंगे"],
        "correct_answer": "नमस्ते",
        "audio_prompt": "नमस्ते"
      }
    ]
  },
  {
    "id": "2",
    "title": "Common Phrases",
    "level": "beginner",
    "description": "Learn everyday useful Hindi phrases",
    "steps": [
      { "type": "text", "body": "धन्यवाद (Dhanyavaad) - Thank you" },
      {
        "type": "audio",
        "target_phrase": "धन्यवाद",
        "translation": "Thank you",
        "clip": "/audio/dhanyavaad.mp3",
        "examples": [
          { "phrase": "बहुत धन्यवाद", "translation": "Thank you very much" }
        ]
      },
      { "type": "text", "body": "माफ़ कीजिये (Maaf kijiye) - I'm sorry/Excuse me" },
      {
        "type": "audio",
        "target_phrase": "माफ़ कीजिये",
        "translation": "I'm sorry/Excuse me",
        "clip": "/audio/maaf-kijiye.mp3"
      },
      {
        "type": "exercise",
        "question": "How do you say \"Thank you\" in Hindi?",
        "options": ["नमस्ते", "धन्यवाद", "माफ़ कीजिये", "फिर मिलेंगे"],
        "correct_answer": "धन्यवाद",
        "audio_prompt": "धन्यवाद"
      }
    ]
  },
  {
    "id": "3",
    "title": "Numbers 1-10",
    "level": "beginner",
    "description": "Learn to count from 1 to 10 in Hindi",
    "steps": [
      { "type": "text", "body": "एक (Ek) - One" },
      { "type": "text", "body": "दो (Do) - Two" },
      { "type": "text", "body": "तीन (Teen) - Three" },
      {
        "type": "exercise",
        "question": "What is \"Three\" in Hindi?",
        "options": ["एक", "दो", "तीन", "चार"],
        "correct_answer": "तीन"
      }
    ]
  }
]"#;

/// Parse and validate the embedded catalog.
///
/// # Errors
///
/// Returns `CatalogError` if the embedded JSON fails to parse or a lesson
/// fails validation. Either indicates a defect in the shipped catalog.
pub fn builtin_lessons() -> Result<Vec<Lesson>, CatalogError> {
    let drafts: Vec<LessonDraft> = serde_json::from_str(BUILTIN_CATALOG)?;
    drafts
        .into_iter()
        .map(|draft| draft.validate().map_err(CatalogError::from))
        .collect()
}
