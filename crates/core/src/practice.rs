//! Pronunciation scoring: the confidence rescore policy and the feedback
//! tiers derived from it.
//!
//! Raw recognizer confidence is unreliable for a learner audience, so the
//! rescore lifts it with floors based on how close the transcript is to the
//! target phrase. The floors and tier thresholds are fixed product values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence floor when transcript and target match exactly after
/// normalization.
pub const EXACT_MATCH_FLOOR: f64 = 90.0;
/// Floor when one normalized string contains the other.
pub const PARTIAL_MATCH_FLOOR: f64 = 75.0;
/// Floor for any non-empty transcript containing Devanagari text.
pub const SCRIPT_MATCH_FLOOR: f64 = 40.0;
/// Floor for any other non-empty transcript.
pub const ANY_SPEECH_FLOOR: f64 = 30.0;

//
// ─── RAW RESULT ────────────────────────────────────────────────────────────────
//

/// What a recognition backend hands back before rescoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTranscript {
    pub transcript: String,
    /// Backend-reported confidence, 0-100.
    pub confidence_pct: f64,
}

impl RawTranscript {
    #[must_use]
    pub fn new(transcript: impl Into<String>, confidence_pct: f64) -> Self {
        Self {
            transcript: transcript.into(),
            confidence_pct,
        }
    }

    /// An empty result, as produced when no speech was captured.
    #[must_use]
    pub fn silence() -> Self {
        Self::new("", 0.0)
    }
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Severity used for the alert banner showing a piece of feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Quality band for a scored attempt, evaluated top-down on closed
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Excellent,
    Good,
    NeedsPractice,
    NeedsImprovement,
}

impl FeedbackTier {
    /// Tier for a final confidence value.
    #[must_use]
    pub fn for_confidence(confidence: f64) -> Self {
        if confidence >= 85.0 {
            FeedbackTier::Excellent
        } else if confidence >= 70.0 {
            FeedbackTier::Good
        } else if confidence >= 50.0 {
            FeedbackTier::NeedsPractice
        } else {
            FeedbackTier::NeedsImprovement
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            FeedbackTier::Excellent => Severity::Success,
            FeedbackTier::Good => Severity::Info,
            FeedbackTier::NeedsPractice => Severity::Warning,
            FeedbackTier::NeedsImprovement => Severity::Error,
        }
    }
}

impl fmt::Display for FeedbackTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeedbackTier::Excellent => "excellent",
            FeedbackTier::Good => "good",
            FeedbackTier::NeedsPractice => "needs practice",
            FeedbackTier::NeedsImprovement => "needs improvement",
        };
        write!(f, "{name}")
    }
}

/// User-visible feedback for one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub severity: Severity,
    /// Tier the feedback was derived from; `None` for non-score feedback
    /// such as "no speech detected".
    pub tier: Option<FeedbackTier>,
    pub message: String,
    pub details: String,
}

impl Feedback {
    /// Score-based feedback for a final confidence value.
    #[must_use]
    pub fn for_confidence(confidence: f64) -> Self {
        let tier = FeedbackTier::for_confidence(confidence);
        let (message, details) = match tier {
            FeedbackTier::Excellent => (
                "Excellent pronunciation!",
                "Your pronunciation was very clear and accurate.",
            ),
            FeedbackTier::Good => (
                "Good pronunciation",
                "Your pronunciation was good, but there's room for improvement.",
            ),
            FeedbackTier::NeedsPractice => (
                "Keep practicing",
                "Try to pronounce the phrase more clearly. Listen to the example again.",
            ),
            FeedbackTier::NeedsImprovement => (
                "Needs improvement",
                "Try again with clearer pronunciation. Use the listen button to hear the correct pronunciation.",
            ),
        };
        Self {
            severity: tier.severity(),
            tier: Some(tier),
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Feedback for an attempt that produced no transcript at all.
    #[must_use]
    pub fn no_speech() -> Self {
        Self {
            severity: Severity::Warning,
            tier: None,
            message: "No speech detected".to_owned(),
            details: "Please speak more clearly or check that your microphone is working."
                .to_owned(),
        }
    }
}

//
// ─── RESCORE ───────────────────────────────────────────────────────────────────
//

/// Trim, lowercase and strip all whitespace.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// True if the string contains at least one Devanagari scalar
/// (U+0900..=U+097F), the script range of the target language.
#[must_use]
pub fn contains_devanagari(s: &str) -> bool {
    s.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

/// Final confidence for a transcript against a target phrase.
///
/// Applies the floor ladder: exact normalized match, containment, script
/// presence, any speech. An empty transcript keeps the raw confidence
/// untouched.
#[must_use]
pub fn rescore(target: &str, transcript: &str, raw_confidence: f64) -> f64 {
    if transcript.is_empty() {
        return raw_confidence;
    }

    let norm_transcript = normalize(transcript);
    let norm_target = normalize(target);

    if norm_transcript == norm_target {
        raw_confidence.max(EXACT_MATCH_FLOOR)
    } else if norm_transcript.contains(&norm_target) || norm_target.contains(&norm_transcript) {
        raw_confidence.max(PARTIAL_MATCH_FLOOR)
    } else if contains_devanagari(transcript) {
        raw_confidence.max(SCRIPT_MATCH_FLOOR)
    } else {
        raw_confidence.max(ANY_SPEECH_FLOOR)
    }
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// One scored recording cycle: target, transcript, confidence and feedback.
///
/// Ephemeral; only its summary folds into the progress record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeAttempt {
    pub target_phrase: String,
    pub transcript: String,
    pub raw_confidence: f64,
    pub confidence: f64,
    pub feedback: Feedback,
}

impl PracticeAttempt {
    /// Rescore a raw recognition result against the target phrase and
    /// derive its feedback.
    #[must_use]
    pub fn score(target_phrase: impl Into<String>, raw: RawTranscript) -> Self {
        let target_phrase = target_phrase.into();
        let confidence = rescore(&target_phrase, &raw.transcript, raw.confidence_pct);
        let feedback = if raw.transcript.is_empty() {
            Feedback::no_speech()
        } else {
            Feedback::for_confidence(confidence)
        };
        Self {
            target_phrase,
            transcript: raw.transcript,
            raw_confidence: raw.confidence_pct,
            confidence,
            feedback,
        }
    }
}
