//! The demo recognition backend.
//!
//! A named strategy, not a hidden fallback: callers opt in when real
//! recognition is unavailable or too discouraging. It echoes the target
//! phrase verbatim with a synthetic confidence that never drops below
//! [`DEMO_CONFIDENCE_FLOOR`], so demo-mode confidence is a practice aid,
//! not a genuine signal.

use async_trait::async_trait;
use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use seekho_core::practice::RawTranscript;

use crate::practice::speech::{RecognizerError, SpeechRecognizer};

/// Demo attempts never score below this, by product decision.
pub const DEMO_CONFIDENCE_FLOOR: f64 = 70.0;

const DEMO_CONFIDENCE_RANGE: std::ops::RangeInclusive<u32> = 65..=95;

pub struct DemoRecognizer {
    rng: Mutex<StdRng>,
}

impl DemoRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seeded variant so tests can pin the synthetic confidence sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for DemoRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRecognizer for DemoRecognizer {
    async fn recognize(
        &self,
        target_phrase: &str,
        _timeout: Duration,
    ) -> Result<RawTranscript, RecognizerError> {
        let sampled = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| RecognizerError::Other(e.to_string()))?;
            rng.random_range(DEMO_CONFIDENCE_RANGE)
        };
        let confidence = f64::from(sampled).max(DEMO_CONFIDENCE_FLOOR);
        Ok(RawTranscript::new(target_phrase, confidence))
    }
}
