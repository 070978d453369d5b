//! The built-in practice phrase book and the offline translation table.

use rand::Rng;

/// A phrase offered for pronunciation practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticePhrase {
    pub hindi: &'static str,
    pub romanized: &'static str,
    pub english: &'static str,
}

/// The stock phrases offered on the practice screen.
pub const DEMO_PHRASES: &[PracticePhrase] = &[
    PracticePhrase {
        hindi: "नमस्ते",
        romanized: "Namaste",
        english: "Hello/Greetings",
    },
    PracticePhrase {
        hindi: "आप कैसे हैं?",
        romanized: "Aap kaise hain?",
        english: "How are you?",
    },
    PracticePhrase {
        hindi: "मेरा नाम ... है",
        romanized: "Mera naam ... hai",
        english: "My name is ...",
    },
    PracticePhrase {
        hindi: "धन्यवाद",
        romanized: "Dhanyavaad",
        english: "Thank you",
    },
    PracticePhrase {
        hindi: "मुझे हिंदी सीखना है",
        romanized: "Mujhe Hindi seekhna hai",
        english: "I want to learn Hindi",
    },
];

/// Pick a different phrase at random; never repeats the current one while
/// more than one phrase exists.
#[must_use]
pub fn change_phrase<R: Rng>(rng: &mut R, current: &PracticePhrase) -> &'static PracticePhrase {
    loop {
        let candidate = &DEMO_PHRASES[rng.random_range(0..DEMO_PHRASES.len())];
        if candidate.hindi != current.hindi || DEMO_PHRASES.len() <= 1 {
            return candidate;
        }
    }
}

/// English to Hindi translations for common phrases, available offline.
const TRANSLATIONS: &[(&str, &str)] = &[
    ("hello", "नमस्ते (Namaste)"),
    ("thank you", "धन्यवाद (Dhanyavaad)"),
    ("good morning", "शुभ प्रभात (Shubh Prabhat)"),
    ("good night", "शुभ रात्रि (Shubh Ratri)"),
    ("how are you", "आप कैसे हैं? (Aap kaise hain?)"),
    ("i am fine", "मैं ठीक हूँ (Main theek hoon)"),
    ("what is your name", "आपका नाम क्या है? (Aapka naam kya hai?)"),
    ("my name is", "मेरा नाम है (Mera naam hai)"),
    ("nice to meet you", "आपसे मिलकर खुशी हुई (Aapse milkar khushi hui)"),
    ("yes", "हां (Haan)"),
    ("no", "नहीं (Nahin)"),
    ("please", "कृपया (Kripaya)"),
    ("sorry", "माफ़ कीजिए (Maaf kijiye)"),
    ("excuse me", "क्षमा कीजिए (Kshama kijiye)"),
    ("i want", "मुझे चाहिए (Mujhe chahiye)"),
    ("how much", "कितना (Kitna)"),
    ("where is", "कहां है (Kahaan hai)"),
    ("i understand", "मैं समझता हूं (Main samajhta hoon)"),
    ("i don't understand", "मैं नहीं समझता (Main nahin samajhta)"),
    ("help", "मदद (Madad)"),
    ("water", "पानी (Paani)"),
    ("food", "खाना (Khaana)"),
];

/// Look up a common English phrase, ignoring case and surrounding space.
#[must_use]
pub fn translate(english: &str) -> Option<&'static str> {
    let needle = english.trim().to_lowercase();
    TRANSLATIONS
        .iter()
        .find(|(en, _)| *en == needle)
        .map(|(_, hi)| *hi)
}
