// src/analysis/themes.rs — Journal entry themes and mood-based prompts

use rand::seq::SliceRandom;
use rand::Rng;

const THEME_PATTERNS: &[(&str, &[&str])] = &[
    (
        "work stress",
        &["work", "job", "boss", "deadline", "meeting", "project", "office", "stress", "burnout"],
    ),
    (
        "family relationships",
        &["family", "mom", "dad", "parent", "child", "sibling", "brother", "sister", "relative"],
    ),
    (
        "romantic relationships",
        &["partner", "boyfriend", "girlfriend", "husband", "wife", "relationship", "love", "romance"],
    ),
    (
        "health",
        &["health", "doctor", "medicine", "sick", "pain", "exercise", "diet", "sleep"],
    ),
    (
        "anxiety",
        &["anxious", "anxiety", "worry", "nervous", "panic", "fear", "scared"],
    ),
    (
        "depression",
        &["depressed", "sad", "down", "empty", "hopeless", "lonely"],
    ),
    (
        "personal growth",
        &["growth", "learn", "improve", "develop", "change", "progress", "goal"],
    ),
    (
        "social interactions",
        &["friends", "social", "party", "gathering", "conversation", "people"],
    ),
    (
        "finances",
        &["money", "financial", "budget", "bills", "debt", "savings", "income"],
    ),
    (
        "creativity",
        &["create", "art", "music", "write", "creative", "inspiration", "project"],
    ),
];

/// Themes of a journal entry, in table order. One keyword hit is enough.
pub fn extract_themes(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    THEME_PATTERNS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(theme, _)| theme.to_string())
        .collect()
}

const POSITIVE_PROMPTS: &[&str] = &[
    "What brought you the most joy today?",
    "What are you feeling grateful for right now?",
    "How can you build on this positive momentum?",
    "What accomplishment are you proud of today?",
];

const NEUTRAL_PROMPTS: &[&str] = &[
    "How are you feeling in this moment?",
    "What's occupying your thoughts today?",
    "What would bring you more peace right now?",
    "What small step could improve your day?",
];

const NEGATIVE_PROMPTS: &[&str] = &[
    "What's weighing on your heart today?",
    "How can you show yourself compassion right now?",
    "What support do you need in this moment?",
    "What would help you feel more grounded?",
];

/// Prompt shown when nothing better is available.
pub const DEFAULT_PROMPT: &str =
    "How are you feeling today? What thoughts are flowing through your mind?";

/// Pick a writing prompt matching the current mood (1-10).
///
/// Mood 7 and above gets an uplifting prompt, 4 and below a gentle one;
/// no mood is treated as neutral.
pub fn suggest_prompt<R: Rng + ?Sized>(mood: Option<u8>, rng: &mut R) -> String {
    let prompts = match mood {
        Some(m) if m >= 7 => POSITIVE_PROMPTS,
        Some(m) if m <= 4 => NEGATIVE_PROMPTS,
        _ => NEUTRAL_PROMPTS,
    };
    prompts
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_PROMPT)
        .to_string()
}
