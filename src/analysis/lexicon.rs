// src/analysis/lexicon.rs — Emotion, urgency and topic detection
//
// Everything here is a case-insensitive substring test against fixed word
// tables. Detection only ever looks at the text it is given.

use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "good",
    "great",
    "excited",
    "joy",
    "love",
    "grateful",
    "blessed",
    "peaceful",
    "content",
    "fulfilled",
    "proud",
    "confident",
    "hopeful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "angry",
    "frustrated",
    "disappointed",
    "worried",
    "anxious",
    "stressed",
    "tired",
    "lonely",
    "hurt",
    "confused",
    "overwhelmed",
    "hopeless",
    "guilty",
];

const URGENT_WORDS: &[&str] = &[
    "urgent",
    "emergency",
    "crisis",
    "immediate",
    "now",
    "desperate",
    "panic",
    "terrible",
    "awful",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Conversation topics recognised in chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Work,
    Relationships,
    Family,
    Health,
    Stress,
    Anxiety,
    Depression,
    Goals,
    Future,
    Past,
    Money,
    Creativity,
    Spirituality,
    Friendship,
    Love,
    Breakup,
    Marriage,
    Parenting,
    Career,
    Education,
    SelfCare,
}

impl Topic {
    /// Detection order; `detect` reports topics in this order.
    pub const ALL: [Topic; 21] = [
        Topic::Work,
        Topic::Relationships,
        Topic::Family,
        Topic::Health,
        Topic::Stress,
        Topic::Anxiety,
        Topic::Depression,
        Topic::Goals,
        Topic::Future,
        Topic::Past,
        Topic::Money,
        Topic::Creativity,
        Topic::Spirituality,
        Topic::Friendship,
        Topic::Love,
        Topic::Breakup,
        Topic::Marriage,
        Topic::Parenting,
        Topic::Career,
        Topic::Education,
        Topic::SelfCare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Relationships => "relationships",
            Self::Family => "family",
            Self::Health => "health",
            Self::Stress => "stress",
            Self::Anxiety => "anxiety",
            Self::Depression => "depression",
            Self::Goals => "goals",
            Self::Future => "future",
            Self::Past => "past",
            Self::Money => "money",
            Self::Creativity => "creativity",
            Self::Spirituality => "spirituality",
            Self::Friendship => "friendship",
            Self::Love => "love",
            Self::Breakup => "breakup",
            Self::Marriage => "marriage",
            Self::Parenting => "parenting",
            Self::Career => "career",
            Self::Education => "education",
            Self::SelfCare => "self-care",
        }
    }

    /// Substrings that mark the topic as present. The topic name is always one.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Work => &["work", "job", "boss", "office", "deadline", "colleague", "coworker"],
            Self::Relationships => &["relationship", "partner", "boyfriend", "girlfriend", "dating"],
            Self::Family => &["family", "mother", "father", "parents", "sibling", "brother", "sister"],
            Self::Health => &["health", "doctor", "sick", "illness", "symptom", "exercise", "sleep"],
            Self::Stress => &["stress", "pressure", "burnout", "burned out", "overwhelm"],
            Self::Anxiety => &["anxiety", "anxious", "nervous", "panic", "worry", "worried"],
            Self::Depression => &["depression", "depressed", "hopeless", "numb", "empty inside"],
            Self::Goals => &["goal", "resolution", "ambition", "achieve"],
            Self::Future => &["future", "someday", "next year", "plans"],
            Self::Past => &["past", "childhood", "used to", "memories", "regret"],
            Self::Money => &["money", "financ", "debt", "bills", "budget", "salary"],
            Self::Creativity => &["creativity", "creative", "painting", "drawing", "music", "writing"],
            Self::Spirituality => &["spirituality", "spiritual", "faith", "pray", "meditat"],
            Self::Friendship => &["friendship", "friend"],
            Self::Love => &["love", "in love", "crush"],
            Self::Breakup => &["breakup", "break up", "broke up", "broken up", "split up"],
            Self::Marriage => &["marriage", "married", "husband", "wife", "wedding", "spouse"],
            Self::Parenting => &["parenting", "my kids", "my child", "my son", "my daughter", "toddler"],
            Self::Career => &["career", "promotion", "interview", "profession"],
            Self::Education => &["education", "school", "exam", "study", "college", "university"],
            Self::SelfCare => &["self-care", "self care", "relax", "me time", "recharge", "pamper"],
        }
    }

    /// Stem that shows a reply already talks about the topic.
    pub fn mention(&self) -> &'static str {
        match self {
            Self::Relationships => "relationship",
            Self::Goals => "goal",
            Self::Friendship => "friend",
            Self::Spirituality => "spiritual",
            Self::Creativity => "creativ",
            Self::SelfCare => "care",
            other => other.as_str(),
        }
    }

    /// Sentence appended to a reply that does not mention the topic yet.
    pub fn sentence(&self) -> &'static str {
        match self {
            Self::Work => "This work situation seems to be really affecting you.",
            Self::Relationships => "Your relationships are clearly important to you.",
            Self::Family => "Family can shape so much of how we feel.",
            Self::Health => "Your health deserves real attention here.",
            Self::Stress => "It sounds like the stress has been building up.",
            Self::Anxiety => "That anxiety sounds exhausting to carry.",
            Self::Depression => "Feeling this low is heavy, and depression is not a personal failing.",
            Self::Goals => "Your goals clearly matter a lot to you.",
            Self::Future => "Thinking about the future can stir up a lot.",
            Self::Past => "The past seems to still be speaking to you.",
            Self::Money => "Money worries can touch every part of life.",
            Self::Creativity => "Your creativity sounds like an important outlet.",
            Self::Spirituality => "Your spiritual life seems to be part of this too.",
            Self::Friendship => "Your friendships clearly mean a lot to you.",
            Self::Love => "Love brings out some of our strongest feelings.",
            Self::Breakup => "A breakup can shake the ground under you.",
            Self::Marriage => "Your marriage is clearly on your mind.",
            Self::Parenting => "Parenting asks so much of you.",
            Self::Career => "Your career path seems to weigh on you.",
            Self::Education => "Your education seems to be a big part of this.",
            Self::SelfCare => "Making room for self-care matters here.",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub emotion: Emotion,
    pub urgency: Urgency,
    pub topics: Vec<Topic>,
}

/// Analyze a single message.
pub fn detect(text: &str) -> Detection {
    let lower = text.to_lowercase();
    Detection {
        emotion: detect_emotion(&lower),
        urgency: detect_urgency(&lower),
        topics: detect_topics(&lower),
    }
}

fn count_hits(lower: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| lower.contains(*w)).count()
}

fn detect_emotion(lower: &str) -> Emotion {
    let positive = count_hits(lower, POSITIVE_WORDS);
    let negative = count_hits(lower, NEGATIVE_WORDS);

    if positive > negative {
        Emotion::Positive
    } else if negative > positive {
        Emotion::Negative
    } else if positive > 0 {
        Emotion::Mixed
    } else {
        Emotion::Neutral
    }
}

fn detect_urgency(lower: &str) -> Urgency {
    match count_hits(lower, URGENT_WORDS) {
        0 => Urgency::Low,
        1 => Urgency::Medium,
        _ => Urgency::High,
    }
}

fn detect_topics(lower: &str) -> Vec<Topic> {
    Topic::ALL
        .into_iter()
        .filter(|t| t.keywords().iter().any(|k| lower.contains(k)))
        .collect()
}
