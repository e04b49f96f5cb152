// src/therapist/tone.rs — Therapeutic tones and reply categories

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Response style chosen by the user for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Empathetic,
    Honest,
    Cognitive,
    #[serde(alias = "solution-focused")]
    Solution,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Empathetic, Tone::Honest, Tone::Cognitive, Tone::Solution];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empathetic => "empathetic",
            Self::Honest => "honest",
            Self::Cognitive => "cognitive",
            Self::Solution => "solution",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Empathetic => "Empathetic",
            Self::Honest => "Honest",
            Self::Cognitive => "Cognitive-Behavioral",
            Self::Solution => "Solution-Focused",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Empathetic => "Warm, understanding, and emotionally supportive",
            Self::Honest => "Direct, truthful, and straightforward guidance",
            Self::Cognitive => "Thought-focused, pattern recognition, and behavioral change",
            Self::Solution => "Goal-oriented, action-focused, and future-directed",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "empathetic" => Ok(Self::Empathetic),
            "honest" => Ok(Self::Honest),
            "cognitive" | "cbt" => Ok(Self::Cognitive),
            "solution" | "solution-focused" => Ok(Self::Solution),
            other => Err(format!(
                "unknown tone '{other}' (expected empathetic, honest, cognitive or solution)"
            )),
        }
    }
}

/// Kind of reply the selection policy produces for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Acknowledgment,
    Question,
    Reflection,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acknowledgment => "acknowledgment",
            Self::Question => "question",
            Self::Reflection => "reflection",
        }
    }
}
