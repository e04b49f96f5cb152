// src/consistency/prompts.rs — Journaling prompt picked by tier and time of day

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::model::ConsistencyLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    Reflective,
    Challenging,
    Supportive,
    Encouraging,
}

impl PromptStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reflective => "reflective",
            Self::Challenging => "challenging",
            Self::Supportive => "supportive",
            Self::Encouraging => "encouraging",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Reflective => "Reflective",
            Self::Challenging => "Challenging",
            Self::Supportive => "Supportive",
            Self::Encouraging => "Encouraging",
        }
    }

    pub fn templates(&self) -> &'static [&'static str] {
        match self {
            Self::Reflective => REFLECTIVE,
            Self::Challenging => CHALLENGING,
            Self::Supportive => SUPPORTIVE,
            Self::Encouraging => ENCOURAGING,
        }
    }
}

impl std::fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const REFLECTIVE: &[&str] = &[
    "Looking back over your recent entries, what pattern are you only now starting to notice?",
    "What belief about yourself has quietly shifted since you began this practice?",
    "Which moment today carried more meaning than it first seemed to?",
    "What would the version of you from a year ago want to ask you today?",
];

const CHALLENGING: &[&str] = &[
    "What is one thing you have been avoiding, and what is it costing you?",
    "Where did you fall short of your own standards today, and what will you change?",
    "Which assumption guided your choices today, and does it hold up?",
    "What uncomfortable truth are you ready to write down?",
];

const SUPPORTIVE: &[&str] = &[
    "What went well today, even if it was small?",
    "How did you look after yourself today?",
    "Who or what helped you feel steady recently?",
    "What are you learning about what you need on hard days?",
];

const ENCOURAGING: &[&str] = &[
    "How are you feeling right now, in just a few words?",
    "What is one thing that made you smile today?",
    "What is on your mind at the moment?",
    "Name one small thing you are grateful for today.",
];

pub fn style_for(level: ConsistencyLevel) -> PromptStyle {
    match level {
        ConsistencyLevel::Expert => PromptStyle::Reflective,
        ConsistencyLevel::Advanced => PromptStyle::Challenging,
        ConsistencyLevel::Intermediate => PromptStyle::Supportive,
        ConsistencyLevel::Beginner => PromptStyle::Encouraging,
    }
}

/// Suffix naming the part of the day, from a 0-23 hour.
pub fn time_suffix(hour: u32) -> &'static str {
    if hour < 12 {
        " (morning reflection)"
    } else if hour < 17 {
        " (afternoon check-in)"
    } else {
        " (evening reflection)"
    }
}

/// Uniformly random prompt for the tier, tagged with the part of the day.
pub fn select_prompt<R: Rng + ?Sized>(level: ConsistencyLevel, hour: u32, rng: &mut R) -> String {
    let style = style_for(level);
    let template = style.templates().choose(rng).copied().unwrap_or(ENCOURAGING[0]);
    format!("{template}{}", time_suffix(hour))
}
