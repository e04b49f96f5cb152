// src/analysis/mod.rs — Keyword-based text analysis

pub mod lexicon;
pub mod similarity;
pub mod themes;

pub use lexicon::{detect, Detection, Emotion, Topic, Urgency};
