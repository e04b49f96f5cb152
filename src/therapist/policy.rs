// src/therapist/policy.rs — Reply selection state machine
//
// One decision per turn: welcome on the first message, otherwise pick a
// category, draw a template that does not repeat recent replies, tailor it to
// the detected emotion/urgency/topic and maybe add a follow-up question.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::context::ConversationContext;
use super::templates;
use super::tone::Category;
use crate::analysis::lexicon::{Emotion, Urgency};
use crate::analysis::similarity::word_overlap;
use crate::infra::config::ChatConfig;

const INTERROGATIVES: &[&str] = &["what", "how", "why"];

/// A composed reply and how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// `None` for the welcome message and the static fallback.
    pub category: Option<Category>,
    pub follow_up: Option<&'static str>,
}

/// Chooses the local template reply for a turn.
pub struct ResponsePolicy {
    config: ChatConfig,
    rng: StdRng,
}

impl ResponsePolicy {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic policy for tests and reproducible sessions.
    pub fn with_seed(config: ChatConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn select_response(&mut self, ctx: &ConversationContext) -> String {
        self.compose(ctx).text
    }

    pub fn compose(&mut self, ctx: &ConversationContext) -> Reply {
        if ctx.is_first_message {
            return Reply {
                text: templates::welcome_for(ctx.tone).to_string(),
                category: None,
                follow_up: None,
            };
        }

        let category = self.decide_category(ctx);
        let pool = self.candidates(ctx, category);

        let Some(template) = pool.choose(&mut self.rng).copied() else {
            tracing::warn!(tone = %ctx.tone, category = category.as_str(), "Empty template pool, using fallback");
            return Reply {
                text: templates::fallback_for(ctx.tone).to_string(),
                category: None,
                follow_up: None,
            };
        };

        let mut text = personalize(template, ctx);

        let follow_up = if self.should_follow_up(ctx, category) {
            templates::follow_ups_for(ctx.tone).choose(&mut self.rng).copied()
        } else {
            None
        };
        if let Some(question) = follow_up {
            text.push(' ');
            text.push_str(question);
        }

        tracing::debug!(
            tone = %ctx.tone,
            category = category.as_str(),
            emotion = ctx.emotional_state.as_str(),
            urgency = ctx.urgency.as_str(),
            follow_up = follow_up.is_some(),
            "Selected reply"
        );

        Reply {
            text,
            category: Some(category),
            follow_up,
        }
    }

    /// Reply category for a non-first turn. Earlier rules win.
    pub fn decide_category(&self, ctx: &ConversationContext) -> Category {
        if ctx.session_duration_minutes < self.config.rapport_minutes {
            return Category::Acknowledgment;
        }
        if ctx.emotional_state == Emotion::Negative || ctx.urgency == Urgency::High {
            return Category::Acknowledgment;
        }
        if is_question(&ctx.latest_user_message) {
            return Category::Question;
        }
        if ctx.message_chars() >= self.config.long_message_chars {
            return Category::Question;
        }
        Category::Reflection
    }

    /// Templates not too similar to a recent reply; all of them if none survive.
    fn candidates(&self, ctx: &ConversationContext, category: Category) -> Vec<&'static str> {
        let all = templates::templates_for(ctx.tone, category);
        let fresh: Vec<&'static str> = all
            .iter()
            .copied()
            .filter(|t| {
                !ctx.recent_assistant
                    .iter()
                    .any(|used| word_overlap(t, used) > self.config.similarity_threshold)
            })
            .collect();

        if fresh.is_empty() {
            tracing::debug!(tone = %ctx.tone, category = category.as_str(), "All templates used recently, allowing repeats");
            all.to_vec()
        } else {
            fresh
        }
    }

    fn should_follow_up(&mut self, ctx: &ConversationContext, category: Category) -> bool {
        if category == Category::Question {
            return false;
        }
        if ctx.session_duration_minutes < self.config.follow_up_after_minutes {
            return false;
        }
        self.rng
            .gen_bool(self.config.follow_up_probability.clamp(0.0, 1.0))
    }
}

fn is_question(message: &str) -> bool {
    if message.contains('?') {
        return true;
    }
    message
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| INTERROGATIVES.iter().any(|q| word.eq_ignore_ascii_case(q)))
}

/// Tailor a template to the detected emotion, urgency and first topic.
fn personalize(template: &str, ctx: &ConversationContext) -> String {
    let mut text = template.to_string();

    if ctx.emotional_state == Emotion::Negative {
        text = text
            .replace("challenging", "really difficult")
            .replace("situation", "what you're going through");
    }

    if ctx.urgency == Urgency::High {
        text = text.replace("this", "this urgent situation");
    }

    if let Some(topic) = ctx.detected_topics.first() {
        if !text.to_lowercase().contains(topic.mention()) {
            text.push(' ');
            text.push_str(topic.sentence());
        }
    }

    text
}
