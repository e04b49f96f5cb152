// src/therapist/context.rs — Per-turn conversation snapshot

use chrono::{DateTime, Utc};

use super::session::{ChatMessage, ChatRole, TherapistSession};
use super::tone::Tone;
use crate::analysis::lexicon::{self, Emotion, Topic, Urgency};
use crate::infra::config::ChatConfig;

/// Everything the selection policy needs to answer one user message.
///
/// Rebuilt on every turn and never persisted.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    /// Recent messages, oldest first, ending with the latest user message.
    pub messages: Vec<ChatMessage>,
    pub latest_user_message: String,
    pub tone: Tone,
    pub session_duration_minutes: i64,
    pub user_mood: u8,
    pub emotional_state: Emotion,
    pub urgency: Urgency,
    pub detected_topics: Vec<Topic>,
    pub is_first_message: bool,
    pub has_been_responding: bool,
    /// Most recent assistant replies, oldest first.
    pub recent_assistant: Vec<String>,
    /// Prior messages quoted when framing an external completion prompt.
    pub framing: Vec<ChatMessage>,
}

impl ConversationContext {
    pub fn message_chars(&self) -> usize {
        self.latest_user_message.chars().count()
    }
}

/// Builds [`ConversationContext`] snapshots with configurable window sizes.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    window: usize,
    framing_window: usize,
    repeat_lookback: usize,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::from_config(&ChatConfig::default())
    }
}

impl ContextBuilder {
    pub fn new(window: usize, framing_window: usize, repeat_lookback: usize) -> Self {
        Self {
            window,
            framing_window,
            repeat_lookback,
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(
            config.context_window,
            config.framing_window,
            config.repeat_lookback,
        )
    }

    /// Snapshot `session` as it stands before `latest` is appended to it.
    pub fn build(
        &self,
        session: &TherapistSession,
        latest: &str,
        now: DateTime<Utc>,
        user_mood: u8,
    ) -> ConversationContext {
        let prior = &session.messages;
        let detection = lexicon::detect(latest);

        let mut messages = tail(prior, self.window.saturating_sub(1)).to_vec();
        messages.push(ChatMessage::user(latest, now));

        let recent_assistant: Vec<String> = {
            let mut replies: Vec<String> = prior
                .iter()
                .rev()
                .filter(|m| m.role == ChatRole::Assistant)
                .take(self.repeat_lookback)
                .map(|m| m.content.clone())
                .collect();
            replies.reverse();
            replies
        };

        ConversationContext {
            messages,
            latest_user_message: latest.to_string(),
            tone: session.tone,
            session_duration_minutes: session.duration_minutes(now),
            user_mood: user_mood.clamp(1, 10),
            emotional_state: detection.emotion,
            urgency: detection.urgency,
            detected_topics: detection.topics,
            is_first_message: prior.is_empty(),
            has_been_responding: prior.iter().any(|m| m.role == ChatRole::Assistant),
            recent_assistant,
            framing: tail(prior, self.framing_window).to_vec(),
        }
    }
}

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
