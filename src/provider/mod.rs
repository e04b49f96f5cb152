// src/provider/mod.rs — Optional external completion layer

pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::infra::config::ProviderConfig;
use crate::infra::errors::KaizenError;
use crate::therapist::context::ConversationContext;
use crate::therapist::session::ChatRole;
use crate::therapist::tone::Tone;

/// A service that can write the assistant's next reply.
#[async_trait]
pub trait ExternalCompletionProvider: Send + Sync {
    fn id(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, KaizenError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub messages: Vec<CompletionMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Tone-framed request quoting the recent conversation.
    pub fn for_turn(ctx: &ConversationContext, config: &ProviderConfig) -> Self {
        let mut messages: Vec<CompletionMessage> = ctx
            .framing
            .iter()
            .map(|m| CompletionMessage {
                role: m.role,
                content: m.content.clone(),
            })
            .collect();
        messages.push(CompletionMessage {
            role: ChatRole::User,
            content: ctx.latest_user_message.clone(),
        });

        Self {
            model: config.model.clone(),
            system: system_prompt(ctx.tone).to_string(),
            messages,
            temperature: Some(config.temperature),
            max_tokens: Some(config.max_tokens),
        }
    }
}

pub fn system_prompt(tone: Tone) -> &'static str {
    match tone {
        Tone::Empathetic => "You are a compassionate, empathetic therapist. Respond with warmth and understanding. Provide a caring, supportive response under 100 words.",
        Tone::Honest => "You are a direct and honest therapist. Give straightforward feedback. Provide honest, direct guidance under 100 words.",
        Tone::Cognitive => "You are a cognitive-behavioral therapist. Help analyze the thoughts and behaviors the user describes. Provide structured, educational guidance under 100 words.",
        Tone::Solution => "You are a solution-focused therapist. Help the user find solutions. Provide action-oriented, goal-focused guidance under 100 words.",
    }
}

/// Wraps a provider so a chat turn can never fail or hang because of it.
///
/// Timeouts, errors and unusably short replies all come back as `None`.
pub struct GuardedProvider {
    inner: Arc<dyn ExternalCompletionProvider>,
    timeout: Duration,
    min_reply_chars: usize,
}

impl GuardedProvider {
    pub fn new(inner: Arc<dyn ExternalCompletionProvider>, timeout: Duration, min_reply_chars: usize) -> Self {
        Self {
            inner,
            timeout,
            min_reply_chars,
        }
    }

    pub fn from_config(inner: Arc<dyn ExternalCompletionProvider>, config: &ProviderConfig) -> Self {
        Self::new(
            inner,
            Duration::from_secs(config.timeout_seconds),
            config.min_reply_chars,
        )
    }

    pub fn id(&self) -> &str {
        self.inner.id()
    }

    pub async fn reply(&self, request: &CompletionRequest) -> Option<String> {
        let provider = self.inner.id().to_string();
        let outcome = match tokio::time::timeout(self.timeout, self.inner.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(KaizenError::ProviderTimeout {
                provider: provider.clone(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        };

        match outcome {
            Ok(raw) => {
                let cleaned = clean_response(&raw);
                if cleaned.chars().count() < self.min_reply_chars {
                    tracing::warn!(provider = %provider, chars = cleaned.chars().count(), "Completion too short, using local reply");
                    None
                } else {
                    Some(cleaned)
                }
            }
            Err(e) if e.is_provider_failure() => {
                tracing::warn!(provider = %provider, "Completion failed, using local reply: {}", e);
                None
            }
            Err(e) => {
                tracing::error!(provider = %provider, "Unexpected completion error, using local reply: {}", e);
                None
            }
        }
    }
}

const PREAMBLES: &[&str] = &["you are", "as an ai", "i am"];

/// Collapse whitespace, drop a leading self-description sentence and make
/// sure the reply ends with punctuation.
pub fn clean_response(raw: &str) -> String {
    let mut text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let lower = text.to_lowercase();
    if PREAMBLES.iter().any(|p| lower.starts_with(p)) {
        if let Some(end) = text.find('.') {
            text = text[end + 1..].trim().to_string();
        }
    }

    if !text.is_empty() && !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text
}
