// src/therapist/service.rs — One chat turn, end to end

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::context::ContextBuilder;
use super::policy::ResponsePolicy;
use super::session::{SessionManager, TherapistSession};
use super::tone::Tone;
use crate::infra::config::{ChatConfig, ProviderConfig};
use crate::infra::errors::KaizenError;
use crate::provider::{CompletionRequest, GuardedProvider};
use crate::store::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Provider,
    Templates,
}

#[derive(Debug, Clone)]
pub struct Turn {
    pub reply: String,
    pub source: ReplySource,
    pub session_id: String,
}

/// Answers user messages inside the account's open session.
///
/// The external provider, when configured, is asked first; any failure falls
/// through to the local template policy. Nothing is saved until a reply exists.
///
/// Turns for one account run one at a time, so a turn never saves over a
/// session another turn changed while waiting on the provider. Other
/// processes writing the same session are not coordinated.
pub struct ChatService {
    sessions: SessionManager,
    context: ContextBuilder,
    policy: Mutex<ResponsePolicy>,
    provider: Option<GuardedProvider>,
    provider_config: ProviderConfig,
    default_tone: Tone,
    turns: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ChatService {
    pub fn new(store: Arc<dyn SessionStore>, chat: &ChatConfig) -> Self {
        Self::with_policy(store, chat, ResponsePolicy::new(chat.clone()))
    }

    pub fn with_policy(store: Arc<dyn SessionStore>, chat: &ChatConfig, policy: ResponsePolicy) -> Self {
        Self {
            sessions: SessionManager::new(store),
            context: ContextBuilder::from_config(chat),
            policy: Mutex::new(policy),
            provider: None,
            provider_config: ProviderConfig::default(),
            default_tone: chat.default_tone,
            turns: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_provider(mut self, provider: GuardedProvider, config: ProviderConfig) -> Self {
        self.provider = Some(provider);
        self.provider_config = config;
        self
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Open session of the account. An explicit `tone` starts a new session
    /// in that tone, or switches the open one to it.
    pub fn session(
        &self,
        account_id: &str,
        tone: Option<Tone>,
        mood: u8,
        now: DateTime<Utc>,
    ) -> Result<TherapistSession, KaizenError> {
        let session = self.sessions.resume_or_start(
            account_id,
            tone.unwrap_or(self.default_tone),
            mood,
            now,
        )?;
        match tone {
            Some(tone) if tone != session.tone => {
                Ok(self.sessions.set_tone(account_id, tone)?.unwrap_or(session))
            }
            _ => Ok(session),
        }
    }

    pub async fn respond(
        &self,
        account_id: &str,
        text: &str,
        mood: u8,
        now: DateTime<Utc>,
    ) -> Result<Turn, KaizenError> {
        let lock = {
            let mut turns = self.turns.lock().unwrap_or_else(|e| e.into_inner());
            turns
                .entry(account_id.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };

        let result = {
            let _turn = lock.lock().await;
            self.answer(account_id, text, mood, now).await
        };

        let mut turns = self.turns.lock().unwrap_or_else(|e| e.into_inner());
        let idle = Arc::strong_count(&lock) == 2;
        drop(lock);
        if idle {
            turns.remove(account_id);
        }
        result
    }

    async fn answer(
        &self,
        account_id: &str,
        text: &str,
        mood: u8,
        now: DateTime<Utc>,
    ) -> Result<Turn, KaizenError> {
        let mut session = self
            .sessions
            .resume_or_start(account_id, self.default_tone, mood, now)?;
        let ctx = self.context.build(&session, text, now, mood);

        let mut external = None;
        if !ctx.is_first_message {
            if let Some(provider) = &self.provider {
                let request = CompletionRequest::for_turn(&ctx, &self.provider_config);
                external = provider.reply(&request).await;
            }
        }

        let (reply, source) = match external {
            Some(reply) => (reply, ReplySource::Provider),
            None => {
                let mut policy = self.policy.lock().unwrap_or_else(|e| e.into_inner());
                (policy.select_response(&ctx), ReplySource::Templates)
            }
        };

        self.sessions.append_turn(&mut session, text, &reply, now)?;
        tracing::debug!(account = account_id, session = %session.id, source = ?source, "Answered chat turn");

        Ok(Turn {
            reply,
            source,
            session_id: session.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::therapist::templates;
    use chrono::Duration;

    fn service() -> (ChatService, Arc<Store>) {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let chat = ChatConfig::default();
        let policy = ResponsePolicy::with_seed(chat.clone(), 7);
        (ChatService::with_policy(store.clone(), &chat, policy), store)
    }

    #[tokio::test]
    async fn test_turn_persists_user_and_reply() {
        let (svc, store) = service();
        let now = Utc::now();
        let turn = svc.respond("a", "I went for a walk", 6, now).await.unwrap();
        assert_eq!(turn.source, ReplySource::Templates);
        assert!(!turn.reply.is_empty());

        let session = store.load_open_session("a").unwrap().unwrap();
        assert_eq!(session.id, turn.session_id);
        // welcome, user, reply
        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.messages[0].content, templates::welcome_for(Tone::Empathetic));
        assert_eq!(session.messages[1].content, "I went for a walk");
        assert_eq!(session.messages[2].content, turn.reply);
    }

    #[tokio::test]
    async fn test_turns_share_session() {
        let (svc, store) = service();
        let now = Utc::now();
        let first = svc.respond("a", "hello", 5, now).await.unwrap();
        let second = svc
            .respond("a", "still here", 5, now + Duration::minutes(6))
            .await
            .unwrap();
        assert_eq!(first.session_id, second.session_id);
        assert_eq!(store.load_open_session("a").unwrap().unwrap().messages.len(), 5);
    }

    #[tokio::test]
    async fn test_turn_locks_released() {
        let (svc, _) = service();
        let now = Utc::now();
        svc.respond("a", "hello", 5, now).await.unwrap();
        svc.respond("b", "hello", 5, now).await.unwrap();
        assert!(svc.turns.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_switches_tone() {
        let (svc, _) = service();
        let now = Utc::now();
        svc.session("a", None, 5, now).unwrap();
        let s = svc.session("a", Some(Tone::Honest), 5, now).unwrap();
        assert_eq!(s.tone, Tone::Honest);
    }
}
