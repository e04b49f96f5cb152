// src/therapist/session.rs — Therapist sessions and their lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::templates;
use super::tone::Tone;
use crate::infra::errors::KaizenError;
use crate::store::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: ChatRole::User,
            content: content.into(),
            timestamp,
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodRange {
    pub start: u8,
    pub end: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapistSession {
    pub id: String,
    pub account_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub tone: Tone,
    pub mood: MoodRange,
    pub messages: Vec<ChatMessage>,
}

impl TherapistSession {
    pub fn new(account_id: &str, tone: Tone, mood_start: u8, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            start_time: now,
            end_time: None,
            tone,
            mood: MoodRange {
                start: mood_start.clamp(1, 10),
                end: None,
            },
            messages: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Whole minutes since the session started; clock skew counts as zero.
    pub fn duration_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_time).num_minutes().max(0)
    }

    pub fn close(&mut self, mood_end: Option<u8>, now: DateTime<Utc>) {
        self.end_time = Some(now);
        if let Some(mood) = mood_end {
            self.mood.end = Some(mood.clamp(1, 10));
        }
    }
}

/// Creates, resumes and closes sessions for an account.
///
/// At most one session per account is left open: starting a new session
/// closes every session that is still open.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Start a fresh session greeted with the tone's welcome message.
    pub fn start_session(
        &self,
        account_id: &str,
        tone: Tone,
        mood_start: u8,
        now: DateTime<Utc>,
    ) -> Result<TherapistSession, KaizenError> {
        let closed = self.close_open_sessions(account_id, None, now)?;
        if closed > 0 {
            tracing::info!(account = account_id, closed, "Closed open session(s) before starting a new one");
        }

        let mut session = TherapistSession::new(account_id, tone, mood_start, now);
        session
            .messages
            .push(ChatMessage::assistant(templates::welcome_for(tone), now));
        self.store.save_session(&session)?;

        tracing::info!(account = account_id, session = %session.id, tone = %tone, "Started therapist session");
        Ok(session)
    }

    /// Continue the open session, or start one if none is open.
    pub fn resume_or_start(
        &self,
        account_id: &str,
        tone: Tone,
        mood_start: u8,
        now: DateTime<Utc>,
    ) -> Result<TherapistSession, KaizenError> {
        match self.store.load_open_session(account_id)? {
            Some(session) => {
                tracing::debug!(account = account_id, session = %session.id, "Resuming open session");
                Ok(session)
            }
            None => self.start_session(account_id, tone, mood_start, now),
        }
    }

    /// Close the open session. Returns it, or `None` if nothing was open.
    pub fn end_session(
        &self,
        account_id: &str,
        mood_end: Option<u8>,
        now: DateTime<Utc>,
    ) -> Result<Option<TherapistSession>, KaizenError> {
        let Some(mut session) = self.store.load_open_session(account_id)? else {
            return Ok(None);
        };
        session.close(mood_end, now);
        self.store.save_session(&session)?;
        // Legacy data may hold more than one open session
        self.close_open_sessions(account_id, mood_end, now)?;

        tracing::info!(account = account_id, session = %session.id, "Ended therapist session");
        Ok(Some(session))
    }

    /// Switch the tone of the open session.
    pub fn set_tone(&self, account_id: &str, tone: Tone) -> Result<Option<TherapistSession>, KaizenError> {
        let Some(mut session) = self.store.load_open_session(account_id)? else {
            return Ok(None);
        };
        session.tone = tone;
        self.store.save_session(&session)?;
        Ok(Some(session))
    }

    /// Append one user message and its reply, then persist both together.
    pub fn append_turn(
        &self,
        session: &mut TherapistSession,
        user_text: &str,
        reply: &str,
        now: DateTime<Utc>,
    ) -> Result<(), KaizenError> {
        session.messages.push(ChatMessage::user(user_text, now));
        session.messages.push(ChatMessage::assistant(reply, now));
        self.store.save_session(session)
    }

    pub fn history(&self, account_id: &str, limit: usize) -> Result<Vec<TherapistSession>, KaizenError> {
        self.store.list_sessions(account_id, limit)
    }

    fn close_open_sessions(
        &self,
        account_id: &str,
        mood_end: Option<u8>,
        now: DateTime<Utc>,
    ) -> Result<usize, KaizenError> {
        let mut closed = 0;
        while let Some(mut open) = self.store.load_open_session(account_id)? {
            open.close(mood_end, now);
            self.store.save_session(&open)?;
            closed += 1;
        }
        Ok(closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use chrono::Duration;

    fn manager() -> (SessionManager, Arc<Store>) {
        let store = Arc::new(Store::open_in_memory().unwrap());
        (SessionManager::new(store.clone()), store)
    }

    #[test]
    fn test_start_session_has_welcome() {
        let (mgr, _) = manager();
        let session = mgr.start_session("a", Tone::Honest, 6, Utc::now()).unwrap();
        assert!(session.is_open());
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, ChatRole::Assistant);
        assert_eq!(session.messages[0].content, templates::welcome_for(Tone::Honest));
    }

    #[test]
    fn test_resume_returns_open_session() {
        let (mgr, _) = manager();
        let now = Utc::now();
        let first = mgr.start_session("a", Tone::Empathetic, 5, now).unwrap();
        let resumed = mgr
            .resume_or_start("a", Tone::Solution, 5, now + Duration::minutes(1))
            .unwrap();
        assert_eq!(resumed.id, first.id);
        assert_eq!(resumed.tone, Tone::Empathetic);
    }

    #[test]
    fn test_resume_starts_when_none_open() {
        let (mgr, store) = manager();
        let now = Utc::now();
        let first = mgr.start_session("a", Tone::Empathetic, 5, now).unwrap();
        mgr.end_session("a", Some(7), now).unwrap();

        let next = mgr.resume_or_start("a", Tone::Solution, 5, now).unwrap();
        assert_ne!(next.id, first.id);
        assert_eq!(next.tone, Tone::Solution);
        assert!(store.load_open_session("a").unwrap().is_some());
    }

    #[test]
    fn test_new_session_closes_previous() {
        let (mgr, store) = manager();
        let now = Utc::now();
        let first = mgr.start_session("a", Tone::Empathetic, 5, now).unwrap();
        let second = mgr
            .start_session("a", Tone::Cognitive, 5, now + Duration::minutes(5))
            .unwrap();

        let open = store.load_open_session("a").unwrap().unwrap();
        assert_eq!(open.id, second.id);

        let all = mgr.history("a", 10).unwrap();
        let old = all.iter().find(|s| s.id == first.id).unwrap();
        assert!(!old.is_open());
    }

    #[test]
    fn test_end_session_records_mood() {
        let (mgr, _) = manager();
        let now = Utc::now();
        mgr.start_session("a", Tone::Empathetic, 3, now).unwrap();
        let ended = mgr.end_session("a", Some(8), now).unwrap().unwrap();
        assert_eq!(ended.mood.start, 3);
        assert_eq!(ended.mood.end, Some(8));
        assert!(mgr.end_session("a", None, now).unwrap().is_none());
    }

    #[test]
    fn test_append_turn_saves_both() {
        let (mgr, store) = manager();
        let now = Utc::now();
        let mut session = mgr.start_session("a", Tone::Empathetic, 5, now).unwrap();
        mgr.append_turn(&mut session, "hi", "hello there", now).unwrap();

        let loaded = store.load_open_session("a").unwrap().unwrap();
        assert_eq!(loaded.messages.len(), 3);
        assert_eq!(loaded.messages[1].role, ChatRole::User);
        assert_eq!(loaded.messages[2].content, "hello there");
    }

    #[test]
    fn test_accounts_are_independent() {
        let (mgr, store) = manager();
        let now = Utc::now();
        mgr.start_session("a", Tone::Empathetic, 5, now).unwrap();
        mgr.start_session("b", Tone::Honest, 5, now).unwrap();
        assert!(store.load_open_session("a").unwrap().is_some());
        assert!(store.load_open_session("b").unwrap().is_some());
    }
}
