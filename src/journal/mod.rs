// src/journal/mod.rs — Journal entries and the write path that scores them

pub mod trends;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::analysis::themes::extract_themes;
use crate::consistency::{ConsistencyData, ConsistencyService};
use crate::infra::errors::KaizenError;
use crate::store::EntryLog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub account_id: String,
    pub content: String,
    /// Prompt the entry answered, if any.
    pub prompt: Option<String>,
    /// 1-10.
    pub mood: Option<u8>,
    pub timestamp: DateTime<Utc>,
    pub themes: Vec<String>,
}

impl JournalEntry {
    pub fn new(
        account_id: &str,
        content: &str,
        mood: Option<u8>,
        prompt: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            content: content.to_string(),
            prompt,
            mood: mood.map(|m| m.clamp(1, 10)),
            timestamp,
            themes: extract_themes(content),
        }
    }
}

/// Records entries and keeps the account's consistency record in step.
pub struct JournalService {
    log: Arc<dyn EntryLog>,
    consistency: Arc<ConsistencyService>,
}

impl JournalService {
    pub fn new(log: Arc<dyn EntryLog>, consistency: Arc<ConsistencyService>) -> Self {
        Self { log, consistency }
    }

    /// Store a new entry, then score it against the calendar of `now`'s zone.
    pub fn record<Tz: TimeZone>(
        &self,
        account_id: &str,
        content: &str,
        mood: Option<u8>,
        prompt: Option<String>,
        now: &DateTime<Tz>,
    ) -> Result<(JournalEntry, ConsistencyData), KaizenError> {
        let entry = JournalEntry::new(account_id, content, mood, prompt, now.with_timezone(&Utc));
        let data = self.consistency.record_entry(&entry, now)?;
        tracing::info!(account = account_id, entry = %entry.id, themes = ?entry.themes, "Recorded journal entry");
        Ok((entry, data))
    }

    /// `record` on the machine's local calendar.
    pub fn record_now(
        &self,
        account_id: &str,
        content: &str,
        mood: Option<u8>,
        prompt: Option<String>,
    ) -> Result<(JournalEntry, ConsistencyData), KaizenError> {
        self.record(account_id, content, mood, prompt, &Local::now())
    }

    pub fn entries(&self, account_id: &str) -> Result<Vec<JournalEntry>, KaizenError> {
        self.log.entries(account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::GoalsConfig;
    use crate::store::Store;

    fn journal() -> JournalService {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let consistency = Arc::new(ConsistencyService::new(
            store.clone(),
            store.clone(),
            GoalsConfig::default(),
        ));
        JournalService::new(store, consistency)
    }

    #[test]
    fn test_new_entry_extracts_themes() {
        let e = JournalEntry::new("a", "Deadline at work and I can't sleep", Some(12), None, Utc::now());
        assert_eq!(e.themes, vec!["work stress", "health"]);
        assert_eq!(e.mood, Some(10));
    }

    #[test]
    fn test_record_stores_and_scores() {
        let svc = journal();
        let day1 = Utc.with_ymd_and_hms(2026, 3, 2, 21, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2026, 3, 3, 7, 0, 0).unwrap();

        let (_, data) = svc.record("a", "A good day", Some(8), None, &day1).unwrap();
        assert_eq!(data.current_streak, 1);
        let (entry, data) = svc
            .record("a", "Up early", None, Some("What is on your mind?".into()), &day2)
            .unwrap();
        assert_eq!(data.current_streak, 2);
        assert_eq!(data.total_entries, 2);

        let stored = svc.entries("a").unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1], entry);
    }
}
