// src/store/mod.rs — Persistence seams and the SQLite implementation

pub mod schema;
pub mod sqlite;

use chrono::{DateTime, Utc};

use crate::consistency::ConsistencyData;
use crate::infra::config::GoalsConfig;
use crate::infra::errors::KaizenError;
use crate::journal::JournalEntry;
use crate::therapist::TherapistSession;

pub use sqlite::Store;

/// Therapist sessions, messages included.
pub trait SessionStore: Send + Sync {
    /// Newest session of the account that has no end time.
    fn load_open_session(&self, account_id: &str) -> Result<Option<TherapistSession>, KaizenError>;

    /// Insert or replace the session and its full message list.
    fn save_session(&self, session: &TherapistSession) -> Result<(), KaizenError>;

    /// Most recent sessions first.
    fn list_sessions(&self, account_id: &str, limit: usize) -> Result<Vec<TherapistSession>, KaizenError>;
}

/// One consistency record per account.
pub trait ConsistencyStore: Send + Sync {
    fn load(&self, account_id: &str) -> Result<Option<ConsistencyData>, KaizenError>;

    fn save(&self, data: &ConsistencyData) -> Result<(), KaizenError>;

    /// Save and return a fresh record for the account.
    fn initialize(
        &self,
        account_id: &str,
        goals: &GoalsConfig,
        now: DateTime<Utc>,
    ) -> Result<ConsistencyData, KaizenError> {
        let data = ConsistencyData::new(account_id, goals, now);
        self.save(&data)?;
        Ok(data)
    }
}

/// Journal entry log. Entries are only appended, except when a write is
/// rolled back.
pub trait EntryLog: Send + Sync {
    fn append(&self, entry: &JournalEntry) -> Result<(), KaizenError>;

    /// Take back an appended entry. Removing an unknown id is not an error.
    fn remove(&self, entry_id: &str) -> Result<(), KaizenError>;

    /// All entries of the account, oldest first.
    fn entries(&self, account_id: &str) -> Result<Vec<JournalEntry>, KaizenError>;

    /// Timestamps of entries at or after `since`, oldest first.
    fn entry_times_since(
        &self,
        account_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, KaizenError>;
}
