// src/consistency/service.rs — Serialized read-modify-write of consistency records

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::model::{ConsistencyData, ReminderSettings};
use super::reminders::is_valid_time;
use super::scoring;
use crate::infra::config::GoalsConfig;
use crate::infra::errors::KaizenError;
use crate::journal::JournalEntry;
use crate::store::{ConsistencyStore, EntryLog};

/// Owns every write to the consistency records.
///
/// Updates for one account never interleave: each account has its own lock,
/// held across load, recompute and save.
pub struct ConsistencyService {
    store: Arc<dyn ConsistencyStore>,
    entries: Arc<dyn EntryLog>,
    goals: GoalsConfig,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ConsistencyService {
    pub fn new(store: Arc<dyn ConsistencyStore>, entries: Arc<dyn EntryLog>, goals: GoalsConfig) -> Self {
        Self {
            store,
            entries,
            goals,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` holding the account's lock. The lock entry is dropped from
    /// the map once no other caller holds or waits on it.
    fn with_account_lock<T>(&self, account_id: &str, f: impl FnOnce() -> T) -> T {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks
                .entry(account_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        let result = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            f()
        };

        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // Map and this call are the only holders. Release ours while the map
        // is locked so the last caller out always sees a count of two.
        let idle = Arc::strong_count(&lock) == 2;
        drop(lock);
        if idle {
            locks.remove(account_id);
        }
        result
    }

    /// Stored record, without creating one.
    pub fn get(&self, account_id: &str) -> Result<Option<ConsistencyData>, KaizenError> {
        self.store.load(account_id)
    }

    pub fn load_or_init(&self, account_id: &str, now: DateTime<Utc>) -> Result<ConsistencyData, KaizenError> {
        match self.store.load(account_id)? {
            Some(data) => Ok(data),
            None => {
                tracing::info!(account = account_id, "Initializing consistency record");
                self.store.initialize(account_id, &self.goals, now)
            }
        }
    }

    /// Append `entry` to the entry log and apply it, under the account lock.
    ///
    /// If the record cannot be updated the entry is taken back out of the
    /// log, so a retry counts it once.
    pub fn record_entry<Tz: TimeZone>(
        &self,
        entry: &JournalEntry,
        now: &DateTime<Tz>,
    ) -> Result<ConsistencyData, KaizenError> {
        let account_id = entry.account_id.as_str();
        self.with_account_lock(account_id, || {
            self.entries.append(entry)?;
            match self.apply_entry(account_id, now) {
                Ok(data) => Ok(data),
                Err(e) => {
                    tracing::warn!(account = account_id, entry = %entry.id, "Consistency update failed, removing entry: {}", e);
                    if let Err(undo) = self.entries.remove(&entry.id) {
                        tracing::error!(entry = %entry.id, "Could not remove entry: {}", undo);
                    }
                    Err(e)
                }
            }
        })
    }

    /// Apply a journal entry that has already been appended to the entry log.
    ///
    /// `now` carries the local time zone that defines calendar days.
    pub fn on_new_entry<Tz: TimeZone>(
        &self,
        account_id: &str,
        now: &DateTime<Tz>,
    ) -> Result<ConsistencyData, KaizenError> {
        self.with_account_lock(account_id, || self.apply_entry(account_id, now))
    }

    fn apply_entry<Tz: TimeZone>(
        &self,
        account_id: &str,
        now: &DateTime<Tz>,
    ) -> Result<ConsistencyData, KaizenError> {
        let now_utc = now.with_timezone(&Utc);
        let mut data = self.load_or_init(account_id, now_utc)?;
        let entry_times = self.entries.entry_times_since(account_id, window_start(now))?;

        scoring::on_new_entry(&mut data, now, &entry_times);
        self.store.save(&data)?;

        tracing::debug!(
            account = account_id,
            streak = data.current_streak,
            total = data.total_entries,
            level = %data.consistency_level,
            score = data.engagement_score,
            "Updated consistency"
        );
        Ok(data)
    }

    /// Replace the reminder settings. Derived fields are left alone.
    pub fn update_reminders(
        &self,
        account_id: &str,
        settings: ReminderSettings,
        now: DateTime<Utc>,
    ) -> Result<ConsistencyData, KaizenError> {
        let mut times = std::iter::once(&settings.time).chain(settings.custom_times.iter());
        if let Some(bad) = times.find(|t| !is_valid_time(t)) {
            return Err(KaizenError::Config(format!("invalid reminder time '{bad}', expected HH:MM")));
        }
        if let Some(bad) = settings.custom_days.iter().find(|d| **d > 6) {
            return Err(KaizenError::Config(format!("invalid reminder day {bad}, expected 0-6")));
        }

        self.with_account_lock(account_id, || {
            let mut data = self.load_or_init(account_id, now)?;
            data.reminder = settings;
            data.updated_at = now;
            self.store.save(&data)?;
            Ok(data)
        })
    }

    /// Change the entry goals and refresh goal progress against them.
    pub fn update_goals<Tz: TimeZone>(
        &self,
        account_id: &str,
        weekly: u32,
        monthly: u32,
        now: &DateTime<Tz>,
    ) -> Result<ConsistencyData, KaizenError> {
        self.with_account_lock(account_id, || {
            let now_utc = now.with_timezone(&Utc);
            let mut data = self.load_or_init(account_id, now_utc)?;
            let entry_times = self.entries.entry_times_since(account_id, window_start(now))?;

            data.weekly_goal = weekly;
            data.monthly_goal = monthly;
            data.goal_progress = scoring::goal_progress(now, &entry_times, weekly, monthly);
            data.updated_at = now_utc;
            self.store.save(&data)?;
            Ok(data)
        })
    }
}

/// Earliest instant that can fall in the current local week or month.
///
/// One day of slack covers any UTC offset; scoring filters by local date.
fn window_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let today = now.date_naive();
    let earliest = scoring::week_start(today).min(scoring::month_start(today)) - Duration::days(1);
    earliest
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or_else(|| now.with_timezone(&Utc) - Duration::days(32))
}
