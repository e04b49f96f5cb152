// src/store/sqlite.rs — SQLite-backed sessions, consistency records and journal

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::schema;
use super::{ConsistencyStore, EntryLog, SessionStore};
use crate::consistency::{ConsistencyData, ConsistencyLevel, GoalProgress};
use crate::infra::errors::KaizenError;
use crate::journal::JournalEntry;
use crate::therapist::session::{ChatMessage, ChatRole, MoodRange};
use crate::therapist::{TherapistSession, Tone};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One connection shared by every store trait.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self, KaizenError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::run_migrations(&conn)?;
        Ok(Self::new(conn))
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, KaizenError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::run_migrations(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn load_messages(conn: &Connection, session_id: &str) -> Result<Vec<ChatMessage>, KaizenError> {
        let mut stmt = conn.prepare(
            "SELECT id, role, content, timestamp FROM chat_messages
             WHERE session_id = ?1 ORDER BY seq",
        )?;
        let rows = stmt.query_map(params![session_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut messages = Vec::new();
        for row in rows {
            let (id, role, content, timestamp) = row?;
            let role = ChatRole::parse(&role).ok_or_else(|| KaizenError::InvalidRecord {
                id: id.clone(),
                message: format!("unknown role '{role}'"),
            })?;
            let timestamp = parse_time(&id, &timestamp)?;
            messages.push(ChatMessage {
                id,
                role,
                content,
                timestamp,
            });
        }
        Ok(messages)
    }

    fn query_sessions(
        &self,
        sql: &str,
        account_id: &str,
        limit: usize,
    ) -> Result<Vec<TherapistSession>, KaizenError> {
        let conn = self.conn();
        let rows: Vec<SessionRow> = {
            let mut stmt = conn.prepare(sql)?;
            let mapped = stmt.query_map(params![account_id, limit as i64], |row| {
                Ok(SessionRow {
                    id: row.get(0)?,
                    account_id: row.get(1)?,
                    start_time: row.get(2)?,
                    end_time: row.get(3)?,
                    tone: row.get(4)?,
                    mood_start: row.get(5)?,
                    mood_end: row.get(6)?,
                })
            })?;
            let mut rows = Vec::new();
            for row in mapped {
                rows.push(row?);
            }
            rows
        };

        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            let messages = Self::load_messages(&conn, &row.id)?;
            sessions.push(row.into_session(messages)?);
        }
        Ok(sessions)
    }
}

impl SessionStore for Store {
    fn load_open_session(&self, account_id: &str) -> Result<Option<TherapistSession>, KaizenError> {
        let mut sessions = self.query_sessions(
            "SELECT id, account_id, start_time, end_time, tone, mood_start, mood_end
             FROM therapist_sessions
             WHERE account_id = ?1 AND end_time IS NULL
             ORDER BY start_time DESC, rowid DESC LIMIT ?2",
            account_id,
            1,
        )?;
        Ok(sessions.pop())
    }

    fn save_session(&self, session: &TherapistSession) -> Result<(), KaizenError> {
        let conn = self.conn();
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO therapist_sessions
                (id, account_id, start_time, end_time, tone, mood_start, mood_end)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                end_time = excluded.end_time,
                tone = excluded.tone,
                mood_start = excluded.mood_start,
                mood_end = excluded.mood_end",
            params![
                session.id,
                session.account_id,
                format_time(&session.start_time),
                session.end_time.as_ref().map(format_time),
                session.tone.as_str(),
                session.mood.start,
                session.mood.end,
            ],
        )?;
        tx.execute(
            "DELETE FROM chat_messages WHERE session_id = ?1",
            params![session.id],
        )?;
        for (seq, message) in session.messages.iter().enumerate() {
            tx.execute(
                "INSERT INTO chat_messages (id, session_id, seq, role, content, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    message.id,
                    session.id,
                    seq as i64,
                    message.role.as_str(),
                    message.content,
                    format_time(&message.timestamp),
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn list_sessions(&self, account_id: &str, limit: usize) -> Result<Vec<TherapistSession>, KaizenError> {
        self.query_sessions(
            "SELECT id, account_id, start_time, end_time, tone, mood_start, mood_end
             FROM therapist_sessions
             WHERE account_id = ?1
             ORDER BY start_time DESC, rowid DESC LIMIT ?2",
            account_id,
            limit,
        )
    }
}

impl ConsistencyStore for Store {
    fn load(&self, account_id: &str) -> Result<Option<ConsistencyData>, KaizenError> {
        let conn = self.conn();
        let row = conn
            .query_row(
                "SELECT user_id, current_streak, longest_streak, total_entries,
                        average_entries_per_day, consistency_level, last_entry_date,
                        reminder, weekly_goal, monthly_goal, weekly_progress,
                        monthly_progress, engagement_score, created_at, updated_at
                 FROM consistency WHERE user_id = ?1",
                params![account_id],
                |row| {
                    Ok(ConsistencyRow {
                        user_id: row.get(0)?,
                        current_streak: row.get(1)?,
                        longest_streak: row.get(2)?,
                        total_entries: row.get(3)?,
                        average_entries_per_day: row.get(4)?,
                        consistency_level: row.get(5)?,
                        last_entry_date: row.get(6)?,
                        reminder: row.get(7)?,
                        weekly_goal: row.get(8)?,
                        monthly_goal: row.get(9)?,
                        weekly_progress: row.get(10)?,
                        monthly_progress: row.get(11)?,
                        engagement_score: row.get(12)?,
                        created_at: row.get(13)?,
                        updated_at: row.get(14)?,
                    })
                },
            )
            .optional()?;

        row.map(ConsistencyRow::into_data).transpose()
    }

    fn save(&self, data: &ConsistencyData) -> Result<(), KaizenError> {
        let reminder = serde_json::to_string(&data.reminder)?;
        self.conn().execute(
            "INSERT INTO consistency
                (user_id, current_streak, longest_streak, total_entries,
                 average_entries_per_day, consistency_level, last_entry_date,
                 reminder, weekly_goal, monthly_goal, weekly_progress,
                 monthly_progress, engagement_score, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
             ON CONFLICT(user_id) DO UPDATE SET
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak,
                total_entries = excluded.total_entries,
                average_entries_per_day = excluded.average_entries_per_day,
                consistency_level = excluded.consistency_level,
                last_entry_date = excluded.last_entry_date,
                reminder = excluded.reminder,
                weekly_goal = excluded.weekly_goal,
                monthly_goal = excluded.monthly_goal,
                weekly_progress = excluded.weekly_progress,
                monthly_progress = excluded.monthly_progress,
                engagement_score = excluded.engagement_score,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at",
            params![
                data.user_id,
                data.current_streak,
                data.longest_streak,
                data.total_entries,
                data.average_entries_per_day,
                data.consistency_level.as_str(),
                data.last_entry_date.map(|d| d.format(DATE_FORMAT).to_string()),
                reminder,
                data.weekly_goal,
                data.monthly_goal,
                data.goal_progress.weekly,
                data.goal_progress.monthly,
                data.engagement_score,
                format_time(&data.created_at),
                format_time(&data.updated_at),
            ],
        )?;
        Ok(())
    }
}

impl EntryLog for Store {
    fn append(&self, entry: &JournalEntry) -> Result<(), KaizenError> {
        let themes = serde_json::to_string(&entry.themes)?;
        self.conn().execute(
            "INSERT INTO journal_entries (id, account_id, content, prompt, mood, themes, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id,
                entry.account_id,
                entry.content,
                entry.prompt,
                entry.mood,
                themes,
                format_time(&entry.timestamp),
            ],
        )?;
        Ok(())
    }

    fn remove(&self, entry_id: &str) -> Result<(), KaizenError> {
        self.conn()
            .execute("DELETE FROM journal_entries WHERE id = ?1", params![entry_id])?;
        Ok(())
    }

    fn entries(&self, account_id: &str) -> Result<Vec<JournalEntry>, KaizenError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, account_id, content, prompt, mood, themes, timestamp
             FROM journal_entries WHERE account_id = ?1
             ORDER BY timestamp, rowid",
        )?;
        let rows = stmt.query_map(params![account_id], |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                account_id: row.get(1)?,
                content: row.get(2)?,
                prompt: row.get(3)?,
                mood: row.get(4)?,
                themes: row.get(5)?,
                timestamp: row.get(6)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?.into_entry()?);
        }
        Ok(result)
    }

    fn entry_times_since(
        &self,
        account_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, KaizenError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, timestamp FROM journal_entries
             WHERE account_id = ?1 AND timestamp >= ?2
             ORDER BY timestamp, rowid",
        )?;
        let rows = stmt.query_map(params![account_id, format_time(&since)], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (id, timestamp) = row?;
            result.push(parse_time(&id, &timestamp)?);
        }
        Ok(result)
    }
}

/// Fixed-width UTC timestamps: exact round-trip and lexical ordering.
fn format_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_time(id: &str, s: &str) -> Result<DateTime<Utc>, KaizenError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| KaizenError::InvalidRecord {
            id: id.to_string(),
            message: format!("bad timestamp '{s}': {e}"),
        })
}

// -- Row types --

struct SessionRow {
    id: String,
    account_id: String,
    start_time: String,
    end_time: Option<String>,
    tone: String,
    mood_start: u8,
    mood_end: Option<u8>,
}

impl SessionRow {
    fn into_session(self, messages: Vec<ChatMessage>) -> Result<TherapistSession, KaizenError> {
        let tone: Tone = self.tone.parse().map_err(|_| KaizenError::InvalidRecord {
            id: self.id.clone(),
            message: format!("unknown tone '{}'", self.tone),
        })?;
        let start_time = parse_time(&self.id, &self.start_time)?;
        let end_time = self
            .end_time
            .as_deref()
            .map(|t| parse_time(&self.id, t))
            .transpose()?;

        Ok(TherapistSession {
            id: self.id,
            account_id: self.account_id,
            start_time,
            end_time,
            tone,
            mood: MoodRange {
                start: self.mood_start,
                end: self.mood_end,
            },
            messages,
        })
    }
}

struct ConsistencyRow {
    user_id: String,
    current_streak: u32,
    longest_streak: u32,
    total_entries: u32,
    average_entries_per_day: f64,
    consistency_level: String,
    last_entry_date: Option<String>,
    reminder: String,
    weekly_goal: u32,
    monthly_goal: u32,
    weekly_progress: f64,
    monthly_progress: f64,
    engagement_score: u8,
    created_at: String,
    updated_at: String,
}

impl ConsistencyRow {
    fn into_data(self) -> Result<ConsistencyData, KaizenError> {
        let invalid = |message: String| KaizenError::InvalidRecord {
            id: self.user_id.clone(),
            message,
        };
        let consistency_level = ConsistencyLevel::parse(&self.consistency_level)
            .ok_or_else(|| invalid(format!("unknown level '{}'", self.consistency_level)))?;
        let last_entry_date = match self.last_entry_date.as_deref() {
            Some(d) => Some(
                NaiveDate::parse_from_str(d, DATE_FORMAT)
                    .map_err(|e| invalid(format!("bad date '{d}': {e}")))?,
            ),
            None => None,
        };
        let reminder = serde_json::from_str(&self.reminder)?;
        let created_at = parse_time(&self.user_id, &self.created_at)?;
        let updated_at = parse_time(&self.user_id, &self.updated_at)?;

        Ok(ConsistencyData {
            user_id: self.user_id,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            total_entries: self.total_entries,
            average_entries_per_day: self.average_entries_per_day,
            consistency_level,
            last_entry_date,
            reminder,
            weekly_goal: self.weekly_goal,
            monthly_goal: self.monthly_goal,
            goal_progress: GoalProgress {
                weekly: self.weekly_progress,
                monthly: self.monthly_progress,
            },
            engagement_score: self.engagement_score,
            created_at,
            updated_at,
        })
    }
}

struct EntryRow {
    id: String,
    account_id: String,
    content: String,
    prompt: Option<String>,
    mood: Option<u8>,
    themes: String,
    timestamp: String,
}

impl EntryRow {
    fn into_entry(self) -> Result<JournalEntry, KaizenError> {
        let timestamp = parse_time(&self.id, &self.timestamp)?;
        let themes = serde_json::from_str(&self.themes)?;
        Ok(JournalEntry {
            id: self.id,
            account_id: self.account_id,
            content: self.content,
            prompt: self.prompt,
            mood: self.mood,
            timestamp,
            themes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consistency::{ReminderFrequency, ReminderSettings};
    use crate::infra::config::GoalsConfig;
    use chrono::{Duration, TimeZone};

    fn entry(account: &str, content: &str, at: DateTime<Utc>) -> JournalEntry {
        JournalEntry::new(account, content, Some(6), None, at)
    }

    #[test]
    fn test_consistency_round_trip_exact() {
        let store = Store::open_in_memory().unwrap();
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 8, 15, 30).unwrap() + Duration::nanoseconds(123_456_789);
        let mut data = ConsistencyData::new("acct", &GoalsConfig::default(), created);
        data.current_streak = 3;
        data.longest_streak = 11;
        data.total_entries = 17;
        data.average_entries_per_day = 17.0 / 3.0;
        data.consistency_level = ConsistencyLevel::Intermediate;
        data.last_entry_date = NaiveDate::from_ymd_opt(2026, 3, 4);
        data.goal_progress = GoalProgress {
            weekly: 300.0 / 7.0,
            monthly: 100.0 / 3.0,
        };
        data.engagement_score = 37;
        data.reminder = ReminderSettings {
            frequency: ReminderFrequency::Custom,
            time: "07:45".into(),
            enabled: false,
            custom_days: vec![2, 4],
            custom_times: vec![],
        };
        data.updated_at = created + Duration::days(3);

        store.save(&data).unwrap();
        let loaded = store.load("acct").unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_consistency_missing_and_upsert() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.load("nobody").unwrap().is_none());

        let mut data = store.initialize("acct", &GoalsConfig::default(), Utc::now()).unwrap();
        data.total_entries = 5;
        store.save(&data).unwrap();
        assert_eq!(store.load("acct").unwrap().unwrap().total_entries, 5);
    }

    #[test]
    fn test_session_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let now = Utc::now();
        let mut session = TherapistSession::new("acct", Tone::Cognitive, 4, now);
        session.messages.push(ChatMessage::assistant("welcome", now));
        session.messages.push(ChatMessage::user("hi", now + Duration::seconds(5)));
        store.save_session(&session).unwrap();

        let loaded = store.load_open_session("acct").unwrap().unwrap();
        assert_eq!(loaded, session);

        session.messages.push(ChatMessage::assistant("reply", now + Duration::seconds(6)));
        session.close(Some(7), now + Duration::minutes(20));
        store.save_session(&session).unwrap();
        assert!(store.load_open_session("acct").unwrap().is_none());

        let listed = store.list_sessions("acct", 5).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], session);
    }

    #[test]
    fn test_entries_ordered_and_filtered() {
        let store = Store::open_in_memory().unwrap();
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        store.append(&entry("acct", "third", base + Duration::days(2))).unwrap();
        store.append(&entry("acct", "first", base)).unwrap();
        store.append(&entry("acct", "second", base + Duration::days(1))).unwrap();
        store.append(&entry("other", "elsewhere", base)).unwrap();

        let all = store.entries("acct").unwrap();
        let contents: Vec<&str> = all.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(all[0].mood, Some(6));

        let since = store.entry_times_since("acct", base + Duration::days(1)).unwrap();
        assert_eq!(since, vec![base + Duration::days(1), base + Duration::days(2)]);
    }

    #[test]
    fn test_remove_entry() {
        let store = Store::open_in_memory().unwrap();
        let now = Utc::now();
        let kept = entry("acct", "kept", now);
        let dropped = entry("acct", "dropped", now);
        store.append(&kept).unwrap();
        store.append(&dropped).unwrap();

        store.remove(&dropped.id).unwrap();
        store.remove("no-such-entry").unwrap();
        assert_eq!(store.entries("acct").unwrap(), vec![kept]);
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kaizen.db");
        let now = Utc::now();
        {
            let store = Store::open(&path).unwrap();
            store.append(&entry("acct", "kept", now)).unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(store.entries("acct").unwrap().len(), 1);
    }
}
