// src/consistency/model.rs — Per-account consistency record

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::infra::config::GoalsConfig;

/// Ordered journaling tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ConsistencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderFrequency {
    Daily,
    TwiceDaily,
    Weekly,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub frequency: ReminderFrequency,
    /// Local wall-clock time, "HH:MM".
    pub time: String,
    pub enabled: bool,
    /// Days of week for `Custom`, 0 = Sunday.
    #[serde(default)]
    pub custom_days: Vec<u8>,
    /// Times of day for `TwiceDaily`, "HH:MM".
    #[serde(default)]
    pub custom_times: Vec<String>,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            frequency: ReminderFrequency::Daily,
            time: "09:00".into(),
            enabled: true,
            custom_days: Vec::new(),
            custom_times: Vec::new(),
        }
    }
}

/// Percent of the weekly and monthly entry goals reached, 0-100, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GoalProgress {
    pub weekly: f64,
    pub monthly: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyData {
    pub user_id: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_entries: u32,
    pub average_entries_per_day: f64,
    pub consistency_level: ConsistencyLevel,
    /// Local calendar day of the most recent entry.
    pub last_entry_date: Option<NaiveDate>,
    pub reminder: ReminderSettings,
    pub weekly_goal: u32,
    pub monthly_goal: u32,
    pub goal_progress: GoalProgress,
    /// 0-100.
    pub engagement_score: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConsistencyData {
    /// Fresh record: beginner, every counter at zero.
    pub fn new(user_id: &str, goals: &GoalsConfig, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            current_streak: 0,
            longest_streak: 0,
            total_entries: 0,
            average_entries_per_day: 0.0,
            consistency_level: ConsistencyLevel::Beginner,
            last_entry_date: None,
            reminder: ReminderSettings::default(),
            weekly_goal: goals.weekly,
            monthly_goal: goals.monthly,
            goal_progress: GoalProgress::default(),
            engagement_score: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
