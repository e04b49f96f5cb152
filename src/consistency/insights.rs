// src/consistency/insights.rs — Human-readable reading of a consistency record

use serde::Serialize;

use super::model::{ConsistencyData, ConsistencyLevel};
use super::prompts::{style_for, PromptStyle};

/// Where the account stands and what to aim for next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub pattern: &'static str,
    pub recommendation: &'static str,
    pub motivation: &'static str,
    pub next_milestone: String,
}

/// Suggested adjustments to prompts, reminders and goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub entry_frequency: &'static str,
    pub time_of_day: &'static str,
    pub prompt_style: PromptStyle,
    pub reminder_timing: &'static str,
    pub goal_adjustment: &'static str,
}

pub fn insights(data: Option<&ConsistencyData>) -> Insights {
    let Some(data) = data else {
        return Insights {
            pattern: "new_user",
            recommendation: "Start with daily reflections",
            motivation: "Every journey begins with a single step",
            next_milestone: "Complete your first entry".into(),
        };
    };

    let streak = data.current_streak;
    let level = data.consistency_level;
    Insights {
        pattern: streak_pattern(streak),
        recommendation: match level {
            ConsistencyLevel::Beginner => "Try to write at least one entry per day",
            ConsistencyLevel::Intermediate => "Consider adding a second daily reflection",
            ConsistencyLevel::Advanced => "Share your insights with the community",
            ConsistencyLevel::Expert => "Mentor others on their reflection journey",
        },
        motivation: match level {
            ConsistencyLevel::Beginner => "You're building a powerful habit",
            ConsistencyLevel::Intermediate => "Your consistency is creating positive change",
            ConsistencyLevel::Advanced => "You're becoming a reflection master",
            ConsistencyLevel::Expert => "You're inspiring others with your dedication",
        },
        next_milestone: next_milestone(level, streak),
    }
}

pub fn streak_pattern(current_streak: u32) -> &'static str {
    match current_streak {
        0 => "inactive",
        1..=2 => "starting",
        3..=6 => "building",
        7..=13 => "consistent",
        14..=29 => "dedicated",
        _ => "expert",
    }
}

pub fn next_milestone(level: ConsistencyLevel, current_streak: u32) -> String {
    match level {
        ConsistencyLevel::Beginner if current_streak == 0 => "Write your first entry".into(),
        ConsistencyLevel::Beginner => format!("Reach {} days", (current_streak + 3).min(7)),
        ConsistencyLevel::Intermediate => format!("Reach {} days", (current_streak + 7).min(14)),
        ConsistencyLevel::Advanced => format!("Reach {} days", (current_streak + 10).min(30)),
        ConsistencyLevel::Expert => format!("Maintain your {current_streak}+ day streak"),
    }
}

pub fn entry_frequency(average_per_day: f64) -> &'static str {
    if average_per_day >= 2.0 {
        "multiple_daily"
    } else if average_per_day >= 0.7 {
        "daily"
    } else if average_per_day >= 0.3 {
        "few_times_week"
    } else {
        "occasional"
    }
}

/// Part of the day the account usually writes in, from local entry hours.
pub fn time_of_day(entry_hours: &[u32]) -> &'static str {
    let avg = if entry_hours.is_empty() {
        12.0
    } else {
        entry_hours.iter().map(|h| *h as f64).sum::<f64>() / entry_hours.len() as f64
    };
    if avg < 12.0 {
        "morning"
    } else if avg < 17.0 {
        "afternoon"
    } else {
        "evening"
    }
}

pub fn recommendations(data: &ConsistencyData, entry_hours: &[u32]) -> Recommendations {
    let level = data.consistency_level;
    let time_of_day = time_of_day(entry_hours);
    Recommendations {
        entry_frequency: entry_frequency(data.average_entries_per_day),
        time_of_day,
        prompt_style: style_for(level),
        reminder_timing: match level {
            ConsistencyLevel::Beginner => "morning",
            ConsistencyLevel::Expert => "flexible",
            _ => time_of_day,
        },
        goal_adjustment: match level {
            ConsistencyLevel::Beginner => "start_small",
            ConsistencyLevel::Intermediate => "increase_gradually",
            ConsistencyLevel::Advanced => "challenge_yourself",
            ConsistencyLevel::Expert => "maintain_excellence",
        },
    }
}
