// src/cli/status.rs — Consistency status, reminders and goals

use chrono::{Local, Timelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::app::App;
use super::FrequencyArg;
use crate::consistency::{insights, reminders, ReminderFrequency, ReminderSettings};
use crate::infra::paths;

pub fn show_status(app: &App, verbose: bool) -> anyhow::Result<()> {
    println!("kaizen v{} | account: {}", env!("CARGO_PKG_VERSION"), app.account);
    println!();

    let Some(data) = app.consistency.get(&app.account)? else {
        let i = insights::insights(None);
        println!("  No entries yet. {}.", i.motivation);
        println!("  Next:       {}", i.next_milestone);
        return Ok(());
    };

    println!("  Level:      {}", data.consistency_level);
    println!(
        "  Streak:     {} day(s), best {}",
        data.current_streak, data.longest_streak
    );
    println!(
        "  Entries:    {} total, {:.2}/day",
        data.total_entries, data.average_entries_per_day
    );
    println!("  Engagement: {}/100", data.engagement_score);
    println!(
        "  Goals:      week {:.1}% of {} | month {:.1}% of {}",
        data.goal_progress.weekly, data.weekly_goal, data.goal_progress.monthly, data.monthly_goal
    );

    let i = insights::insights(Some(&data));
    println!("  Pattern:    {}", i.pattern);
    println!("  Next:       {}", i.next_milestone);

    if verbose {
        let hours: Vec<u32> = app
            .journal
            .entries(&app.account)?
            .iter()
            .map(|e| e.timestamp.with_timezone(&Local).hour())
            .collect();
        let r = insights::recommendations(&data, &hours);
        println!();
        println!("  {}", i.motivation);
        println!("  Tip:        {}", i.recommendation);
        println!("  Frequency:  {}", r.entry_frequency);
        println!("  You write:  mostly in the {}", r.time_of_day);
        println!("  Prompts:    {}", r.prompt_style.display_name());
        println!("  Reminders:  {}", r.reminder_timing);
        println!("  Goals:      {}", r.goal_adjustment);
        println!();
        println!("  Database:   {}", paths::db_path().display());
    }
    Ok(())
}

pub struct ReminderChanges {
    pub frequency: Option<FrequencyArg>,
    pub time: Option<String>,
    pub days: Vec<u8>,
    pub times: Vec<String>,
    pub enable: bool,
    pub disable: bool,
}

impl ReminderChanges {
    fn is_empty(&self) -> bool {
        self.frequency.is_none()
            && self.time.is_none()
            && self.days.is_empty()
            && self.times.is_empty()
            && !self.enable
            && !self.disable
    }

    fn apply(self, mut settings: ReminderSettings) -> ReminderSettings {
        if let Some(f) = self.frequency {
            settings.frequency = f.into();
        }
        if let Some(t) = self.time {
            settings.time = t;
        }
        if !self.days.is_empty() {
            settings.custom_days = self.days;
        }
        if !self.times.is_empty() {
            settings.custom_times = self.times;
        }
        if self.enable {
            settings.enabled = true;
        }
        if self.disable {
            settings.enabled = false;
        }
        settings
    }
}

/// Print the reminder settings (after applying any changes) and whether one
/// is due right now.
pub fn remind(app: &App, changes: ReminderChanges) -> anyhow::Result<()> {
    let data = if changes.is_empty() {
        app.consistency.load_or_init(&app.account, Utc::now())?
    } else {
        let current = app.consistency.load_or_init(&app.account, Utc::now())?.reminder;
        app.consistency
            .update_reminders(&app.account, changes.apply(current), Utc::now())?
    };

    let s = &data.reminder;
    let schedule = match s.frequency {
        ReminderFrequency::Daily => format!("daily at {}", s.time),
        ReminderFrequency::TwiceDaily if s.custom_times.is_empty() => "twice daily at 09:00 and 18:00".into(),
        ReminderFrequency::TwiceDaily => format!("twice daily at {}", s.custom_times.join(" and ")),
        ReminderFrequency::Weekly => format!("Sundays at {}", s.time),
        ReminderFrequency::Custom => {
            let days: Vec<String> = if s.custom_days.is_empty() {
                vec!["1".into(), "3".into(), "5".into()]
            } else {
                s.custom_days.iter().map(|d| d.to_string()).collect()
            };
            format!("days {} at {}", days.join(","), s.time)
        }
    };
    println!(
        "  Reminders:  {} ({})",
        schedule,
        if s.enabled { "on" } else { "off" }
    );

    if reminders::should_send_reminder(s, &Local::now()) {
        let mut rng = StdRng::from_entropy();
        println!();
        println!("  {}", reminders::personalized_message(Some(&data), &mut rng));
    }
    Ok(())
}

pub fn set_goals(app: &App, weekly: Option<u32>, monthly: Option<u32>) -> anyhow::Result<()> {
    let current = app.consistency.load_or_init(&app.account, Utc::now())?;
    let data = app.consistency.update_goals(
        &app.account,
        weekly.unwrap_or(current.weekly_goal),
        monthly.unwrap_or(current.monthly_goal),
        &Local::now(),
    )?;
    println!(
        "  Goals:      {} per week ({:.1}%), {} per month ({:.1}%)",
        data.weekly_goal, data.goal_progress.weekly, data.monthly_goal, data.goal_progress.monthly
    );
    Ok(())
}
