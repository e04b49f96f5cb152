// src/cli/journal.rs — write, prompt, analyze and trends

use chrono::{Local, Timelike};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::app::App;
use crate::analysis::{self, themes};
use crate::consistency::{prompts, ConsistencyLevel};
use crate::journal::trends;

pub fn write_entry(app: &App, text: &str, mood: Option<u8>, prompt: Option<String>) -> anyhow::Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("entry is empty");
    }

    let (entry, data) = app.journal.record_now(&app.account, text, mood, prompt)?;

    println!("Saved entry {}.", &entry.id[..8]);
    if !entry.themes.is_empty() {
        println!("  Themes:  {}", entry.themes.join(", "));
    }
    println!(
        "  Streak:  {} day(s) (best {}) | {} | engagement {}/100",
        data.current_streak, data.longest_streak, data.consistency_level, data.engagement_score
    );
    println!(
        "  Goals:   week {:.0}% | month {:.0}%",
        data.goal_progress.weekly, data.goal_progress.monthly
    );
    Ok(())
}

/// Tier-based prompt, or a mood-based one when a mood is given.
pub fn suggest_prompt(app: &App, mood: Option<u8>) -> anyhow::Result<()> {
    let mut rng = StdRng::from_entropy();
    let prompt = match mood {
        Some(_) => themes::suggest_prompt(mood, &mut rng),
        None => {
            let level = app
                .consistency
                .get(&app.account)?
                .map(|d| d.consistency_level)
                .unwrap_or(ConsistencyLevel::Beginner);
            prompts::select_prompt(level, Local::now().hour(), &mut rng)
        }
    };
    println!("{prompt}");
    Ok(())
}

pub fn analyze(text: &str) {
    let detection = analysis::detect(text);
    let topics: Vec<&str> = detection.topics.iter().map(|t| t.as_str()).collect();
    let themes = themes::extract_themes(text);

    println!("  Emotion:  {}", detection.emotion.as_str());
    println!("  Urgency:  {}", detection.urgency.as_str());
    println!("  Topics:   {}", join_or_none(&topics));
    println!("  Themes:   {}", join_or_none(&themes));
}

pub fn show_trends(app: &App, days: u32) -> anyhow::Result<()> {
    let entries = app.journal.entries(&app.account)?;
    let today = Local::now().date_naive();
    let daily = trends::daily_trend(&entries, today, days, &Local);

    println!("Last {days} day(s):");
    for day in &daily {
        let mood = day
            .mean_mood
            .map(|m| format!("{m:.1}"))
            .unwrap_or_else(|| "-".into());
        println!(
            "  {}  {:<10} mood {}",
            day.date.format("%a %b %d"),
            "#".repeat(day.entry_count.min(10)),
            mood
        );
    }
    println!("  Mood trend: {}", trends::mood_direction(&daily).as_str());

    let frequency = trends::theme_frequency(&entries);
    if !frequency.is_empty() {
        println!("Recurring themes:");
        for (theme, count) in frequency.iter().take(5) {
            println!("  {theme:<22} {count}");
        }
    }
    Ok(())
}

fn join_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "(none)".into()
    } else {
        items.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", ")
    }
}
