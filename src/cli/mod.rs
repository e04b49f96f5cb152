// src/cli/mod.rs — CLI definition (clap derive)

pub mod app;
pub mod chat;
pub mod journal;
pub mod migrate;
pub mod status;

use clap::{Parser, Subcommand, ValueEnum};

use crate::consistency::ReminderFrequency;
use crate::therapist::Tone;

#[derive(Parser)]
#[command(name = "kaizen", about = "Journaling companion with a mood-aware chat", version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Account to act as (overrides [account] id)
    #[arg(long, global = true)]
    pub account: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Talk in the open therapist session (starts one if needed)
    Chat {
        /// empathetic, honest, cognitive (cbt) or solution
        #[arg(short, long)]
        tone: Option<Tone>,
        /// Current mood, 1-10
        #[arg(short, long, default_value = "5")]
        mood: u8,
    },
    /// Close the open therapist session
    EndSession {
        /// Mood at the end of the session, 1-10
        #[arg(short, long)]
        mood: Option<u8>,
    },
    /// Write a journal entry
    Write {
        /// Entry text
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
        /// Mood, 1-10
        #[arg(short, long)]
        mood: Option<u8>,
        /// Prompt this entry answers
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Streak, tier, engagement and goals
    Status {
        /// Include insights and recommendations
        #[arg(long)]
        verbose: bool,
    },
    /// Suggest a journaling prompt
    Prompt {
        /// Pick from the mood-based set instead of the tier-based one
        #[arg(short, long)]
        mood: Option<u8>,
    },
    /// Show emotion, urgency, topics and themes detected in a text
    Analyze {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Show or change reminder settings
    Remind {
        #[arg(long, value_enum)]
        frequency: Option<FrequencyArg>,
        /// Reminder time, HH:MM
        #[arg(long)]
        time: Option<String>,
        /// Day of week for custom reminders, 0 = Sunday (repeatable)
        #[arg(long = "day")]
        days: Vec<u8>,
        /// Time of day for twice-daily reminders, HH:MM (repeatable)
        #[arg(long = "at")]
        times: Vec<String>,
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        #[arg(long)]
        disable: bool,
    },
    /// Set weekly and monthly entry goals
    Goals {
        #[arg(long)]
        weekly: Option<u32>,
        #[arg(long)]
        monthly: Option<u32>,
    },
    /// Entries and mood per day, plus recurring themes
    Trends {
        #[arg(short, long, default_value = "14", value_parser = clap::value_parser!(u32).range(1..=crate::journal::trends::MAX_TREND_DAYS as i64))]
        days: u32,
    },
    /// List past therapist sessions
    History {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Show schema status, run pending migrations, or roll back
    Migrate {
        /// Only print the applied migrations
        #[arg(long)]
        status: bool,
        /// Revert migrations newer than this version
        #[arg(long, value_name = "VERSION", conflicts_with = "status")]
        rollback_to: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Daily,
    TwiceDaily,
    Weekly,
    Custom,
}

impl From<FrequencyArg> for ReminderFrequency {
    fn from(f: FrequencyArg) -> Self {
        match f {
            FrequencyArg::Daily => Self::Daily,
            FrequencyArg::TwiceDaily => Self::TwiceDaily,
            FrequencyArg::Weekly => Self::Weekly,
            FrequencyArg::Custom => Self::Custom,
        }
    }
}
