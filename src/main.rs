// src/main.rs — Kaizen entry point

use clap::Parser;

use kaizen::cli::app::App;
use kaizen::cli::status::ReminderChanges;
use kaizen::cli::{chat, journal, migrate, status, Cli, Commands};
use kaizen::infra::config::Config;
use kaizen::infra::{logger, paths};

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    // Needs no database
    if let Commands::Analyze { text } = &cli.command {
        journal::analyze(&text.join(" "));
        return Ok(());
    }

    if let Commands::Migrate { status, rollback_to } = &cli.command {
        return migrate::run_migrate(&paths::db_path(), *status, *rollback_to);
    }

    let app = App::open(config, cli.account)?;

    match cli.command {
        Commands::Chat { tone, mood } => chat::run_chat(&app, tone, mood).await,
        Commands::EndSession { mood } => chat::end_session(&app, mood),
        Commands::History { limit } => chat::show_history(&app, limit),
        Commands::Write { text, mood, prompt } => {
            journal::write_entry(&app, &text.join(" "), mood, prompt)
        }
        Commands::Prompt { mood } => journal::suggest_prompt(&app, mood),
        Commands::Trends { days } => journal::show_trends(&app, days),
        Commands::Status { verbose } => status::show_status(&app, verbose),
        Commands::Remind {
            frequency,
            time,
            days,
            times,
            enable,
            disable,
        } => status::remind(
            &app,
            ReminderChanges {
                frequency,
                time,
                days,
                times,
                enable,
                disable,
            },
        ),
        Commands::Goals { weekly, monthly } => status::set_goals(&app, weekly, monthly),
        Commands::Analyze { .. } | Commands::Migrate { .. } => Ok(()),
    }
}
