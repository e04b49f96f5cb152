// src/cli/chat.rs — Interactive therapist chat REPL

use chrono::Utc;

use super::app::App;
use crate::therapist::{ChatRole, ChatService, Tone};

/// Run the chat REPL until EOF, `quit` or `/end`.
pub async fn run_chat(app: &App, tone: Option<Tone>, mood: u8) -> anyhow::Result<()> {
    let chat = app.chat_service();
    let mut mood = mood.clamp(1, 10);
    let session = chat.session(&app.account, tone, mood, Utc::now())?;

    eprintln!(
        "kaizen v{} | {} | /tone <name>, /mood <1-10>, /end, /quit\n",
        env!("CARGO_PKG_VERSION"),
        session.tone.display_name(),
    );
    // Replay the tail of a resumed session so the user has context
    let skip = session.messages.len().saturating_sub(4);
    for message in &session.messages[skip..] {
        print_message(message.role, &message.content);
    }

    while let Some(input) = read_input() {
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
            break;
        }

        if trimmed.starts_with('/') {
            match handle_slash_command(trimmed, app, &chat, &mut mood)? {
                SlashOutcome::Continue => continue,
                SlashOutcome::Ended => break,
            }
        }

        if trimmed.is_empty() {
            continue;
        }

        let turn = chat.respond(&app.account, trimmed, mood, Utc::now()).await?;
        print_message(ChatRole::Assistant, &turn.reply);
    }

    Ok(())
}

/// Close the open session from the command line.
pub fn end_session(app: &App, mood: Option<u8>) -> anyhow::Result<()> {
    let chat = app.chat_service();
    match chat.sessions().end_session(&app.account, mood, Utc::now())? {
        Some(session) => {
            let minutes = session.duration_minutes(session.end_time.unwrap_or_else(Utc::now));
            println!(
                "Session ended after {} min, {} message(s).",
                minutes,
                session.messages.len()
            );
        }
        None => println!("No open session."),
    }
    Ok(())
}

/// Past sessions, newest first.
pub fn show_history(app: &App, limit: usize) -> anyhow::Result<()> {
    let chat = app.chat_service();
    let sessions = chat.sessions().history(&app.account, limit)?;
    if sessions.is_empty() {
        println!("No sessions yet.");
        return Ok(());
    }
    for s in sessions {
        let mood = match s.mood.end {
            Some(end) => format!("{} -> {}", s.mood.start, end),
            None => s.mood.start.to_string(),
        };
        println!(
            "  {}  {:<16} {:>3} msgs  mood {}{}",
            s.start_time.format("%Y-%m-%d %H:%M"),
            s.tone.display_name(),
            s.messages.len(),
            mood,
            if s.is_open() { "  (open)" } else { "" },
        );
    }
    Ok(())
}

enum SlashOutcome {
    Continue,
    Ended,
}

fn handle_slash_command(
    input: &str,
    app: &App,
    chat: &ChatService,
    mood: &mut u8,
) -> anyhow::Result<SlashOutcome> {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/tone" => match arg.parse::<Tone>() {
            Ok(tone) => {
                chat.sessions().set_tone(&app.account, tone)?;
                eprintln!("  Tone: {}", tone.display_name());
            }
            Err(e) => {
                eprintln!("  {e}");
                for tone in Tone::ALL {
                    eprintln!("    {:<12} {}", tone.as_str(), tone.description());
                }
            }
        },
        "/mood" => match arg.parse::<u8>() {
            Ok(m) if (1..=10).contains(&m) => {
                *mood = m;
                eprintln!("  Mood: {m}");
            }
            _ => eprintln!("  Usage: /mood <1-10>"),
        },
        "/end" => {
            let end_mood = arg.parse::<u8>().ok();
            chat.sessions().end_session(&app.account, end_mood, Utc::now())?;
            eprintln!("  Session ended. Take care.");
            return Ok(SlashOutcome::Ended);
        }
        "/help" => {
            eprintln!("  /tone <name>   switch therapeutic tone");
            eprintln!("  /mood <1-10>   update your current mood");
            eprintln!("  /end [mood]    close this session");
            eprintln!("  /quit          leave, keeping the session open");
        }
        other => eprintln!("  Unknown command: {other} (try /help)"),
    }
    Ok(SlashOutcome::Continue)
}

fn print_message(role: ChatRole, content: &str) {
    match role {
        ChatRole::Assistant => println!("kaizen: {content}\n"),
        ChatRole::User => println!("you: {content}\n"),
    }
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}
