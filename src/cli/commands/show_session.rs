//! Show-session command - one game session and who played it.

use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;

use crate::cli::format::{format_date, write_json};
use crate::cli::OutputFormat;
use boardgame_log::storage::{Database, GameSession, GameSessionId, Player};

/// Arguments for the show-session command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    bglog show-session 1\n    \
    bglog show-session 1 --format json")]
pub struct Args {
    /// Game session id to show
    #[arg(value_name = "SESSION_ID")]
    pub session: GameSessionId,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// A session with its participants, as printed by `--format json`.
#[derive(Serialize)]
struct SessionDetails {
    #[serde(flatten)]
    session: GameSession,
    participants: Vec<Player>,
}

/// Executes the show-session command.
pub fn run(db: &Database, args: Args) -> Result<()> {
    let Some(session) = db.get_game_session(args.session)? else {
        bail!("Game session {} not found.", args.session);
    };
    let participants = db.session_participants(session.id)?;

    match args.format {
        OutputFormat::Json => write_json(
            &mut std::io::stdout(),
            &SessionDetails {
                session,
                participants,
            },
        )?,
        OutputFormat::Text => {
            println!(
                "{} {}",
                "Game session".bold(),
                session.id.to_string().cyan()
            );
            println!("  {}  {}", "Board game:".dimmed(), session.boardgame_id);
            println!("  {}        {}", "Date:".dimmed(), format_date(session.date));
            println!("  {}       {}", "Score:".dimmed(), session.score);
            println!();

            if participants.is_empty() {
                println!("{}", "No participants recorded.".dimmed());
            } else {
                println!("Participated players:");
                for player in &participants {
                    println!("  - {} ({})", player.name, player.id);
                }
            }
        }
    }

    Ok(())
}
