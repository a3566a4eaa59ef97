//! Add-session command - record a game session in one go.
//!
//! Non-interactive counterpart of the shell's "Add game session" flow.
//! The session is written first; each `--player` is then added on its
//! own, and a rejected player is reported without undoing the rest.

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;

use boardgame_log::input::parse_date;
use boardgame_log::session_builder::{SessionBuilder, SessionDraft};
use boardgame_log::storage::{BoardGameId, Database, PlayerId};

/// Arguments for the add-session command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    bglog add-session --game 1 --score 10-5 --date 2024-01-01 -p 1 -p 2\n    \
    bglog add-session --game 3 --score \"Alice won\"")]
pub struct Args {
    /// Id of the board game that was played
    #[arg(short, long, value_name = "ID")]
    pub game: BoardGameId,

    /// Free-form score text
    #[arg(short, long)]
    pub score: String,

    /// Day the session was played (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Id of a participating player (repeatable)
    #[arg(short, long = "player", value_name = "ID")]
    pub players: Vec<PlayerId>,
}

/// Executes the add-session command.
pub fn run(db: &Database, args: Args) -> Result<()> {
    let builder = SessionBuilder::new(db);
    let mut session = builder.create(SessionDraft {
        score: args.score,
        date: args.date,
        boardgame_id: args.game,
    })?;

    for player_id in args.players {
        if let Err(e) = session.add_participant(player_id) {
            if !e.is_recoverable() {
                return Err(e.into());
            }
            eprintln!("{} {}", "Skipped:".yellow(), e);
        }
    }

    let summary = session.finish();
    println!(
        "{}",
        format!(
            "Game session {} added with {} player(s)",
            summary.session_id.to_string().cyan(),
            summary.participants.len()
        )
        .green()
    );
    Ok(())
}
