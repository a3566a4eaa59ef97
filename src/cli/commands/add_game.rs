//! Add-game command - register a new board game.

use anyhow::Result;
use colored::Colorize;

use boardgame_log::storage::Database;

/// Arguments for the add-game command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    bglog add-game Chess\n    \
    bglog add-game \"Ticket to Ride\"")]
pub struct Args {
    /// Name of the board game
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Executes the add-game command.
pub fn run(db: &Database, args: Args) -> Result<()> {
    let id = db.add_board_game(&args.name)?;
    println!(
        "{}",
        format!(
            "Board game {} added with id {}",
            args.name.trim().yellow(),
            id.to_string().cyan()
        )
        .green()
    );
    Ok(())
}
