//! Add-player command - register a new player.

use anyhow::Result;
use colored::Colorize;

use boardgame_log::storage::Database;

/// Arguments for the add-player command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    bglog add-player Alice\n    \
    bglog add-player \"Mary Ann\"")]
pub struct Args {
    /// Name of the player
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Executes the add-player command.
pub fn run(db: &Database, args: Args) -> Result<()> {
    let id = db.add_player(&args.name)?;
    println!(
        "{}",
        format!(
            "Player {} added with id {}",
            args.name.trim().yellow(),
            id.to_string().cyan()
        )
        .green()
    );
    Ok(())
}
