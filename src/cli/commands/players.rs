//! Players command - list registered players.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::write_json;
use crate::cli::OutputFormat;
use boardgame_log::storage::Database;

/// Arguments for the players command.
#[derive(clap::Args)]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the players command.
pub fn run(db: &Database, args: Args) -> Result<()> {
    let players = db.list_players()?;

    match args.format {
        OutputFormat::Json => write_json(&mut std::io::stdout(), &players)?,
        OutputFormat::Text => {
            if players.is_empty() {
                println!("{}", "No players yet.".dimmed());
                println!();
                println!("Run 'bglog add-player <NAME>' to add one.");
                return Ok(());
            }

            println!("{}", format!("{:>6}  {}", "ID", "NAME").bold());
            for player in &players {
                println!("{:>6}  {}", player.id.to_string().cyan(), player.name);
            }
        }
    }

    Ok(())
}
