//! Games command - list registered board games and the log's totals.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::write_json;
use crate::cli::OutputFormat;
use boardgame_log::storage::Database;

/// Arguments for the games command.
#[derive(clap::Args)]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the games command.
pub fn run(db: &Database, args: Args) -> Result<()> {
    let games = db.list_board_games()?;

    match args.format {
        OutputFormat::Json => write_json(&mut std::io::stdout(), &games)?,
        OutputFormat::Text => {
            if games.is_empty() {
                println!("{}", "No board games yet.".dimmed());
                println!();
                println!("Run 'bglog add-game <NAME>' to add one.");
                return Ok(());
            }

            println!("{}", format!("{:>6}  {}", "ID", "NAME").bold());
            for game in &games {
                println!("{:>6}  {}", game.id.to_string().cyan(), game.name);
            }
            println!();
            println!(
                "{}",
                format!(
                    "{} board game(s), {} player(s), {} game session(s) recorded",
                    db.board_game_count()?,
                    db.player_count()?,
                    db.game_session_count()?
                )
                .dimmed()
            );
        }
    }

    Ok(())
}
