//! Stats command - sessions of one board game on one day.

use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::cli::format::{write_json, write_statistics};
use crate::cli::OutputFormat;
use boardgame_log::input::{parse_date, parse_name};
use boardgame_log::storage::Database;

/// Arguments for the stats command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    bglog stats --game Chess --date 2024-01-01\n    \
    bglog stats -g Chess -d 2024-01-01 --format json")]
pub struct Args {
    /// Exact board game name
    #[arg(short, long, value_name = "NAME")]
    pub game: String,

    /// Day to report on (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the stats command.
pub fn run(db: &Database, args: Args) -> Result<()> {
    let game = parse_name(&args.game)?;
    if !db.board_game_name_exists(&game)? {
        bail!("Board game '{game}' not found. Run 'bglog games' to list board games.");
    }

    let stats = db.session_statistics(&game, args.date)?;
    let mut out = std::io::stdout();
    match args.format {
        OutputFormat::Json => write_json(&mut out, &stats)?,
        OutputFormat::Text => write_statistics(&mut out, &stats)?,
    }
    Ok(())
}
