//! Results command - every recorded session of one player.

use anyhow::Result;

use crate::cli::format::{write_json, write_player_results};
use crate::cli::OutputFormat;
use boardgame_log::storage::{Database, PlayerId};

/// Arguments for the results command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    bglog results 1\n    \
    bglog results 1 --format json")]
pub struct Args {
    /// Player id to report on
    #[arg(value_name = "PLAYER_ID")]
    pub player: PlayerId,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the results command.
pub fn run(db: &Database, args: Args) -> Result<()> {
    let results = db.player_results(args.player)?;
    let mut out = std::io::stdout();
    match args.format {
        OutputFormat::Json => write_json(&mut out, &results)?,
        OutputFormat::Text => write_player_results(&mut out, &results)?,
    }
    Ok(())
}
