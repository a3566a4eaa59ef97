//! Config command - show where settings and data live

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use boardgame_log::config::{Config, PathSource, DATABASE_ENV_VAR};

/// Arguments for the config command.
#[derive(clap::Args)]
pub struct Args {}

/// Executes the config command.
pub fn run(_args: Args, database_path: &Path, source: PathSource) -> Result<()> {
    println!("{}", "Board Game Log Configuration".bold());
    println!();

    let config_path = Config::config_path()?;
    let exists = if config_path.exists() { "" } else { " (not present)" };
    println!(
        "  {}  {}{}",
        "Config file:".dimmed(),
        config_path.display(),
        exists.dimmed()
    );
    println!(
        "  {}     {} {}",
        "Database:".dimmed(),
        database_path.display(),
        format!("[{source}]").dimmed()
    );

    println!();
    println!(
        "{}",
        format!("Override with --database <PATH> or {DATABASE_ENV_VAR}.").dimmed()
    );

    Ok(())
}
