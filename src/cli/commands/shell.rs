//! Shell command - run the interactive menu on stdin/stdout.

use anyhow::Result;

use crate::cli::shell::Shell;
use boardgame_log::storage::Database;

/// Arguments for the shell command.
#[derive(clap::Args)]
pub struct Args {}

/// Executes the shell command.
pub fn run(db: &Database, _args: Args) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(db, stdin.lock(), stdout.lock()).run()
}
