use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boardgame_log::config::{Config, DATABASE_ENV_VAR};
use boardgame_log::storage::Database;

mod cli;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "bglog")]
#[command(version)]
#[command(about = "Record board game sessions and who played them")]
#[command(long_about = "bglog keeps a small SQLite log of players, board games and\n\
    game sessions, and answers simple questions about them: who played\n\
    a game on a given day, and how a player's sessions went.\n\n\
    Run without a command to start the interactive menu.")]
#[command(after_help = "EXAMPLES:\n    \
    bglog                                   Start the interactive menu\n    \
    bglog add-player Alice                  Register a player\n    \
    bglog add-game Chess                    Register a board game\n    \
    bglog add-session -g 1 -s 10-5 -p 1     Record a session\n    \
    bglog stats -g Chess -d 2024-01-01      Sessions of Chess on a day\n    \
    bglog show-session 1                    Session 1 and its players\n    \
    bglog results 1                         All sessions of player 1\n\n\
    For more information about a command, run 'bglog <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Database file to use
    #[arg(long, global = true, value_name = "PATH")]
    #[arg(long_help = "Database file to use. Takes precedence over the\n\
        BGLOG_DATABASE environment variable and the config file.\n\
        Defaults to ~/.bglog/game.db.")]
    database: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Shell(commands::shell::Args),

    /// Register a new player
    AddPlayer(commands::add_player::Args),

    /// Register a new board game
    AddGame(commands::add_game::Args),

    /// Record a game session and its participants
    #[command(long_about = "Records one game session of an existing board game and\n\
        adds the given players to it. Players that do not exist or are\n\
        listed twice are reported and skipped; the session is kept.")]
    AddSession(commands::add_session::Args),

    /// List players
    Players(commands::players::Args),

    /// List board games
    Games(commands::games::Args),

    /// Show one game session and its players
    ShowSession(commands::show_session::Args),

    /// Show sessions of a board game on a given day
    #[command(long_about = "Lists every session of the named board game played on\n\
        the given day, grouped by session, with the players who took part.")]
    Stats(commands::stats::Args),

    /// Show every recorded session of a player
    Results(commands::results::Args),

    /// Show configuration and the database location
    Config(commands::config::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "boardgame_log=debug,bglog=debug"
    } else {
        "boardgame_log=warn,bglog=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Some(Commands::Completions(args)) = &cli.command {
        commands::completions::generate_completions(&mut Cli::command(), args.shell);
        return Ok(());
    }

    let config = Config::load()?;
    let (db_path, source) =
        config.resolve_database_path(cli.database.as_deref(), std::env::var(DATABASE_ENV_VAR).ok())?;
    tracing::debug!("Using database {} ({})", db_path.display(), source);

    if let Some(Commands::Config(args)) = cli.command {
        return commands::config::run(args, &db_path, source);
    }

    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

    match cli.command {
        None => commands::shell::run(&db, commands::shell::Args {}),
        Some(Commands::Shell(args)) => commands::shell::run(&db, args),
        Some(Commands::AddPlayer(args)) => commands::add_player::run(&db, args),
        Some(Commands::AddGame(args)) => commands::add_game::run(&db, args),
        Some(Commands::AddSession(args)) => commands::add_session::run(&db, args),
        Some(Commands::Players(args)) => commands::players::run(&db, args),
        Some(Commands::Games(args)) => commands::games::run(&db, args),
        Some(Commands::ShowSession(args)) => commands::show_session::run(&db, args),
        Some(Commands::Stats(args)) => commands::stats::run(&db, args),
        Some(Commands::Results(args)) => commands::results::run(&db, args),
        Some(Commands::Config(_)) | Some(Commands::Completions(_)) => Ok(()),
    }
}
