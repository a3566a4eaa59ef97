//! CLI commands for the board game log.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Record a game session with its participants.
pub mod add_session;

/// Register a board game.
pub mod add_game;

/// Register a player.
pub mod add_player;

/// Generate shell completion scripts.
pub mod completions;

/// Show configuration and the resolved database path.
pub mod config;

/// List board games.
pub mod games;

/// List players.
pub mod players;

/// Show one player's results.
pub mod results;

/// Run the interactive menu.
pub mod shell;

/// Show one game session and its participants.
pub mod show_session;

/// Show session statistics for a game and day.
pub mod stats;
