//! Command-line interface for the board game log.
//!
//! Provides the interactive shell and the one-shot commands that wrap
//! the storage layer.

/// Individual CLI command implementations.
pub mod commands;

/// Output formatting utilities.
pub mod format;

/// Interactive menu shell.
pub mod shell;

pub use format::OutputFormat;
