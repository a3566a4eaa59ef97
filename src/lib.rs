//! Board game log - record who played what, when, and how it ended.
//!
//! The library holds the storage layer, input validation and the session
//! creation flow. The `bglog` binary wraps them in an interactive shell
//! and a set of one-shot commands.

pub mod config;
pub mod error;
pub mod input;
pub mod session_builder;
pub mod storage;
