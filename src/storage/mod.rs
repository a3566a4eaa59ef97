//! Storage layer: schema, repository operations and reporting queries.

pub mod db;
pub mod models;
mod reports;

pub use db::Database;
pub use models::*;
