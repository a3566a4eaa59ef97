//! Error types shared by the storage layer and the session builder.
//!
//! Every variant except [`StoreError::Sqlite`] is recoverable: the shell
//! reports it and asks again instead of aborting.

/// Raw input that could not be turned into a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A name was empty or whitespace only.
    #[error("Name must not be empty")]
    EmptyName,

    /// A date did not match `YYYY-MM-DD` or named an impossible day.
    #[error("Invalid date '{0}'. Please enter date in format YYYY-MM-DD.")]
    InvalidDate(String),

    /// An identifier was not a positive integer.
    #[error("Invalid id '{0}'. Please enter a positive whole number.")]
    InvalidId(String),

    /// A menu selection outside the offered options.
    #[error("Unknown option '{0}'")]
    InvalidChoice(String),
}

/// Errors returned by [`crate::storage::Database`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The input failed validation before reaching the database.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A foreign key target does not exist.
    #[error("{entity} with id {id} does not exist")]
    Referential {
        /// Name of the referenced relation (e.g. "Player").
        entity: &'static str,
        /// The id that was looked up.
        id: i64,
    },

    /// The player already participates in the game session.
    #[error("Player {player_id} is already in game session {gamesession_id}")]
    Duplicate {
        /// Player half of the participation key.
        player_id: i64,
        /// Game session half of the participation key.
        gamesession_id: i64,
    },

    /// Any other SQLite failure.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// Whether the caller may simply report this error and ask again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StoreError::Sqlite(_))
    }
}
