//! Core data models for the board game log.
//!
//! Rows are plain values copied out of the database; the store owns the
//! data and nothing here is kept between operations.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Declares a surrogate key newtype backed by an SQLite `INTEGER`.
macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                match trimmed.parse::<i64>() {
                    Ok(id) if id > 0 => Ok(Self(id)),
                    _ => Err(ValidationError::InvalidId(trimmed.to_string())),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

surrogate_id!(
    /// Surrogate key of a [`Player`].
    PlayerId
);
surrogate_id!(
    /// Surrogate key of a [`BoardGame`].
    BoardGameId
);
surrogate_id!(
    /// Surrogate key of a [`GameSession`].
    GameSessionId
);

/// Someone who takes part in game sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// A board game that sessions are played of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGame {
    pub id: BoardGameId,
    pub name: String,
}

/// One recorded play of a board game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: GameSessionId,

    /// Free-form score text, e.g. "10-5" or "Alice won"
    pub score: String,

    /// Day the session was played, if recorded
    pub date: Option<NaiveDate>,

    pub boardgame_id: BoardGameId,
}

/// A row of the `PlayerResults` view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player_id: PlayerId,
    pub player_name: String,
    pub boardgame_name: String,
    pub session_date: Option<NaiveDate>,
    pub session_score: String,
}

/// One game session together with the names of everyone who played it.
///
/// Produced by grouping the statistics join by session id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub session_id: GameSessionId,
    pub game_name: String,
    pub session_date: Option<NaiveDate>,
    pub score: String,

    /// Participant names in the order they were added to the session
    pub players: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str_accepts_positive_integers() {
        assert_eq!("12".parse::<PlayerId>().unwrap(), PlayerId(12));
        assert_eq!(" 3 ".parse::<BoardGameId>().unwrap(), BoardGameId(3));
    }

    #[test]
    fn test_id_from_str_rejects_garbage() {
        assert_eq!(
            "abc".parse::<GameSessionId>(),
            Err(ValidationError::InvalidId("abc".to_string()))
        );
        assert!("0".parse::<PlayerId>().is_err());
        assert!("-4".parse::<PlayerId>().is_err());
        assert!("".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_number() {
        let result = PlayerResult {
            player_id: PlayerId(1),
            player_name: "Alice".to_string(),
            boardgame_name: "Chess".to_string(),
            session_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            session_score: "10-5".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["player_id"], 1);
        assert_eq!(json["session_date"], "2024-01-01");
    }
}
