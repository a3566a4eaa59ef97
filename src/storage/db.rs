//! SQLite storage layer for the board game log

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use rusqlite::{ffi, params, Connection, OptionalExtension};

use super::models::{BoardGame, BoardGameId, GameSession, GameSessionId, Player, PlayerId};
use crate::error::StoreError;
use crate::input::{self, DATE_FORMAT};

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Get the default database path
pub fn default_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::home_dir()
        .context("Could not find home directory")?
        .join(".bglog");

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("game.db"))
}

/// Database connection wrapper.
///
/// Owns the only connection to the store. It is opened once at startup,
/// passed by reference to every component and closed when dropped.
pub struct Database {
    pub(super) conn: Connection,
}

impl Database {
    /// Open or create the database
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::info!("Opened database at {}", path.display());
        Self::init(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    /// Create the tables and the `PlayerResults` view if they are missing.
    ///
    /// Safe to call on every startup; an initialized store is left untouched.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS Player (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS BoardGame (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS GameSession (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                score TEXT NOT NULL,
                date TEXT,
                boardgame_id INTEGER NOT NULL,
                FOREIGN KEY (boardgame_id) REFERENCES BoardGame(id)
            );

            CREATE TABLE IF NOT EXISTS Participation (
                player_id INTEGER NOT NULL,
                gamesession_id INTEGER NOT NULL,
                PRIMARY KEY (player_id, gamesession_id),
                FOREIGN KEY (player_id) REFERENCES Player(id),
                FOREIGN KEY (gamesession_id) REFERENCES GameSession(id)
            );

            CREATE VIEW IF NOT EXISTS PlayerResults AS
            SELECT
                Player.id AS player_id,
                Player.name AS player_name,
                BoardGame.name AS boardgame_name,
                GameSession.date AS session_date,
                GameSession.score AS session_score
            FROM Player
            JOIN Participation ON Player.id = Participation.player_id
            JOIN GameSession ON Participation.gamesession_id = GameSession.id
            JOIN BoardGame ON GameSession.boardgame_id = BoardGame.id;

            CREATE INDEX IF NOT EXISTS idx_gamesession_boardgame_date ON GameSession(boardgame_id, date);
            CREATE INDEX IF NOT EXISTS idx_participation_gamesession ON Participation(gamesession_id);
            "#,
        )?;
        Ok(())
    }

    // ==================== Players ====================

    /// Insert a new player and return its id
    pub fn add_player(&self, name: &str) -> Result<PlayerId> {
        let name = input::parse_name(name)?;
        self.conn
            .execute("INSERT INTO Player (name) VALUES (?1)", params![name])?;
        let id = PlayerId(self.conn.last_insert_rowid());
        tracing::debug!("Inserted player {} ({})", id, name);
        Ok(id)
    }

    /// Check if a player exists
    pub fn player_exists(&self, id: PlayerId) -> Result<bool> {
        self.exists("SELECT COUNT(*) FROM Player WHERE id = ?1", id.0)
    }

    /// List all players in id order
    pub fn list_players(&self) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM Player ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Player {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ==================== Board Games ====================

    /// Insert a new board game and return its id
    pub fn add_board_game(&self, name: &str) -> Result<BoardGameId> {
        let name = input::parse_name(name)?;
        self.conn
            .execute("INSERT INTO BoardGame (name) VALUES (?1)", params![name])?;
        let id = BoardGameId(self.conn.last_insert_rowid());
        tracing::debug!("Inserted board game {} ({})", id, name);
        Ok(id)
    }

    /// Check if a board game exists
    pub fn board_game_exists(&self, id: BoardGameId) -> Result<bool> {
        self.exists("SELECT COUNT(*) FROM BoardGame WHERE id = ?1", id.0)
    }

    /// Check if at least one board game has exactly this name
    pub fn board_game_name_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM BoardGame WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// List all board games in id order
    pub fn list_board_games(&self) -> Result<Vec<BoardGame>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM BoardGame ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(BoardGame {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ==================== Game Sessions ====================

    /// Insert a new game session and return its id.
    ///
    /// Fails with [`StoreError::Referential`] when the board game is unknown;
    /// no row is written in that case.
    pub fn add_game_session(
        &self,
        score: &str,
        date: Option<NaiveDate>,
        boardgame_id: BoardGameId,
    ) -> Result<GameSessionId> {
        if !self.board_game_exists(boardgame_id)? {
            return Err(StoreError::Referential {
                entity: "BoardGame",
                id: boardgame_id.0,
            });
        }

        self.conn.execute(
            "INSERT INTO GameSession (score, date, boardgame_id) VALUES (?1, ?2, ?3)",
            params![
                score,
                date.map(|d| d.format(DATE_FORMAT).to_string()),
                boardgame_id,
            ],
        )?;

        let id = GameSessionId(self.conn.last_insert_rowid());
        tracing::debug!("Inserted game session {} for board game {}", id, boardgame_id);
        Ok(id)
    }

    /// Check if a game session exists
    pub fn game_session_exists(&self, id: GameSessionId) -> Result<bool> {
        self.exists("SELECT COUNT(*) FROM GameSession WHERE id = ?1", id.0)
    }

    /// Get a game session by ID
    pub fn get_game_session(&self, id: GameSessionId) -> Result<Option<GameSession>> {
        let session = self
            .conn
            .query_row(
                "SELECT id, score, date, boardgame_id FROM GameSession WHERE id = ?1",
                params![id],
                |row| {
                    Ok(GameSession {
                        id: row.get(0)?,
                        score: row.get(1)?,
                        date: date_column(row, 2)?,
                        boardgame_id: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(session)
    }

    // ==================== Participation ====================

    /// Record that a player took part in a game session.
    ///
    /// Unknown ids yield [`StoreError::Referential`] and an existing pair
    /// yields [`StoreError::Duplicate`]. Neither writes a row.
    pub fn add_participation(&self, player_id: PlayerId, gamesession_id: GameSessionId) -> Result<()> {
        if !self.player_exists(player_id)? {
            return Err(StoreError::Referential {
                entity: "Player",
                id: player_id.0,
            });
        }
        if !self.game_session_exists(gamesession_id)? {
            return Err(StoreError::Referential {
                entity: "GameSession",
                id: gamesession_id.0,
            });
        }

        self.conn
            .execute(
                "INSERT INTO Participation (player_id, gamesession_id) VALUES (?1, ?2)",
                params![player_id, gamesession_id],
            )
            .map_err(|e| match constraint_code(&e) {
                Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => StoreError::Duplicate {
                    player_id: player_id.0,
                    gamesession_id: gamesession_id.0,
                },
                _ => StoreError::Sqlite(e),
            })?;

        tracing::debug!("Player {} joined game session {}", player_id, gamesession_id);
        Ok(())
    }

    /// Get the players of a game session in the order they were added
    pub fn session_participants(&self, gamesession_id: GameSessionId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT Player.id, Player.name
             FROM Participation
             JOIN Player ON Participation.player_id = Player.id
             WHERE Participation.gamesession_id = ?1
             ORDER BY Participation.rowid",
        )?;
        let rows = stmt.query_map(params![gamesession_id], |row| {
            Ok(Player {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ==================== Stats ====================

    /// Get total player count
    pub fn player_count(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM Player")
    }

    /// Get total board game count
    pub fn board_game_count(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM BoardGame")
    }

    /// Get total game session count
    pub fn game_session_count(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM GameSession")
    }

    /// Get total participation count
    pub fn participation_count(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM Participation")
    }

    fn count(&self, sql: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count)
    }

    fn exists(&self, sql: &str, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(sql, params![id], |row| row.get(0))?;
        Ok(count > 0)
    }
}

/// Extended result code of a constraint violation, if `err` is one.
fn constraint_code(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation => {
            Some(e.extended_code)
        }
        _ => None,
    }
}

/// Read a nullable `YYYY-MM-DD` text column.
pub(super) fn date_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
            })
        })
        .transpose()
}
