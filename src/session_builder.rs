//! Session builder - record one game session and its participants.
//!
//! The flow is persisted step by step. Once [`SessionBuilder::create`]
//! returns, the session row exists whether or not any participant is
//! added afterwards; there is no rollback.

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::storage::{BoardGameId, Database, GameSessionId, PlayerId};

/// The validated header of a game session, collected before anything is
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    pub score: String,
    pub date: Option<NaiveDate>,
    pub boardgame_id: BoardGameId,
}

/// What a finished flow recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: GameSessionId,
    pub participants: Vec<PlayerId>,
}

/// Entry point of the session creation flow.
pub struct SessionBuilder<'db> {
    db: &'db Database,
}

impl<'db> SessionBuilder<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Confirms that a board game exists so the draft can reference it.
    pub fn resolve_board_game(&self, id: BoardGameId) -> Result<BoardGameId, StoreError> {
        if self.db.board_game_exists(id)? {
            Ok(id)
        } else {
            Err(StoreError::Referential {
                entity: "BoardGame",
                id: id.0,
            })
        }
    }

    /// Writes the session row and opens it for participants.
    pub fn create(&self, draft: SessionDraft) -> Result<OpenSession<'db>, StoreError> {
        let boardgame_id = self.resolve_board_game(draft.boardgame_id)?;
        let session_id = self
            .db
            .add_game_session(&draft.score, draft.date, boardgame_id)?;
        tracing::info!("Created game session {}", session_id);

        Ok(OpenSession {
            db: self.db,
            session_id,
            participants: Vec::new(),
        })
    }
}

/// A persisted game session that is still accepting participants.
pub struct OpenSession<'db> {
    db: &'db Database,
    session_id: GameSessionId,
    participants: Vec<PlayerId>,
}

impl OpenSession<'_> {
    pub fn session_id(&self) -> GameSessionId {
        self.session_id
    }

    /// Players accepted so far, in the order they were added.
    pub fn participants(&self) -> &[PlayerId] {
        &self.participants
    }

    /// Adds one participant.
    ///
    /// A duplicate or unknown player is returned as an error and the
    /// session stays open for the next attempt.
    pub fn add_participant(&mut self, player_id: PlayerId) -> Result<(), StoreError> {
        match self.db.add_participation(player_id, self.session_id) {
            Ok(()) => {
                self.participants.push(player_id);
                Ok(())
            }
            Err(e) => {
                if e.is_recoverable() {
                    tracing::debug!(
                        "Rejected player {} for game session {}: {}",
                        player_id,
                        self.session_id,
                        e
                    );
                }
                Err(e)
            }
        }
    }

    /// Ends the participant loop.
    pub fn finish(self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id,
            participants: self.participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Database, BoardGameId) {
        let db = Database::open_in_memory().expect("Failed to open database");
        db.add_player("Alice").unwrap();
        db.add_player("Bob").unwrap();
        let game = db.add_board_game("Chess").unwrap();
        (db, game)
    }

    fn draft(boardgame_id: BoardGameId) -> SessionDraft {
        SessionDraft {
            score: "10-5".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            boardgame_id,
        }
    }

    #[test]
    fn test_resolve_board_game() {
        let (db, game) = setup();
        let builder = SessionBuilder::new(&db);

        assert_eq!(builder.resolve_board_game(game).unwrap(), game);
        assert!(matches!(
            builder.resolve_board_game(BoardGameId(7)),
            Err(StoreError::Referential { entity: "BoardGame", id: 7 })
        ));
    }

    #[test]
    fn test_create_with_unknown_game_writes_nothing() {
        let (db, _) = setup();
        let builder = SessionBuilder::new(&db);

        assert!(builder.create(draft(BoardGameId(7))).is_err());
        assert_eq!(db.game_session_count().unwrap(), 0);
    }

    #[test]
    fn test_flow_continues_after_rejections() {
        let (db, game) = setup();
        let builder = SessionBuilder::new(&db);
        let mut session = builder.create(draft(game)).unwrap();

        session.add_participant(PlayerId(1)).unwrap();
        assert!(matches!(
            session.add_participant(PlayerId(1)),
            Err(StoreError::Duplicate { .. })
        ));
        assert!(matches!(
            session.add_participant(PlayerId(99)),
            Err(StoreError::Referential { entity: "Player", .. })
        ));
        session.add_participant(PlayerId(2)).unwrap();

        let summary = session.finish();
        assert_eq!(summary.session_id, GameSessionId(1));
        assert_eq!(summary.participants, vec![PlayerId(1), PlayerId(2)]);
        assert_eq!(db.participation_count().unwrap(), 2);
    }

    #[test]
    fn test_session_persists_without_participants() {
        let (db, game) = setup();
        let session = SessionBuilder::new(&db).create(draft(game)).unwrap();
        let id = session.session_id();
        drop(session);

        assert!(db.game_session_exists(id).unwrap());
        assert!(db.session_participants(id).unwrap().is_empty());
    }
}
