//! Read-only reporting queries.
//!
//! These join across all four relations and never write.

use chrono::NaiveDate;
use rusqlite::params;

use super::db::{date_column, Database, Result};
use super::models::{GameSessionId, PlayerId, PlayerResult, SessionStatistics};
use crate::input::DATE_FORMAT;

/// A single row of the statistics join, before grouping.
#[derive(Debug, Clone)]
struct StatisticsRow {
    session_id: GameSessionId,
    game_name: String,
    session_date: Option<NaiveDate>,
    player_name: String,
    score: String,
}

impl Database {
    /// Sessions of the named board game played on `date`, with their players.
    ///
    /// One entry per session id; an empty vector means nothing matched.
    /// Sessions without any recorded participant are not listed.
    pub fn session_statistics(
        &self,
        boardgame_name: &str,
        date: NaiveDate,
    ) -> Result<Vec<SessionStatistics>> {
        let mut stmt = self.conn.prepare(
            "SELECT GameSession.id, BoardGame.name, GameSession.date, Player.name, GameSession.score
             FROM GameSession
             JOIN BoardGame ON GameSession.boardgame_id = BoardGame.id
             JOIN Participation ON GameSession.id = Participation.gamesession_id
             JOIN Player ON Participation.player_id = Player.id
             WHERE BoardGame.name = ?1 AND GameSession.date = ?2
             ORDER BY GameSession.id, Participation.rowid",
        )?;

        let rows = stmt.query_map(
            params![boardgame_name, date.format(DATE_FORMAT).to_string()],
            |row| {
                Ok(StatisticsRow {
                    session_id: row.get(0)?,
                    game_name: row.get(1)?,
                    session_date: date_column(row, 2)?,
                    player_name: row.get(3)?,
                    score: row.get(4)?,
                })
            },
        )?;
        let rows = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(
            "Statistics for {} on {}: {} rows",
            boardgame_name,
            date,
            rows.len()
        );
        Ok(group_by_session(rows))
    }

    /// Rows of the `PlayerResults` view for one player
    pub fn player_results(&self, player_id: PlayerId) -> Result<Vec<PlayerResult>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, player_name, boardgame_name, session_date, session_score
             FROM PlayerResults
             WHERE player_id = ?1",
        )?;

        let rows = stmt.query_map(params![player_id], |row| {
            Ok(PlayerResult {
                player_id: row.get(0)?,
                player_name: row.get(1)?,
                boardgame_name: row.get(2)?,
                session_date: date_column(row, 3)?,
                session_score: row.get(4)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

/// Folds consecutive rows with the same session id into one entry.
fn group_by_session(rows: Vec<StatisticsRow>) -> Vec<SessionStatistics> {
    let mut groups: Vec<SessionStatistics> = Vec::new();

    for row in rows {
        match groups.last_mut() {
            Some(current) if current.session_id == row.session_id => {
                current.players.push(row.player_name);
            }
            _ => groups.push(SessionStatistics {
                session_id: row.session_id,
                game_name: row.game_name,
                session_date: row.session_date,
                score: row.score,
                players: vec![row.player_name],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).expect("valid test date")
    }

    fn row(session: i64, player: &str) -> StatisticsRow {
        StatisticsRow {
            session_id: GameSessionId(session),
            game_name: "Chess".to_string(),
            session_date: Some(day("2024-01-01")),
            player_name: player.to_string(),
            score: format!("score-{session}"),
        }
    }

    #[test]
    fn test_group_by_session_empty() {
        assert!(group_by_session(Vec::new()).is_empty());
    }

    #[test]
    fn test_group_by_session_splits_on_id_change() {
        let groups = group_by_session(vec![
            row(1, "Alice"),
            row(1, "Bob"),
            row(2, "Bob"),
            row(2, "Carol"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].session_id, GameSessionId(1));
        assert_eq!(groups[0].players, vec!["Alice", "Bob"]);
        assert_eq!(groups[0].score, "score-1");
        assert_eq!(groups[1].players, vec!["Bob", "Carol"]);
    }

    #[test]
    fn test_session_statistics_empty_store() {
        let db = Database::open_in_memory().unwrap();
        let stats = db.session_statistics("Chess", day("2024-01-01")).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_session_statistics_filters_by_game_and_date() {
        let db = Database::open_in_memory().unwrap();
        let alice = db.add_player("Alice").unwrap();
        let chess = db.add_board_game("Chess").unwrap();
        let go = db.add_board_game("Go").unwrap();

        let s1 = db.add_game_session("1-0", Some(day("2024-01-01")), chess).unwrap();
        let s2 = db.add_game_session("0-1", Some(day("2024-01-02")), chess).unwrap();
        let s3 = db.add_game_session("W+5", Some(day("2024-01-01")), go).unwrap();
        for s in [s1, s2, s3] {
            db.add_participation(alice, s).unwrap();
        }

        let stats = db.session_statistics("Chess", day("2024-01-01")).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].session_id, s1);
        assert_eq!(stats[0].game_name, "Chess");
        assert_eq!(stats[0].session_date, Some(day("2024-01-01")));
    }

    #[test]
    fn test_session_statistics_skips_sessions_without_players() {
        let db = Database::open_in_memory().unwrap();
        let chess = db.add_board_game("Chess").unwrap();
        db.add_game_session("1-0", Some(day("2024-01-01")), chess).unwrap();

        assert!(db.session_statistics("Chess", day("2024-01-01")).unwrap().is_empty());
    }

    #[test]
    fn test_player_results_single_row() {
        let db = Database::open_in_memory().unwrap();
        let alice = db.add_player("Alice").unwrap();
        let chess = db.add_board_game("Chess").unwrap();
        let session = db.add_game_session("10-5", Some(day("2024-01-01")), chess).unwrap();
        db.add_participation(alice, session).unwrap();

        let results = db.player_results(alice).unwrap();
        assert_eq!(
            results,
            vec![PlayerResult {
                player_id: PlayerId(1),
                player_name: "Alice".to_string(),
                boardgame_name: "Chess".to_string(),
                session_date: Some(day("2024-01-01")),
                session_score: "10-5".to_string(),
            }]
        );
    }

    #[test]
    fn test_player_results_unknown_or_idle_player() {
        let db = Database::open_in_memory().unwrap();
        let bob = db.add_player("Bob").unwrap();
        db.add_board_game("Chess").unwrap();

        assert!(db.player_results(bob).unwrap().is_empty());
        assert!(db.player_results(PlayerId(42)).unwrap().is_empty());
    }
}
