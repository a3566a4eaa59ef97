//! Output formatting utilities for CLI commands.
//!
//! Provides a unified `OutputFormat` enum and the text renderers shared by
//! the one-shot commands and the interactive shell.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use boardgame_log::storage::{PlayerResult, SessionStatistics};

/// Output format options for CLI commands.
///
/// - `Text` for human-readable terminal output (default)
/// - `Json` for machine-readable output and scripting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default).
    #[default]
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json}")?;
    Ok(())
}

/// Formats an optional date, using "-" when it is missing.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Writes grouped session statistics, or "No statistics." when empty.
pub fn write_statistics(out: &mut impl Write, stats: &[SessionStatistics]) -> io::Result<()> {
    if stats.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "No statistics.".dimmed())?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "{}", "Game session statistics:".bold())?;
    for (i, session) in stats.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(
            out,
            "Session ID: {}, Game: {}, Date: {}, Score: {}",
            session.session_id.to_string().cyan(),
            session.game_name,
            format_date(session.session_date),
            session.score.yellow()
        )?;
        writeln!(out, "Participated players:")?;
        for player in &session.players {
            writeln!(out, "  - {player}")?;
        }
    }
    Ok(())
}

/// Writes a player's results, or a "no results" line when empty.
pub fn write_player_results(out: &mut impl Write, results: &[PlayerResult]) -> io::Result<()> {
    writeln!(out)?;
    if results.is_empty() {
        writeln!(out, "{}", "No results found given player id.".dimmed())?;
        return Ok(());
    }

    writeln!(out, "{}", "Player results:".bold())?;
    for result in results {
        writeln!(
            out,
            "Player ID: {}, Name: {}, Board game: {}, Date: {}, Score: {}",
            result.player_id.to_string().cyan(),
            result.player_name,
            result.boardgame_name,
            format_date(result.session_date),
            result.session_score.yellow()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardgame_log::storage::{GameSessionId, PlayerId};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("text", false).unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("json", false).unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("markdown", false).is_err());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 3, 9)), "2024-03-09");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn test_write_statistics_empty() {
        let text = render(|out| write_statistics(out, &[]));
        assert!(text.contains("No statistics."));
    }

    #[test]
    fn test_write_statistics_groups() {
        let stats = vec![
            SessionStatistics {
                session_id: GameSessionId(1),
                game_name: "Chess".to_string(),
                session_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                score: "1-0".to_string(),
                players: vec!["Alice".to_string(), "Bob".to_string()],
            },
            SessionStatistics {
                session_id: GameSessionId(2),
                game_name: "Chess".to_string(),
                session_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                score: "0-1".to_string(),
                players: vec!["Carol".to_string()],
            },
        ];

        let text = render(|out| write_statistics(out, &stats));
        assert!(text.contains("Session ID: 1, Game: Chess, Date: 2024-01-01, Score: 1-0"));
        assert!(text.contains("Session ID: 2, Game: Chess, Date: 2024-01-01, Score: 0-1"));
        assert_eq!(text.matches("Participated players:").count(), 2);
        assert!(text.contains("  - Alice\n  - Bob\n"));
    }

    #[test]
    fn test_write_player_results() {
        let results = vec![PlayerResult {
            player_id: PlayerId(1),
            player_name: "Alice".to_string(),
            boardgame_name: "Chess".to_string(),
            session_date: None,
            session_score: "10-5".to_string(),
        }];

        let text = render(|out| write_player_results(out, &results));
        assert!(text.contains("Player ID: 1, Name: Alice, Board game: Chess, Date: -, Score: 10-5"));

        let text = render(|out| write_player_results(out, &[]));
        assert!(text.contains("No results found given player id."));
    }
}
