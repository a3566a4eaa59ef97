//! Validated input.
//!
//! Each function turns one line of raw text into a typed value or a
//! [`ValidationError`]. The shell calls them in a loop until the user
//! enters something valid; nothing here touches the database.

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Canonical date format used for input, storage and display.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sentinel that ends the participant loop of the session flow.
pub const STOP_SENTINEL: &str = "q";

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddPlayer,
    AddBoardGame,
    AddGameSession,
    ShowStatistics,
    ShowPlayerResults,
    Quit,
}

/// One answer in the participant loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantInput<T> {
    Add(T),
    Stop,
}

/// Trims a name and rejects it if nothing is left.
pub fn parse_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

/// Parses a `YYYY-MM-DD` date.
///
/// The month and day must be zero padded so that the stored text always
/// compares equal to what a later query types in.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let s = raw.trim();
    let well_formed = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ValidationError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Parses a surrogate key such as [`crate::storage::PlayerId`].
pub fn parse_id<T>(raw: &str) -> Result<T, ValidationError>
where
    T: std::str::FromStr<Err = ValidationError>,
{
    raw.parse()
}

/// Interprets a `[Y/n]` answer: empty or anything starting with `y` is yes.
pub fn parse_confirmation(raw: &str) -> bool {
    let answer = raw.trim().to_lowercase();
    answer.is_empty() || answer.starts_with('y')
}

/// Parses a participant id or the stop sentinel.
pub fn parse_participant<T>(raw: &str) -> Result<ParticipantInput<T>, ValidationError>
where
    T: std::str::FromStr<Err = ValidationError>,
{
    if raw.trim() == STOP_SENTINEL {
        return Ok(ParticipantInput::Stop);
    }
    parse_id(raw).map(ParticipantInput::Add)
}

/// Parses a main menu selection (`1`..=`6`).
pub fn parse_menu_choice(raw: &str) -> Result<MenuChoice, ValidationError> {
    match raw.trim() {
        "1" => Ok(MenuChoice::AddPlayer),
        "2" => Ok(MenuChoice::AddBoardGame),
        "3" => Ok(MenuChoice::AddGameSession),
        "4" => Ok(MenuChoice::ShowStatistics),
        "5" => Ok(MenuChoice::ShowPlayerResults),
        "6" => Ok(MenuChoice::Quit),
        other => Err(ValidationError::InvalidChoice(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PlayerId;

    #[test]
    fn test_parse_name_trims() {
        assert_eq!(parse_name("  Alice \n").unwrap(), "Alice");
    }

    #[test]
    fn test_parse_name_rejects_blank() {
        assert_eq!(parse_name(""), Err(ValidationError::EmptyName));
        assert_eq!(parse_name("   "), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_parse_date_valid() {
        assert_eq!(
            parse_date("2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            parse_date(" 2024-02-29\n").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        for raw in ["2024/01/01", "Jan 1 2024", "01-01-2024", "2024-1-1", "", "2024-01-01x"] {
            assert!(
                matches!(parse_date(raw), Err(ValidationError::InvalidDate(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_date_rejects_impossible_day() {
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_parse_confirmation() {
        assert!(parse_confirmation(""));
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation("Yes"));
        assert!(parse_confirmation("yolo"));
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation("no"));
        assert!(!parse_confirmation("sure"));
    }

    #[test]
    fn test_parse_participant() {
        assert_eq!(
            parse_participant::<PlayerId>("q").unwrap(),
            ParticipantInput::Stop
        );
        assert_eq!(
            parse_participant::<PlayerId>("4").unwrap(),
            ParticipantInput::Add(PlayerId(4))
        );
        assert!(parse_participant::<PlayerId>("Q").is_err());
        assert!(parse_participant::<PlayerId>("quit").is_err());
    }

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!(parse_menu_choice("1").unwrap(), MenuChoice::AddPlayer);
        assert_eq!(parse_menu_choice(" 6 ").unwrap(), MenuChoice::Quit);
        assert_eq!(
            parse_menu_choice("7"),
            Err(ValidationError::InvalidChoice("7".to_string()))
        );
    }
}
