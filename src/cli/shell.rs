//! Interactive menu shell.
//!
//! Line-oriented prompt loop over any `BufRead`/`Write` pair. Malformed
//! input is reported and asked for again; end of input ends the shell
//! the same way the "Quit" option does.

use std::io::{BufRead, Write};

use anyhow::Result;
use colored::Colorize;

use boardgame_log::error::{StoreError, ValidationError};
use boardgame_log::input::{self, MenuChoice, ParticipantInput, STOP_SENTINEL};
use boardgame_log::session_builder::{SessionBuilder, SessionDraft};
use boardgame_log::storage::{BoardGameId, Database, PlayerId};

use crate::cli::format::{write_player_results, write_statistics};

const MENU: &str = "
Select an option:
1. Add player
2. Add board game
3. Add game session
4. Show statistics
5. Show player results
6. Quit
";

/// The input stream ended while a prompt was waiting.
#[derive(Debug, thiserror::Error)]
#[error("Input closed")]
pub struct InputClosed;

/// The interactive shell, bound to one open database.
pub struct Shell<'db, R, W> {
    db: &'db Database,
    input: R,
    output: W,
}

impl<'db, R: BufRead, W: Write> Shell<'db, R, W> {
    pub fn new(db: &'db Database, input: R, output: W) -> Self {
        Self { db, input, output }
    }

    /// Runs the menu loop until "Quit" or end of input.
    ///
    /// A store error inside an action is reported and the menu is shown
    /// again; only I/O failures on the shell's own streams end it early.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let outcome = self.read_line(MENU).and_then(|line| match input::parse_menu_choice(&line) {
                Ok(MenuChoice::Quit) => Ok(false),
                Ok(choice) => self.dispatch(choice).map(|()| true),
                Err(e) => {
                    writeln!(self.output, "{}", e.to_string().yellow())?;
                    Ok(true)
                }
            });

            match outcome {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is::<InputClosed>() => {
                    tracing::debug!("Input closed, leaving shell");
                    break;
                }
                Err(e) => match e.downcast::<StoreError>() {
                    Ok(err) => {
                        tracing::warn!("Menu action failed: {}", err);
                        self.error(&err.to_string())?;
                    }
                    Err(e) => return Err(e),
                },
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::AddPlayer => self.add_player(),
            MenuChoice::AddBoardGame => self.add_board_game(),
            MenuChoice::AddGameSession => self.add_game_session(),
            MenuChoice::ShowStatistics => self.show_statistics(),
            MenuChoice::ShowPlayerResults => self.show_player_results(),
            MenuChoice::Quit => Ok(()),
        }
    }

    // ==================== Actions ====================

    fn add_player(&mut self) -> Result<()> {
        let name = self.confirmed_name("Enter player name: ")?;
        let id = self.db.add_player(&name)?;
        self.success(&format!("Player {name} added successfully! (id {id})"))
    }

    fn add_board_game(&mut self) -> Result<()> {
        let name = self.confirmed_name("Enter board game name: ")?;
        let id = self.db.add_board_game(&name)?;
        self.success(&format!("Board game {name} added successfully! (id {id})"))
    }

    fn add_game_session(&mut self) -> Result<()> {
        let builder = SessionBuilder::new(self.db);

        let draft = loop {
            let score = self.read_line("Enter score: ")?;
            let date = self.prompt_until("Enter date (YYYY-MM-DD): ", input::parse_date)?;
            let boardgame_id = loop {
                let id = self.prompt_until("Enter board game id: ", input::parse_id::<BoardGameId>)?;
                match builder.resolve_board_game(id) {
                    Ok(id) => break id,
                    Err(e) => self.recoverable(e, "Board game ID not found. Please enter a valid ID.")?,
                }
            };

            writeln!(self.output, "\nYou entered:")?;
            writeln!(self.output, "Score: {score}")?;
            writeln!(self.output, "Date: {date}")?;
            writeln!(self.output, "Board game id: {boardgame_id}")?;
            writeln!(self.output)?;

            if self.confirm()? {
                break SessionDraft {
                    score,
                    date: Some(date),
                    boardgame_id,
                };
            }
        };

        let mut session = builder.create(draft)?;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Add players to the game session")?;
            writeln!(
                self.output,
                "If you want to stop adding players, enter '{STOP_SENTINEL}'."
            )?;
            writeln!(self.output)?;

            let answer = self.prompt_until("Enter player id: ", input::parse_participant::<PlayerId>)?;
            let ParticipantInput::Add(player_id) = answer else {
                break;
            };
            match session.add_participant(player_id) {
                Ok(()) => {
                    let count = session.participants().len();
                    self.success(&format!("Player added successfully! ({count} in this session)"))?
                }
                Err(e) => self.recoverable(
                    e,
                    "This player ID does not exist or it is already in this game session.",
                )?,
            }
        }

        let summary = session.finish();
        writeln!(self.output)?;
        self.success(&format!(
            "Game session {} added successfully with {} player(s)!",
            summary.session_id,
            summary.participants.len()
        ))
    }

    fn show_statistics(&mut self) -> Result<()> {
        let boardgame_name = loop {
            let name = self.prompt_until("Enter board game name: ", input::parse_name)?;
            if self.db.board_game_name_exists(&name)? {
                break name;
            }
            self.error("Board game not found. Please enter a valid board game name.")?;
        };
        let date = self.prompt_until("Enter date (YYYY-MM-DD): ", input::parse_date)?;

        let stats = self.db.session_statistics(&boardgame_name, date)?;
        write_statistics(&mut self.output, &stats)?;
        Ok(())
    }

    fn show_player_results(&mut self) -> Result<()> {
        let player_id = self.prompt_until("Enter player id: ", input::parse_id::<PlayerId>)?;
        let results = self.db.player_results(player_id)?;
        write_player_results(&mut self.output, &results)?;
        Ok(())
    }

    // ==================== Prompts ====================

    /// Prints `prompt` and reads one line without its line ending.
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Asks until `parse` accepts the answer.
    fn prompt_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }

    fn confirm(&mut self) -> Result<bool> {
        let answer = self.read_line("Is the input correct [Y/n] ")?;
        Ok(input::parse_confirmation(&answer))
    }

    /// Asks for a name, echoes it and repeats until confirmed.
    fn confirmed_name(&mut self, prompt: &str) -> Result<String> {
        loop {
            let name = self.prompt_until(prompt, input::parse_name)?;
            writeln!(self.output, "\nYou entered:")?;
            writeln!(self.output, "Name: {name}")?;
            writeln!(self.output)?;
            if self.confirm()? {
                return Ok(name);
            }
        }
    }

    /// Reports a recoverable store error, or hands any other back to the menu loop.
    fn recoverable(&mut self, err: StoreError, message: &str) -> Result<()> {
        if !err.is_recoverable() {
            return Err(err.into());
        }
        tracing::debug!("Recoverable error: {}", err);
        self.error(&format!("{message} ({err})"))
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{} {}", "Error:".red(), message)?;
        Ok(())
    }

    fn success(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message.green())?;
        Ok(())
    }
}
