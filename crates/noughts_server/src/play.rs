//! Line-oriented terminal game against the computer.
//!
//! The human is X and always opens; the computer answers as O.

use anyhow::Result;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_engine::{Game, Mark, Outcome, Position};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use crate::reporter::{ResultReporter, result_for_outcome};
use crate::table::render_leaderboard;

const HELP: &str = "Enter a cell number 1-9, r to reset, l for the leaderboard, q to quit.";

/// Longest name the terminal client accepts, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// A player name the terminal client refuses to play under.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum NameError {
    /// Nothing left after trimming.
    #[display("Please enter a valid name")]
    Empty,
    /// Longer than [`MAX_NAME_LEN`] characters after trimming.
    #[display("Name must be {} characters or less", MAX_NAME_LEN)]
    TooLong,
}

/// Trims a name entered by the player and checks its length.
pub fn normalize_player_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(NameError::TooLong);
    }
    Ok(name.to_string())
}

/// Running tally of finished games in this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct Scoreboard {
    player: u32,
    computer: u32,
    draws: u32,
}

impl Scoreboard {
    /// Counts a finished game. In-progress outcomes are ignored.
    pub fn tally(&mut self, outcome: Outcome) {
        match outcome.winner() {
            Some(Mark::X) => self.player += 1,
            Some(Mark::O) => self.computer += 1,
            None if outcome.is_terminal() => self.draws += 1,
            None => {}
        }
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You: {}  Computer: {}  Draws: {}",
            self.player, self.computer, self.draws
        )
    }
}

/// One terminal session: a game, the session tally and the I/O streams.
pub struct PlaySession<'a, R, W> {
    game: Game,
    scores: Scoreboard,
    player_name: Option<String>,
    reporter: Option<&'a dyn ResultReporter>,
    input: R,
    output: W,
}

impl<'a, R, W> PlaySession<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a session reading commands from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            game: Game::new(),
            scores: Scoreboard::default(),
            player_name: None,
            reporter: None,
            input,
            output,
        }
    }

    /// Sets the name results are submitted under.
    ///
    /// # Errors
    ///
    /// Returns [`NameError`] if the name is blank or too long.
    pub fn with_player_name(mut self, name: Option<&str>) -> Result<Self, NameError> {
        self.player_name = name.map(normalize_player_name).transpose()?;
        Ok(self)
    }

    /// Sets where finished games are reported.
    pub fn with_reporter(mut self, reporter: &'a dyn ResultReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Session tally so far.
    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Consumes the session and returns the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    fn status_line(&self) -> &'static str {
        match self.game.state().outcome() {
            Outcome::InProgress => "Your turn (X)",
            Outcome::Win { mark: Mark::X, .. } => "You win!",
            Outcome::Win { mark: Mark::O, .. } => "Computer wins!",
            Outcome::Draw => "It's a draw!",
        }
    }

    async fn show_board(&mut self) -> Result<()> {
        let text = format!(
            "\n{}\n{}",
            self.game.state().board().display(),
            self.status_line()
        );
        self.say(&text).await
    }

    /// Runs until `q` or end of input.
    #[instrument(skip(self), fields(player = ?self.player_name))]
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting terminal session");
        self.say(HELP).await?;
        if let Some(name) = &self.player_name {
            let greeting = format!("Playing as {name}");
            self.say(&greeting).await?;
        }
        self.show_board().await?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line).await? == 0 {
                debug!("End of input");
                break;
            }
            match line.trim() {
                "" => continue,
                "q" | "quit" => break,
                "r" | "reset" => {
                    self.game.reset();
                    self.show_board().await?;
                }
                "l" | "leaderboard" => self.show_leaderboard().await?,
                "h" | "help" => self.say(HELP).await?,
                cell => self.human_move(cell).await?,
            }
        }

        let summary = format!("Final score - {}", self.scores);
        self.say(&summary).await?;
        Ok(())
    }

    async fn human_move(&mut self, cell: &str) -> Result<()> {
        if !self.game.state().is_active() {
            return self.say("Game over. Press r to play again.").await;
        }
        let Some(pos) = Position::from_cell_number(cell) else {
            return self.say(HELP).await;
        };

        match self.game.place(pos, Mark::X) {
            Ok(Outcome::InProgress) => {}
            Ok(outcome) => return self.finish(outcome).await,
            Err(e) => {
                let msg = format!("Invalid move: {e}");
                return self.say(&msg).await;
            }
        }

        let (reply, outcome) = self.game.play_computer_move()?;
        let msg = format!("Computer plays {}", reply.to_index() + 1);
        self.say(&msg).await?;
        if outcome.is_terminal() {
            self.finish(outcome).await
        } else {
            self.show_board().await
        }
    }

    async fn finish(&mut self, outcome: Outcome) -> Result<()> {
        self.scores.tally(outcome);
        self.show_board().await?;
        let tally = self.scores.to_string();
        self.say(&tally).await?;

        let (Some(name), Some(reporter), Some(result)) = (
            self.player_name.clone(),
            self.reporter,
            result_for_outcome(outcome),
        ) else {
            return Ok(());
        };
        match reporter.report(&name, result).await {
            Ok(record) => {
                info!(name = %record.name(), result = %result, "Result reported");
                let msg = format!(
                    "Recorded {result} for {} ({} games, {}% won)",
                    record.name(),
                    record.total_games(),
                    record.win_rate()
                );
                self.say(&msg).await
            }
            Err(e) => {
                warn!(error = %e, "Failed to submit score");
                self.say("Failed to submit score").await
            }
        }
    }

    async fn show_leaderboard(&mut self) -> Result<()> {
        let Some(reporter) = self.reporter else {
            return self.say("No leaderboard server configured").await;
        };
        match reporter.leaderboard().await {
            Ok(records) => {
                let table = render_leaderboard(&records, self.player_name.as_deref());
                self.say(&table).await
            }
            Err(e) => {
                warn!(error = %e, "Failed to load leaderboard");
                self.say("Failed to load leaderboard").await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_engine::WinLine;

    #[test]
    fn test_scoreboard_tally() {
        let line = WinLine::ALL[0];
        let mut scores = Scoreboard::default();
        scores.tally(Outcome::Win { mark: Mark::X, line });
        scores.tally(Outcome::Win { mark: Mark::O, line });
        scores.tally(Outcome::Win { mark: Mark::O, line });
        scores.tally(Outcome::Draw);
        scores.tally(Outcome::InProgress);
        assert_eq!(*scores.player(), 1);
        assert_eq!(*scores.computer(), 2);
        assert_eq!(*scores.draws(), 1);
        assert_eq!(scores.to_string(), "You: 1  Computer: 2  Draws: 1");
    }

    #[test]
    fn test_normalize_player_name() {
        assert_eq!(normalize_player_name("  Ann "), Ok("Ann".to_string()));
        assert_eq!(normalize_player_name("   "), Err(NameError::Empty));
        assert_eq!(normalize_player_name(""), Err(NameError::Empty));
        assert_eq!(
            normalize_player_name(&"x".repeat(20)),
            Ok("x".repeat(20))
        );
        assert_eq!(
            normalize_player_name(&"x".repeat(21)),
            Err(NameError::TooLong)
        );
        assert_eq!(
            NameError::TooLong.to_string(),
            "Name must be 20 characters or less"
        );
    }
}
