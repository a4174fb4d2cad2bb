//! Tests for the terminal play loop and result reporting glue.

use anyhow::Result;
use async_trait::async_trait;
use noughts_server::{
    GameResult, LeaderboardStore, MemoryBackend, NameError, PlaySession, PlayerRecord,
    ResultReporter,
};
use tokio::io::BufReader;

/// Runs a session over scripted input and returns everything it printed.
async fn play_script(
    script: &str,
    name: Option<&str>,
    reporter: Option<&dyn ResultReporter>,
) -> (String, noughts_server::Scoreboard) {
    let input = BufReader::new(script.as_bytes());
    let mut session = PlaySession::new(input, Vec::<u8>::new())
        .with_player_name(name)
        .expect("Valid player name");
    if let Some(reporter) = reporter {
        session = session.with_reporter(reporter);
    }
    session.run().await.expect("Session failed");
    let scores = session.scores();
    let output = String::from_utf8(session.into_output()).unwrap();
    (output, scores)
}

// X center, X top-center, X top-right, X middle-left: the computer answers
// top-left, bottom-center, bottom-left, then completes the bottom row.
const LOSING_LINE: &str = "5\n2\n3\n4\n";

#[tokio::test]
async fn test_computer_wins_and_loss_is_reported() {
    let store = LeaderboardStore::new(MemoryBackend::new());
    let script = format!("{LOSING_LINE}q\n");

    let (output, scores) = play_script(&script, Some("Ann"), Some(&store)).await;

    assert!(output.contains("Computer plays 1"), "{output}");
    assert!(output.contains("Computer wins!"), "{output}");
    assert_eq!(*scores.computer(), 1);
    assert_eq!(*scores.player(), 0);
    assert!(output.contains("Recorded loss for Ann"), "{output}");

    let top = store.query_top(10).await.unwrap();
    assert_eq!(top, vec![PlayerRecord::with_counts("Ann", 0, 1, 0)]);
}

#[tokio::test]
async fn test_reset_allows_another_game() {
    let store = LeaderboardStore::new(MemoryBackend::new());
    let script = format!("{LOSING_LINE}9\nr\n{LOSING_LINE}q\n");

    let (output, scores) = play_script(&script, Some("ann"), Some(&store)).await;

    assert!(output.contains("Game over. Press r to play again."));
    assert_eq!(*scores.computer(), 2);
    assert!(output.contains("Final score - You: 0  Computer: 2  Draws: 0"));
    let top = store.query_top(10).await.unwrap();
    assert_eq!(*top[0].losses(), 2);
}

#[tokio::test]
async fn test_no_report_without_name() {
    let store = LeaderboardStore::new(MemoryBackend::new());
    let script = format!("{LOSING_LINE}q\n");

    let (output, _) = play_script(&script, None, Some(&store)).await;

    assert!(output.contains("Computer wins!"));
    assert!(!output.contains("Recorded"));
    assert!(store.query_top(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_input_keeps_game_going() {
    let (output, scores) = play_script("5\n5\n1\nzzz\n0\nq\n", None, None).await;
    assert!(output.contains("Invalid move: Center is already occupied"), "{output}");
    assert!(output.contains("Invalid move: Top-left is already occupied"), "{output}");
    assert!(output.contains("Enter a cell number 1-9"));
    assert_eq!(scores, Default::default());
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let (output, _) = play_script("5\n", None, None).await;
    assert!(output.contains("Final score"));
}

/// Reporter that is always unreachable.
struct OfflineReporter;

#[async_trait]
impl ResultReporter for OfflineReporter {
    async fn report(&self, _player_name: &str, _result: GameResult) -> Result<PlayerRecord> {
        anyhow::bail!("connection refused")
    }

    async fn leaderboard(&self) -> Result<Vec<PlayerRecord>> {
        anyhow::bail!("connection refused")
    }
}

#[tokio::test]
async fn test_reporting_failure_does_not_disturb_game() {
    let script = format!("{LOSING_LINE}l\nr\n5\nq\n");
    let (output, scores) = play_script(&script, Some("Ann"), Some(&OfflineReporter)).await;

    assert!(output.contains("Failed to submit score"));
    assert!(output.contains("Failed to load leaderboard"));
    assert!(output.contains("Computer plays 1"));
    assert_eq!(*scores.computer(), 1);
}

#[tokio::test]
async fn test_leaderboard_command_shows_table() {
    let store = LeaderboardStore::new(MemoryBackend::with_records(vec![
        PlayerRecord::with_counts("Ann", 3, 0, 1),
        PlayerRecord::with_counts("Bo", 1, 2, 0),
    ]));
    let (output, _) = play_script("l\nq\n", Some("bo"), Some(&store)).await;
    assert!(output.contains("Rank"));
    assert!(output.contains("Bo (You)"));
}

#[tokio::test]
async fn test_entered_name_is_trimmed_before_reporting() {
    let store = LeaderboardStore::new(MemoryBackend::new());
    let script = format!("{LOSING_LINE}q\n");

    let (output, _) = play_script(&script, Some("  Ann  "), Some(&store)).await;

    assert!(output.contains("Playing as Ann\n"), "{output}");
    let top = store.query_top(10).await.unwrap();
    assert_eq!(top, vec![PlayerRecord::with_counts("Ann", 0, 1, 0)]);
}

#[test]
fn test_unusable_names_are_refused_by_the_client() {
    let session = || PlaySession::new(BufReader::new(&b""[..]), Vec::<u8>::new());

    let err = session().with_player_name(Some("   ")).err();
    assert_eq!(err, Some(NameError::Empty));
    let long = "n".repeat(21);
    let err = session().with_player_name(Some(long.as_str())).err();
    assert_eq!(err, Some(NameError::TooLong));
    assert!(session().with_player_name(None).is_ok());
}
