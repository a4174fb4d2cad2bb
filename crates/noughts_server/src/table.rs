//! Plain-text leaderboard table.

use crate::leaderboard::PlayerRecord;

/// Renders ranked records, marking `current_player`'s row with "(You)".
pub fn render_leaderboard(records: &[PlayerRecord], current_player: Option<&str>) -> String {
    if records.is_empty() {
        return "No players yet. Be the first to play!".to_string();
    }

    let mut out = format!(
        "{:<5} {:<26} {:>5} {:>6} {:>6} {:>8}\n",
        "Rank", "Player", "Wins", "Losses", "Games", "Win Rate"
    );
    for (i, record) in records.iter().enumerate() {
        let is_current = current_player.is_some_and(|name| record.matches_name(name));
        let name = if is_current {
            format!("{} (You)", record.name())
        } else {
            record.name().clone()
        };
        out.push_str(&format!(
            "{:<5} {:<26} {:>5} {:>6} {:>6} {:>7}%\n",
            i + 1,
            name,
            record.wins(),
            record.losses(),
            record.total_games(),
            record.win_rate()
        ));
    }
    out
}
