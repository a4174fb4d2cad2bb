//! Leaderboard ordering.

use std::cmp::Ordering;

use crate::leaderboard::PlayerRecord;

/// Compares two records for display: more wins first, then fewer games.
pub fn compare_rank(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    b.wins()
        .cmp(a.wins())
        .then_with(|| a.total_games().cmp(b.total_games()))
}

/// Sorts records by [`compare_rank`] and keeps the first `limit`.
///
/// The sort is stable, so records that compare equal keep their
/// storage order.
pub fn rank(mut records: Vec<PlayerRecord>, limit: usize) -> Vec<PlayerRecord> {
    records.sort_by(compare_rank);
    records.truncate(limit);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[PlayerRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name().as_str()).collect()
    }

    #[test]
    fn test_wins_then_fewer_games() {
        let records = vec![
            PlayerRecord::with_counts("C", 4, 0, 0),
            PlayerRecord::with_counts("B", 5, 7, 0),
            PlayerRecord::with_counts("A", 5, 5, 0),
        ];
        assert_eq!(names(&rank(records, 10)), ["A", "B", "C"]);
    }

    #[test]
    fn test_full_ties_keep_storage_order() {
        let records = vec![
            PlayerRecord::with_counts("first", 2, 1, 0),
            PlayerRecord::with_counts("second", 2, 0, 1),
            PlayerRecord::with_counts("third", 2, 1, 0),
        ];
        assert_eq!(names(&rank(records, 10)), ["first", "second", "third"]);
    }

    #[test]
    fn test_limit() {
        let records: Vec<_> = (0..15)
            .map(|i| PlayerRecord::with_counts(format!("p{i}"), i, 0, 0))
            .collect();
        let top = rank(records, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].name(), "p14");
        assert!(rank(Vec::new(), 10).is_empty());
        assert_eq!(rank(vec![PlayerRecord::new("solo")], 10).len(), 1);
    }
}
