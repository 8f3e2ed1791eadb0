//! High score leaderboard (the score gateway)
//!
//! Persisted as JSON, keeps the top 5 scores.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A score is offered for submission when it would place within this rank
pub const TOP_SCORE_RANK: usize = 3;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<HighScoreEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `score` deserves a submission prompt
    pub fn is_top_score(&self, score: u64) -> bool {
        match self.entries.get(TOP_SCORE_RANK - 1) {
            Some(third) => score > third.score,
            None => true,
        }
    }

    /// Record a score. Returns the rank achieved (1-indexed), or None when it
    /// fell off the end of the table.
    pub fn submit(&mut self, name: &str, score: u64) -> Option<usize> {
        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        // Ties keep the earlier entry ahead
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn best_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard; a missing or corrupt file gives an empty one
    pub fn load(path: &Path) -> Self {
        let mut board: Self = persistence::load_or_default(path, "leaderboard");
        board.normalize();
        board
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Re-establish ordering and size after loading hand-edited data
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[u64]) -> Leaderboard {
        let mut b = Leaderboard::new();
        for (i, &s) in scores.iter().enumerate() {
            b.submit(&format!("p{i}"), s);
        }
        b
    }

    #[test]
    fn test_top_score_threshold() {
        assert!(Leaderboard::new().is_top_score(0));
        assert!(board(&[10, 20]).is_top_score(1));

        let b = board(&[30, 20, 10, 5]);
        assert!(b.is_top_score(11));
        assert!(!b.is_top_score(10));
        assert!(!b.is_top_score(6));
    }

    #[test]
    fn test_submit_sorts_and_truncates() {
        let mut b = board(&[5, 50, 20, 40, 10]);
        let scores: Vec<_> = b.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 40, 20, 10, 5]);

        assert_eq!(b.submit("new", 30), Some(3));
        assert_eq!(b.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(b.entries.last().map(|e| e.score), Some(10));

        assert_eq!(b.submit("late", 1), None);
        assert_eq!(b.best_score(), Some(50));
    }

    #[test]
    fn test_ties_keep_earlier_entry_first() {
        let mut b = Leaderboard::new();
        b.submit("first", 10);
        b.submit("second", 10);
        assert_eq!(b.entries[0].name, "first");
    }

    #[test]
    fn test_persisted_as_plain_array() {
        let b = board(&[3]);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, r#"[{"name":"p0","score":3}]"#);
    }

    #[test]
    fn test_load_normalizes() {
        let dir = std::env::temp_dir().join(format!("skyflap-hs-{}", std::process::id()));
        let path = dir.join("leaderboard.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            &path,
            r#"[{"name":"a","score":1},{"name":"b","score":9},{"name":"c","score":2},
                {"name":"d","score":4},{"name":"e","score":3},{"name":"f","score":8}]"#,
        )
        .unwrap();

        let b = Leaderboard::load(&path);
        let scores: Vec<_> = b.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 8, 4, 3, 2]);

        b.save(&path).unwrap();
        assert_eq!(Leaderboard::load(&path), b);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_store_is_empty() {
        let b = Leaderboard::load(Path::new("/nonexistent/skyflap/leaderboard.json"));
        assert!(b.is_empty());
    }
}
