use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::store::ScoreStore;
use crate::game::GameConfig;

/// One row of the high-score table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub initials: String,
    pub score: u32,
}

impl HighScoreEntry {
    pub fn new(initials: impl Into<String>, score: u32) -> Self {
        Self {
            initials: initials.into(),
            score,
        }
    }
}

/// Ordered, capped high-score table.
///
/// Every query re-reads the store. Storage faults are logged and otherwise
/// ignored: a failed read behaves like an empty table and a failed write is a
/// no-op.
pub struct HighScoreLedger<S: ScoreStore> {
    store: S,
    cap: usize,
    initials_len: usize,
}

impl<S: ScoreStore> HighScoreLedger<S> {
    pub fn new(store: S, cap: usize, initials_len: usize) -> Self {
        Self {
            store,
            cap,
            initials_len,
        }
    }

    pub fn from_config(store: S, config: &GameConfig) -> Self {
        Self::new(store, config.high_score_cap, config.initials_len)
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Current table, highest first and at most `cap` long
    pub fn entries(&self) -> Vec<HighScoreEntry> {
        let mut entries = match self.store.load() {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "high scores unavailable");
                Vec::new()
            }
        };
        self.normalize(&mut entries);
        entries
    }

    fn normalize(&self, entries: &mut Vec<HighScoreEntry>) {
        // Stable sort: an equal score entered later ranks below existing ones
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.cap);
    }

    /// True while the table has room, or when `score` beats the lowest entry
    pub fn is_new_high_score(&self, score: u32) -> bool {
        let entries = self.entries();
        if entries.len() < self.cap {
            return true;
        }
        entries
            .iter()
            .map(|e| e.score)
            .min()
            .map_or(true, |min| score > min)
    }

    /// 1-based position `score` would take: entries strictly above it, plus one
    pub fn rank(&self, score: u32) -> usize {
        self.entries().iter().filter(|e| e.score > score).count() + 1
    }

    /// Insert a score and persist the re-sorted, truncated table
    pub fn add(&self, initials: &str, score: u32) -> Vec<HighScoreEntry> {
        let mut entries = self.entries();
        entries.push(HighScoreEntry::new(
            sanitize_initials(initials, self.initials_len),
            score,
        ));
        self.normalize(&mut entries);

        match encode(&entries).and_then(|raw| self.store.save(&raw)) {
            Ok(()) => debug!(count = entries.len(), score, "high scores saved"),
            Err(err) => warn!(error = %err, "failed to save high scores"),
        }

        entries
    }
}

/// Uppercase ASCII letters only, at most `len` of them
pub fn sanitize_initials(raw: &str, len: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .take(len)
        .collect()
}

pub fn encode(entries: &[HighScoreEntry]) -> Result<String> {
    serde_json::to_string(entries).context("Failed to serialize high scores")
}

/// Parse a stored table; malformed input yields an empty table
pub fn decode(raw: &str) -> Vec<HighScoreEntry> {
    match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "discarding malformed high scores");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::store::{JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> Result<Option<String>> {
            Err(anyhow::anyhow!("disk on fire"))
        }

        fn save(&self, _raw: &str) -> Result<()> {
            Err(anyhow::anyhow!("disk on fire"))
        }
    }

    fn ledger() -> HighScoreLedger<MemoryStore> {
        HighScoreLedger::new(MemoryStore::new(), 50, 3)
    }

    #[test]
    fn test_rank_and_new_high_score() {
        let ledger = ledger();
        ledger.add("AAA", 50);
        ledger.add("BBB", 80);
        ledger.add("CCC", 30);

        assert_eq!(ledger.rank(60), 2);
        assert_eq!(ledger.rank(100), 1);
        assert_eq!(ledger.rank(80), 1);
        assert_eq!(ledger.rank(0), 4);
        assert!(ledger.is_new_high_score(10));
    }

    #[test]
    fn test_add_sorts_descending() {
        let ledger = ledger();
        ledger.add("AAA", 50);
        ledger.add("BBB", 80);
        let entries = ledger.add("CCC", 30);

        let scores: Vec<u32> = entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![80, 50, 30]);
        assert_eq!(ledger.entries(), entries);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let ledger = ledger();
        ledger.add("OLD", 100);
        let entries = ledger.add("NEW", 100);

        assert_eq!(entries[0].initials, "OLD");
        assert_eq!(entries[1].initials, "NEW");
    }

    #[test]
    fn test_cap_truncates() {
        let ledger = HighScoreLedger::new(MemoryStore::new(), 3, 3);
        for score in [10, 20, 30, 40] {
            ledger.add("ABC", score);
        }

        let entries = ledger.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.last().map(|e| e.score), Some(20));

        assert!(!ledger.is_new_high_score(20));
        assert!(ledger.is_new_high_score(21));
    }

    #[test]
    fn test_full_table_of_fifty() {
        let ledger = ledger();
        for score in 1..=60 {
            ledger.add("XYZ", score * 10);
        }

        let entries = ledger.entries();
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].score, 600);
        assert_eq!(entries[49].score, 110);
        assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_initials_sanitized() {
        assert_eq!(sanitize_initials("abcd", 3), "ABC");
        assert_eq!(sanitize_initials("a1-b", 3), "AB");
        assert_eq!(sanitize_initials("", 3), "");

        let ledger = ledger();
        let entries = ledger.add("jo", 5);
        assert_eq!(entries[0].initials, "JO");
    }

    #[test]
    fn test_malformed_data_reads_empty() {
        for raw in ["not json", "{\"initials\":\"AAA\"}", "[{\"score\":\"x\"}]", ""] {
            let ledger = HighScoreLedger::new(MemoryStore::with_contents(raw), 50, 3);
            assert!(ledger.entries().is_empty(), "{:?} should read as empty", raw);
            assert!(ledger.is_new_high_score(0));
        }
    }

    #[test]
    fn test_unordered_oversized_data_is_normalized() {
        let raw = r#"[{"initials":"LOW","score":10},{"initials":"TOP","score":900},{"initials":"MID","score":300}]"#;
        let ledger = HighScoreLedger::new(MemoryStore::with_contents(raw), 2, 3);

        assert_eq!(
            ledger.entries(),
            vec![HighScoreEntry::new("TOP", 900), HighScoreEntry::new("MID", 300)]
        );
        assert_eq!(ledger.rank(300), 2);
        assert!(!ledger.is_new_high_score(300));
        assert!(ledger.is_new_high_score(301));
    }

    #[test]
    fn test_store_faults_are_swallowed() {
        let ledger = HighScoreLedger::new(BrokenStore, 50, 3);

        assert!(ledger.entries().is_empty());
        assert_eq!(ledger.rank(10), 1);
        let entries = ledger.add("ABC", 10);
        assert_eq!(entries, vec![HighScoreEntry::new("ABC", 10)]);
    }

    #[test]
    fn test_serialization_round_trip() {
        let entries: Vec<HighScoreEntry> = (0..50)
            .rev()
            .map(|i| HighScoreEntry::new(format!("{}", (b'A' + (i % 26) as u8) as char), i * 7))
            .collect();

        let raw = encode(&entries).unwrap();
        assert_eq!(decode(&raw), entries);
    }

    #[test]
    fn test_wire_format() {
        let raw = encode(&[HighScoreEntry::new("ABC", 120)]).unwrap();
        assert_eq!(raw, r#"[{"initials":"ABC","score":120}]"#);
    }

    #[test]
    fn test_file_backed_ledger_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");

        let first = HighScoreLedger::new(JsonFileStore::new(&path), 50, 3);
        first.add("AAA", 300);

        let second = HighScoreLedger::new(JsonFileStore::new(&path), 50, 3);
        assert_eq!(second.entries(), vec![HighScoreEntry::new("AAA", 300)]);
    }
}
