use std::io::Write;

use anyhow::{Context, Result};

use crate::highscores::{HighScoreEntry, HighScoreLedger, ScoreStore};

/// Print the persisted high-score table
pub fn print_scores<S: ScoreStore, W: Write>(ledger: &HighScoreLedger<S>, out: &mut W) -> Result<()> {
    let entries = ledger.entries();
    write_table(&entries, out).context("Failed to print high scores")
}

fn write_table<W: Write>(entries: &[HighScoreEntry], out: &mut W) -> std::io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No high scores yet.");
    }

    writeln!(out, "{:>4}  {:<3}  {:>8}", "#", "WHO", "SCORE")?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{:>4}  {:<3}  {:>8}", i + 1, entry.initials, entry.score)?;
    }
    Ok(())
}
