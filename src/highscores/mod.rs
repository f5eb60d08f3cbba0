//! Local high-score table
//!
//! The table is persisted as a single JSON array, highest score first, and is
//! always read and written as a whole.

pub mod ledger;
pub mod store;

pub use ledger::{HighScoreEntry, HighScoreLedger};
pub use store::{JsonFileStore, MemoryStore, ScoreStore};
