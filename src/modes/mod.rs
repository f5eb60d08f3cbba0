pub mod human;
pub mod scores;

pub use human::{HumanMode, PlayOptions};
pub use scores::print_scores;
