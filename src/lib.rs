//! Fruit Worm - a grid worm arcade game
//!
//! This library provides:
//! - Core simulation rules (game module)
//! - Fixed-interval tick driver with ready/pause/game-over lifecycle (scheduler module)
//! - Persistent high-score table (highscores module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Execution modes (modes module)

pub mod game;
pub mod highscores;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
