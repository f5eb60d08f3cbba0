//! Core simulation for the worm game
//!
//! This module contains all the game rules without any I/O or rendering dependencies.
//! Renderers and input layers only read `GameState` and queue directions.

pub mod color;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod scoring;
pub mod state;

// Re-export commonly used types
pub use color::ColorTag;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{ColorBonus, FoodEaten, GameEngine, TickOutcome};
pub use food::FoodSpawner;
pub use grid::Grid;
pub use scoring::CollisionType;
pub use state::{Cell, Food, GameState, Gradient, Segment, Snake};
