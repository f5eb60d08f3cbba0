//! Fixed-interval driver for the simulation
//!
//! The scheduler owns the `GameState` and is the only thing that mutates it.
//! Callers feed it elapsed wall-clock time and receive discrete events back.

pub mod events;
pub mod tick_scheduler;

pub use events::GameEvent;
pub use tick_scheduler::{Phase, TickScheduler};
