pub mod handler;

pub use handler::{InitialsAction, InputHandler, KeyAction};
