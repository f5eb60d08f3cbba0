use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    TogglePause,
    /// Start a new run (also used from the title screen)
    Restart,
    Quit,
    None,
}

/// Keys while typing initials for the high-score table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialsAction {
    Letter(char),
    Backspace,
    Submit,
    Skip,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD, with F as a second right key for ASDF players
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => KeyAction::Turn(Direction::Up),
                's' => KeyAction::Turn(Direction::Down),
                'a' => KeyAction::Turn(Direction::Left),
                'd' | 'f' => KeyAction::Turn(Direction::Right),
                'p' => KeyAction::TogglePause,
                'r' | ' ' => KeyAction::Restart,
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },

            KeyCode::Enter => KeyAction::Restart,
            KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    pub fn handle_initials_key(&self, key: KeyEvent) -> InitialsAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return InitialsAction::None;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                InitialsAction::Letter(c.to_ascii_uppercase())
            }
            KeyCode::Backspace => InitialsAction::Backspace,
            KeyCode::Enter => InitialsAction::Submit,
            KeyCode::Esc => InitialsAction::Skip,
            _ => InitialsAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
