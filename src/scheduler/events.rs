use crate::game::{CollisionType, ColorBonus, FoodEaten};

/// Discrete happenings reported to observers such as audio cues and the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ready countdown finished; ticking begins
    Started,
    AteFood(FoodEaten),
    ColorBonus(ColorBonus),
    GameOver { reason: CollisionType, score: u32 },
    /// Results delay after a game over has elapsed
    ResultsReady { score: u32 },
    Paused,
    Resumed,
}

impl GameEvent {
    /// Whether this event warrants a sound cue
    pub fn is_audible(&self) -> bool {
        matches!(
            self,
            GameEvent::AteFood(_) | GameEvent::ColorBonus(_) | GameEvent::GameOver { .. }
        )
    }
}
