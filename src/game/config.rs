use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the worm
    pub initial_snake_length: usize,

    /// Milliseconds between ticks on keyboard devices
    pub base_tick_ms: u64,
    /// Tick interval multiplier for touch/mobile input
    pub mobile_slowdown: f64,
    /// Countdown between a (re)start and the first tick
    pub ready_delay_ms: u64,
    /// Pause between game over and the results/initials prompt
    pub results_delay_ms: u64,

    /// Total segments gained per fruit
    pub growth_per_food: u32,
    /// Base points per fruit
    pub score_per_food: u32,
    /// Random placement attempts before enumerating free cells
    pub food_spawn_attempts: usize,

    /// Maximum entries kept in the high-score table
    pub high_score_cap: usize,
    /// Length of player initials
    pub initials_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 15,
            grid_height: 23,
            initial_snake_length: 5,
            base_tick_ms: 180,
            mobile_slowdown: 1.25,
            ready_delay_ms: 2000,
            results_delay_ms: 2000,
            growth_per_food: 3,
            score_per_food: 100,
            food_spawn_attempts: 1000,
            high_score_cap: 50,
            initials_len: 3,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(11, 20)
    }

    /// Tick interval, slowed down for mobile-class input
    pub fn tick_interval(&self, mobile: bool) -> Duration {
        if mobile {
            let slowed = (self.base_tick_ms as f64 * self.mobile_slowdown).round() as u64;
            Duration::from_millis(slowed)
        } else {
            Duration::from_millis(self.base_tick_ms)
        }
    }

    pub fn ready_delay(&self) -> Duration {
        Duration::from_millis(self.ready_delay_ms)
    }

    pub fn results_delay(&self) -> Duration {
        Duration::from_millis(self.results_delay_ms)
    }

    /// Validate configuration parameters
    ///
    /// The starting worm sits in the centre column with its head four rows above
    /// the centre and its body trailing upward, so the grid must be tall enough
    /// to hold it.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        let head_row = (self.grid_height / 2) as i64 - 4;
        let tail_row = head_row - (self.initial_snake_length as i64 - 1);
        if head_row < 0 || tail_row < 0 {
            return Err(format!(
                "grid height {} is too small for a worm of length {}",
                self.grid_height, self.initial_snake_length
            ));
        }

        if self.base_tick_ms == 0 {
            return Err("base_tick_ms must be positive".to_string());
        }

        if !(self.mobile_slowdown >= 1.0 && self.mobile_slowdown.is_finite()) {
            return Err(format!(
                "mobile_slowdown must be >= 1.0, got {}",
                self.mobile_slowdown
            ));
        }

        if self.growth_per_food == 0 {
            return Err("growth_per_food must be at least 1".to_string());
        }

        if self.high_score_cap == 0 {
            return Err("high_score_cap must be at least 1".to_string());
        }

        if self.initials_len == 0 {
            return Err("initials_len must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 23);
        assert_eq!(config.initial_snake_length, 5);
        assert_eq!(config.high_score_cap, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_interval() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(false), Duration::from_millis(180));
        assert_eq!(config.tick_interval(true), Duration::from_millis(225));
    }

    #[test]
    fn test_validation() {
        assert!(GameConfig::small().validate().is_ok());
        assert!(GameConfig::new(0, 10).validate().is_err());
        // centre row 3, head row -1
        assert!(GameConfig::new(10, 6).validate().is_err());

        let config = GameConfig {
            mobile_slowdown: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"grid_width": 20}"#).unwrap();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 23);
        assert_eq!(config.base_tick_ms, 180);
    }
}
