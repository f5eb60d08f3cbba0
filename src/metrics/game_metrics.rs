use std::time::{Duration, Instant};

use crate::game::FoodEaten;

/// Per-session statistics shown alongside the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    pub fruit_eaten: u32,
    pub bonus_points: u32,
    paused_since: Option<Instant>,
    paused_total: Duration,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            fruit_eaten: 0,
            bonus_points: 0,
            paused_since: None,
            paused_total: Duration::ZERO,
        }
    }

    /// Refresh the run clock; time spent paused is not counted
    pub fn update(&mut self) {
        if self.paused_since.is_some() {
            return;
        }
        self.elapsed_time = self.start_time.elapsed().saturating_sub(self.paused_total);
    }

    pub fn on_pause(&mut self) {
        self.update();
        self.paused_since.get_or_insert_with(Instant::now);
    }

    pub fn on_resume(&mut self) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += since.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.paused_since = None;
        self.paused_total = Duration::ZERO;
        self.fruit_eaten = 0;
        self.bonus_points = 0;
    }

    pub fn on_food(&mut self, eaten: &FoodEaten) {
        self.fruit_eaten += 1;
        if let Some(bonus) = eaten.color_bonus {
            self.bonus_points += bonus.points;
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
