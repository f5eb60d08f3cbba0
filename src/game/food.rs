use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{trace, warn};

use super::color::ColorTag;
use super::grid::Grid;
use super::state::{Cell, Food, Snake};

/// Places fruit on free cells and picks a colour different from the last fruit
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    max_attempts: usize,
}

impl FoodSpawner {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Spawn the next fruit.
    ///
    /// Random sampling is tried first. If every attempt lands on the worm or on
    /// the previous fruit cell, the free cells are enumerated instead. Only a
    /// completely full grid falls back to the last sampled candidate.
    pub fn spawn<R: Rng>(
        &self,
        rng: &mut R,
        grid: &Grid,
        snake: &Snake,
        previous: Option<&Food>,
    ) -> Food {
        let previous_position = previous.map(|f| f.position);
        let position = self.pick_cell(rng, grid, snake, previous_position);
        let color = Self::pick_color(rng, previous.map(|f| f.color));

        trace!(x = position.x, y = position.y, color = color.name(), "food spawned");
        Food::new(position, color)
    }

    /// Uniform choice among the six colours, excluding `previous`
    pub fn pick_color<R: Rng>(rng: &mut R, previous: Option<ColorTag>) -> ColorTag {
        let available: Vec<ColorTag> = ColorTag::ALL
            .iter()
            .copied()
            .filter(|c| Some(*c) != previous)
            .collect();
        let pool: &[ColorTag] = if available.is_empty() {
            &ColorTag::ALL
        } else {
            &available
        };

        *pool.choose(rng).unwrap_or(&ColorTag::Red)
    }

    fn pick_cell<R: Rng>(
        &self,
        rng: &mut R,
        grid: &Grid,
        snake: &Snake,
        previous: Option<Cell>,
    ) -> Cell {
        let mut last_candidate = None;

        for _ in 0..self.max_attempts {
            let candidate = Cell::new(
                rng.gen_range(0..grid.width()) as i32,
                rng.gen_range(0..grid.height()) as i32,
            );
            last_candidate = Some(candidate);

            if Some(candidate) != previous && !snake.occupies(candidate) {
                return candidate;
            }
        }

        let free: Vec<Cell> = grid
            .cells()
            .filter(|c| Some(*c) != previous && !snake.occupies(*c))
            .collect();
        if let Some(cell) = free.choose(rng) {
            return *cell;
        }

        // Only the previous fruit cell may be left once the worm has eaten it
        let unoccupied: Vec<Cell> = grid.cells().filter(|c| !snake.occupies(*c)).collect();
        if let Some(cell) = unoccupied.choose(rng) {
            return *cell;
        }

        warn!("no free cell left for food, reusing last candidate");
        last_candidate.unwrap_or_else(|| grid.center())
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new(1000)
    }
}
