use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{
    color::ColorTag,
    config::GameConfig,
    direction::Direction,
    food::FoodSpawner,
    grid::Grid,
    scoring::{self, CollisionType},
    state::{Cell, Food, GameState, Segment, Snake},
};

/// Colour-diversity award granted when a fruit is eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBonus {
    pub distinct_colors: usize,
    pub points: u32,
}

/// Details of a fruit eaten this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodEaten {
    pub position: Cell,
    pub color: ColorTag,
    /// Points added this tick, bonus included
    pub points: u32,
    pub color_bonus: Option<ColorBonus>,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continuing,
    AteFood(FoodEaten),
    GameOver(CollisionType),
}

impl TickOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, TickOutcome::GameOver(_))
    }
}

/// The game engine that handles all simulation rules
pub struct GameEngine {
    config: GameConfig,
    spawner: FoodSpawner,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with a deterministic random sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            spawner: FoodSpawner::new(config.food_spawn_attempts),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.config.grid_width, self.config.grid_height)
    }

    /// Build the opening position.
    ///
    /// The worm is red, lies in the centre column with its head four rows above
    /// the centre and heads down toward the first fruit, which sits on the centre
    /// cell.
    pub fn reset(&mut self) -> GameState {
        let grid = self.grid();
        let center = grid.center();

        let snake = Snake::new(
            center.moved_by(0, -4),
            Direction::Down,
            self.config.initial_snake_length,
            ColorTag::Red,
        );
        let food = Food::new(center, FoodSpawner::pick_color(&mut self.rng, None));

        debug!(
            width = grid.width(),
            height = grid.height(),
            food = food.color.name(),
            "new game state"
        );
        GameState::new(snake, Direction::Down, food, grid)
    }

    /// Advance the simulation by one cell.
    ///
    /// A finished game is left untouched and keeps reporting its collision.
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if let Some(reason) = state.game_over {
            return TickOutcome::GameOver(reason);
        }

        let direction = state.resolve_direction();
        let head_color = state.snake.head_color();
        let new_head = state.snake.head().moved_in_direction(direction);

        if scoring::hits_wall(&state.grid, new_head) {
            return self.end_game(state, CollisionType::Wall);
        }

        let ate_food = scoring::hits_food(&state.food, new_head);
        let mut eaten = None;

        if ate_food {
            let food = state.food;
            let distinct_colors = scoring::distinct_colors_with(&state.snake, food.color);
            let color_bonus = scoring::color_bonus(distinct_colors).map(|points| ColorBonus {
                distinct_colors,
                points,
            });
            let points = self.config.score_per_food + color_bonus.map_or(0, |b| b.points);

            state.score += points;
            // Always targets the latest fruit, replacing any change still waiting
            state.pending_color = Some(food.color);
            state.food = self
                .spawner
                .spawn(&mut self.rng, &state.grid, &state.snake, Some(&food));

            info!(
                color = food.color.name(),
                points,
                score = state.score,
                distinct_colors,
                "food eaten"
            );
            eaten = Some(FoodEaten {
                position: food.position,
                color: food.color,
                points,
                color_bonus,
            });
        }

        state.snake.push_head(Segment::new(new_head, head_color));

        if state.growth_pending > 0 {
            state.growth_pending -= 1;
        } else if !ate_food {
            state.snake.pop_tail();
        }
        if ate_food {
            // The unpopped tail this tick is the first segment of growth
            state.growth_pending = self.config.growth_per_food.saturating_sub(1);
        }

        self.apply_pending_color(state);

        state.ticks += 1;

        if scoring::hits_body(&state.snake, new_head) {
            return self.end_game(state, CollisionType::SelfCollision);
        }

        match eaten {
            Some(food) => TickOutcome::AteFood(food),
            None => TickOutcome::Continuing,
        }
    }

    /// A colour change only shows once the piece behind the head is straight
    fn apply_pending_color(&self, state: &mut GameState) {
        let Some(color) = state.pending_color else {
            return;
        };
        if state.snake.len() >= 3 && state.snake.is_straight_at(1) {
            state.snake.recolor_head(color);
            state.pending_color = None;
        }
    }

    fn end_game(&self, state: &mut GameState, reason: CollisionType) -> TickOutcome {
        if reason == CollisionType::Wall {
            state.ticks += 1;
        }
        state.game_over = Some(reason);
        state.running = false;
        info!(?reason, score = state.score, length = state.snake.len(), "game over");
        TickOutcome::GameOver(reason)
    }
}
