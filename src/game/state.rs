use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::color::ColorTag;
use super::direction::Direction;
use super::grid::Grid;
use super::scoring::{self, CollisionType};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Direction of the step from self to an adjacent cell, None if not adjacent
    pub fn direction_to(&self, other: Cell) -> Option<Direction> {
        Direction::from_delta(other.x - self.x, other.y - self.y)
    }
}

/// Colour blend drawn across a body piece where the worm changed colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub from_color: ColorTag,
    pub to_color: ColorTag,
}

/// One occupied cell of the worm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: Cell,
    pub color: ColorTag,
    pub pending_gradient: Option<Gradient>,
}

impl Segment {
    pub fn new(position: Cell, color: ColorTag) -> Self {
        Self {
            position,
            color,
            pending_gradient: None,
        }
    }
}

/// The worm. Index 0 is the head, the last index the tail.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Segment>,
}

impl Snake {
    /// Create a straight worm of one colour with the body trailing behind `head`
    pub fn new(head: Cell, direction: Direction, length: usize, color: ColorTag) -> Self {
        let (dx, dy) = direction.delta();
        let segments = (0..length.max(1) as i32)
            .map(|i| Segment::new(head.moved_by(-dx * i, -dy * i), color))
            .collect();

        Self { segments }
    }

    /// Build a worm from explicit segments, head first
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.segments[0].position
    }

    pub fn head_color(&self) -> ColorTag {
        self.segments[0].color
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.segments[self.segments.len() - 1].position
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Segment] {
        &self.segments[1..]
    }

    /// Check if a cell collides with the body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body_segments().iter().any(|s| s.position == cell)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.iter().any(|s| s.position == cell)
    }

    pub fn colors(&self) -> HashSet<ColorTag> {
        self.segments.iter().map(|s| s.color).collect()
    }

    pub fn push_head(&mut self, segment: Segment) {
        self.segments.insert(0, segment);
    }

    pub fn pop_tail(&mut self) -> Option<Segment> {
        if self.segments.len() > 1 {
            self.segments.pop()
        } else {
            None
        }
    }

    /// True when the piece at `index` has the same incoming and outgoing direction
    pub fn is_straight_at(&self, index: usize) -> bool {
        if index == 0 || index + 1 >= self.segments.len() {
            return false;
        }
        let prev = self.segments[index - 1].position;
        let curr = self.segments[index].position;
        let next = self.segments[index + 1].position;

        match (prev.direction_to(curr), curr.direction_to(next)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Recolour the head and mark the piece behind it as the colour boundary
    pub fn recolor_head(&mut self, color: ColorTag) {
        let old = self.segments[0].color;
        self.segments[0].color = color;
        if let Some(neck) = self.segments.get_mut(1) {
            neck.pending_gradient = Some(Gradient {
                from_color: old,
                to_color: color,
            });
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A fruit waiting on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Cell,
    pub color: ColorTag,
}

impl Food {
    pub fn new(position: Cell, color: ColorTag) -> Self {
        Self { position, color }
    }
}

/// Complete simulation state. Owned by the scheduler; renderers only borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub queued_direction: Direction,
    pub food: Food,
    pub grid: Grid,
    pub score: u32,
    pub growth_pending: u32,
    /// Colour the head switches to once a straight run appears behind it
    pub pending_color: Option<ColorTag>,
    pub running: bool,
    pub paused: bool,
    pub game_over: Option<CollisionType>,
    pub ticks: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, direction: Direction, food: Food, grid: Grid) -> Self {
        Self {
            snake,
            direction,
            queued_direction: direction,
            food,
            grid,
            score: 0,
            growth_pending: 0,
            pending_color: None,
            running: false,
            paused: false,
            game_over: None,
            ticks: 0,
        }
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        self.grid.in_bounds(cell)
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
    }

    pub fn is_alive(&self) -> bool {
        self.game_over.is_none()
    }

    pub fn color_change_pending(&self) -> bool {
        self.pending_color.is_some()
    }

    /// Whether a turn to `direction` is legal from the committed direction.
    ///
    /// Reversals and same-axis inputs are rejected, as are turns whose next head
    /// cell is already part of the body.
    pub fn can_turn(&self, direction: Direction) -> bool {
        self.direction.changes_axis(direction) && !self.would_collide_immediately(direction)
    }

    pub fn would_collide_immediately(&self, direction: Direction) -> bool {
        let next = self.snake.head().moved_in_direction(direction);
        scoring::hits_body(&self.snake, next)
    }

    /// Queue a turn for the next tick. Last accepted write wins; same-axis input is ignored.
    ///
    /// A turn into the body stays queued and is retried on each tick until it clears.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if !self.direction.changes_axis(direction) {
            return false;
        }
        self.queued_direction = direction;
        true
    }

    /// Commit the queued turn if it is still legal against the current direction
    pub fn resolve_direction(&mut self) -> Direction {
        let queued = self.queued_direction;
        if queued != self.direction && self.can_turn(queued) {
            self.direction = queued;
        }
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(snake: Snake, direction: Direction) -> GameState {
        GameState::new(
            snake,
            direction,
            Food::new(Cell::new(0, 0), ColorTag::Red),
            Grid::new(15, 23),
        )
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.manhattan_distance(Cell::new(7, 2)), 5);
        assert_eq!(cell.direction_to(Cell::new(5, 6)), Some(Direction::Down));
        assert_eq!(cell.direction_to(Cell::new(6, 6)), None);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(7, 7), Direction::Down, 5, ColorTag::Red);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Cell::new(7, 7));
        assert_eq!(snake.tail(), Cell::new(7, 3));
        assert!(snake.segments().iter().all(|s| s.color == ColorTag::Red));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3, ColorTag::Red);
        assert!(!snake.collides_with_body(Cell::new(5, 5))); // head
        assert!(snake.collides_with_body(Cell::new(4, 5)));
        assert!(!snake.collides_with_body(Cell::new(10, 10)));
        assert!(snake.occupies(Cell::new(5, 5)));
    }

    #[test]
    fn test_straight_detection() {
        let straight = Snake::new(Cell::new(5, 5), Direction::Right, 3, ColorTag::Red);
        assert!(straight.is_straight_at(1));
        assert!(!straight.is_straight_at(0));
        assert!(!straight.is_straight_at(2));

        let corner = Snake::from_segments(vec![
            Segment::new(Cell::new(5, 4), ColorTag::Red),
            Segment::new(Cell::new(5, 5), ColorTag::Red),
            Segment::new(Cell::new(4, 5), ColorTag::Red),
        ]);
        assert!(!corner.is_straight_at(1));
    }

    #[test]
    fn test_recolor_head_marks_neck() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3, ColorTag::Red);
        snake.recolor_head(ColorTag::Green);

        assert_eq!(snake.head_color(), ColorTag::Green);
        assert_eq!(snake.segments()[1].color, ColorTag::Red);
        assert_eq!(
            snake.segments()[1].pending_gradient,
            Some(Gradient {
                from_color: ColorTag::Red,
                to_color: ColorTag::Green
            })
        );
        assert_eq!(snake.segments()[2].pending_gradient, None);
    }

    #[test]
    fn test_pop_tail_keeps_head() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 1, ColorTag::Red);
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_queue_rejects_reversal() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3, ColorTag::Red);
        let mut state = state_with(snake, Direction::Right);

        assert!(!state.queue_direction(Direction::Left));
        assert_eq!(state.queued_direction, Direction::Right);
        assert_eq!(state.resolve_direction(), Direction::Right);
    }

    #[test]
    fn test_queue_same_direction_is_noop() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3, ColorTag::Red);
        let mut state = state_with(snake, Direction::Right);
        let before = state.clone();

        for _ in 0..3 {
            state.queue_direction(Direction::Right);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_queue_last_write_wins() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3, ColorTag::Red);
        let mut state = state_with(snake, Direction::Right);

        assert!(state.queue_direction(Direction::Up));
        assert!(state.queue_direction(Direction::Down));
        assert_eq!(state.resolve_direction(), Direction::Down);
        assert_eq!(state.direction, Direction::Down);
    }

    #[test]
    fn test_turn_into_body_stays_queued() {
        // Head at (5,5) moving left, body curls underneath it
        let snake = Snake::from_segments(vec![
            Segment::new(Cell::new(5, 5), ColorTag::Red),
            Segment::new(Cell::new(6, 5), ColorTag::Red),
            Segment::new(Cell::new(6, 6), ColorTag::Red),
            Segment::new(Cell::new(5, 6), ColorTag::Red),
            Segment::new(Cell::new(4, 6), ColorTag::Red),
        ]);
        let mut state = state_with(snake, Direction::Left);

        assert!(state.queue_direction(Direction::Down));
        assert_eq!(state.resolve_direction(), Direction::Left);
        assert_eq!(state.queued_direction, Direction::Down);

        assert!(state.queue_direction(Direction::Up));
        assert_eq!(state.resolve_direction(), Direction::Up);
    }

    #[test]
    fn test_resolve_revalidates_against_current_direction() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3, ColorTag::Red);
        let mut state = state_with(snake, Direction::Right);
        // A stale queued reversal must never be committed
        state.queued_direction = Direction::Left;

        assert_eq!(state.resolve_direction(), Direction::Right);
    }
}
