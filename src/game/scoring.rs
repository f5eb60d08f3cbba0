//! Collision predicates and score arithmetic used by the tick.

use std::collections::HashSet;

use super::color::ColorTag;
use super::grid::Grid;
use super::state::{Cell, Food, Snake};

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the grid
    Wall,
    /// Head ran into the body
    SelfCollision,
}

/// Distinct-colour count to bonus points
const COLOR_BONUS_TABLE: [(usize, u32); 4] = [(3, 20), (4, 50), (5, 75), (6, 100)];

pub fn hits_wall(grid: &Grid, cell: Cell) -> bool {
    !grid.in_bounds(cell)
}

/// Whether `cell` overlaps any segment other than the head
pub fn hits_body(snake: &Snake, cell: Cell) -> bool {
    snake.collides_with_body(cell)
}

pub fn hits_food(food: &Food, cell: Cell) -> bool {
    food.position == cell
}

/// Bonus for holding `distinct_colors` different colours, if any
pub fn color_bonus(distinct_colors: usize) -> Option<u32> {
    COLOR_BONUS_TABLE
        .iter()
        .find(|(count, _)| *count == distinct_colors)
        .map(|(_, bonus)| *bonus)
}

/// Number of distinct colours in the worm once `incoming` is added
pub fn distinct_colors_with(snake: &Snake, incoming: ColorTag) -> usize {
    let mut colors: HashSet<ColorTag> = snake.colors();
    colors.insert(incoming);
    colors.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::state::Segment;

    #[test]
    fn test_color_bonus_table() {
        assert_eq!(color_bonus(0), None);
        assert_eq!(color_bonus(1), None);
        assert_eq!(color_bonus(2), None);
        assert_eq!(color_bonus(3), Some(20));
        assert_eq!(color_bonus(4), Some(50));
        assert_eq!(color_bonus(5), Some(75));
        assert_eq!(color_bonus(6), Some(100));
        assert_eq!(color_bonus(7), None);
    }

    #[test]
    fn test_distinct_colors_counts_incoming() {
        let snake = Snake::from_segments(vec![
            Segment::new(Cell::new(3, 3), ColorTag::Red),
            Segment::new(Cell::new(2, 3), ColorTag::Orange),
            Segment::new(Cell::new(1, 3), ColorTag::Orange),
        ]);
        assert_eq!(distinct_colors_with(&snake, ColorTag::Green), 3);
        assert_eq!(distinct_colors_with(&snake, ColorTag::Red), 2);
    }

    #[test]
    fn test_predicates() {
        let grid = Grid::new(10, 10);
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3, ColorTag::Red);
        let food = Food::new(Cell::new(6, 5), ColorTag::Cyan);

        assert!(hits_wall(&grid, Cell::new(10, 5)));
        assert!(!hits_wall(&grid, Cell::new(9, 5)));
        assert!(hits_body(&snake, Cell::new(4, 5)));
        assert!(!hits_body(&snake, Cell::new(5, 5)));
        assert!(hits_food(&food, Cell::new(6, 5)));
        assert!(!hits_food(&food, Cell::new(6, 6)));
    }
}
