use std::collections::HashSet;

use super::direction::Direction;
use super::error::GameError;
use super::grid::{Cell, Grid};

/// What a single [`Snake::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The head moved to a free cell
    Moved,
    /// The head would have entered the body; the snake was reset
    SelfCollision,
}

/// The snake on the board.
///
/// The body is stored head-first. Growth is lazy: [`Snake::grow`] only raises
/// the target length, and the next advances skip popping the tail until the
/// body catches up.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    grid: Grid,
    body: Vec<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    target_length: usize,
}

impl Snake {
    /// A length-1 snake at the grid center heading right
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            body: vec![grid.center()],
            direction: Direction::Right,
            pending_direction: None,
            target_length: 1,
        }
    }

    /// Build a snake with an explicit body (head first).
    ///
    /// The target length is the body length, so the snake neither grows nor
    /// shrinks until it eats.
    pub fn from_body(grid: Grid, body: Vec<Cell>, direction: Direction) -> Result<Self, GameError> {
        if body.is_empty() {
            return Err(GameError::invalid("snake body must not be empty"));
        }
        if let Some(cell) = body.iter().find(|c| !grid.contains(**c)) {
            return Err(GameError::invalid(format!(
                "snake cell ({}, {}) is off the board",
                cell.x, cell.y
            )));
        }
        let distinct: HashSet<Cell> = body.iter().copied().collect();
        if distinct.len() != body.len() {
            return Err(GameError::invalid("snake body overlaps itself"));
        }

        Ok(Self {
            grid,
            target_length: body.len(),
            body,
            direction,
            pending_direction: None,
        })
    }

    /// Request a direction for the next advance.
    ///
    /// A request to reverse onto the current direction is ignored. Otherwise
    /// it replaces any earlier request that has not been applied yet.
    pub fn turn(&mut self, direction: Direction) {
        if self.direction.is_opposite(direction) {
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Move one cell, applying the pending direction first.
    pub fn advance(&mut self) -> Advance {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let new_head = self.grid.wrap(self.head(), self.direction);

        // The tail leaves its cell this tick unless the snake is still growing.
        let vacates_tail = self.body.len() >= self.target_length;
        let blocking = if vacates_tail {
            &self.body[..self.body.len() - 1]
        } else {
            &self.body[..]
        };

        if blocking.contains(&new_head) {
            self.reset();
            return Advance::SelfCollision;
        }

        self.body.insert(0, new_head);
        if self.body.len() > self.target_length {
            self.body.pop();
        }

        Advance::Moved
    }

    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Back to the starting state: length 1 at the center, heading right
    pub fn reset(&mut self) {
        *self = Self::new(self.grid);
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(640, 480, 20).unwrap()
    }

    fn cells(raw: &[(i32, i32)]) -> Vec<Cell> {
        raw.iter().copied().map(Cell::from).collect()
    }

    fn snake(raw: &[(i32, i32)], direction: Direction) -> Snake {
        Snake::from_body(grid(), cells(raw), direction).unwrap()
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(grid());
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(16, 12));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.target_length(), 1);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_single_advance_from_start() {
        let mut snake = Snake::new(grid());
        assert_eq!(snake.advance(), Advance::Moved);
        assert_eq!(snake.body(), &cells(&[(17, 12)])[..]);
    }

    #[test]
    fn test_advance_drops_tail() {
        let mut snake = snake(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        assert_eq!(snake.advance(), Advance::Moved);
        assert_eq!(snake.body(), &cells(&[(6, 5), (5, 5), (4, 5)])[..]);
    }

    #[test]
    fn test_turn_applies_on_next_advance() {
        let mut snake = snake(&[(5, 5), (4, 5)], Direction::Right);
        snake.turn(Direction::Down);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), Some(Direction::Down));

        snake.advance();
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.head(), Cell::new(5, 6));
    }

    #[test]
    fn test_last_turn_wins() {
        let mut snake = Snake::new(grid());
        snake.turn(Direction::Up);
        snake.turn(Direction::Down);
        assert_eq!(snake.pending_direction(), Some(Direction::Down));
    }

    #[test]
    fn test_reverse_turn_is_ignored() {
        let mut snake = Snake::new(grid());
        snake.turn(Direction::Left);
        assert_eq!(snake.pending_direction(), None);

        snake.turn(Direction::Up);
        snake.turn(Direction::Left);
        assert_eq!(snake.pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_reverse_is_judged_against_current_direction() {
        // Up is pending, but the snake still moves right, so Left is a reversal
        // and Down is not.
        let mut snake = Snake::new(grid());
        snake.turn(Direction::Up);
        snake.turn(Direction::Left);
        assert_eq!(snake.pending_direction(), Some(Direction::Up));

        snake.turn(Direction::Down);
        assert_eq!(snake.pending_direction(), Some(Direction::Down));
    }

    #[test]
    fn test_grow_extends_on_following_advances() {
        let mut snake = Snake::new(grid());
        snake.grow();
        snake.grow();
        assert_eq!(snake.len(), 1);

        snake.advance();
        assert_eq!(snake.len(), 2);
        snake.advance();
        assert_eq!(snake.len(), 3);
        snake.advance();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.body(), &cells(&[(19, 12), (18, 12), (17, 12)])[..]);
    }

    #[test]
    fn test_collision_with_neck_resets() {
        let mut snake = snake(&[(10, 10), (10, 9), (10, 8), (10, 7)], Direction::Up);
        snake.turn(Direction::Down);
        assert_eq!(snake.pending_direction(), None);

        assert_eq!(snake.advance(), Advance::SelfCollision);
        assert_eq!(snake.body(), &[grid().center()][..]);
        assert_eq!(snake.target_length(), 1);
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_chasing_own_tail_is_allowed() {
        // A 2x2 loop: the head steps into the cell the tail is leaving.
        let mut snake = snake(&[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Up);
        snake.turn(Direction::Right);
        assert_eq!(snake.advance(), Advance::Moved);
        assert_eq!(snake.body(), &cells(&[(6, 5), (5, 5), (5, 6), (6, 6)])[..]);
    }

    #[test]
    fn test_tail_blocks_while_growing() {
        let mut snake = snake(&[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Up);
        snake.grow();
        snake.turn(Direction::Right);
        assert_eq!(snake.advance(), Advance::SelfCollision);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_short_snake_on_narrow_board() {
        // On a two-cell-wide board a length-2 snake moving right lands on its
        // own tail cell, which it is vacating.
        let narrow = Grid::new(2, 3, 1).unwrap();
        let mut snake =
            Snake::from_body(narrow, cells(&[(1, 1), (0, 1)]), Direction::Right).unwrap();
        assert_eq!(snake.advance(), Advance::Moved);
        assert_eq!(snake.body(), &cells(&[(0, 1), (1, 1)])[..]);

        let single = Grid::new(1, 1, 1).unwrap();
        let mut snake = Snake::new(single);
        assert_eq!(snake.advance(), Advance::Moved);
        assert_eq!(snake.head(), Cell::new(0, 0));
    }

    #[test]
    fn test_from_body_validation() {
        assert!(Snake::from_body(grid(), vec![], Direction::Right).is_err());
        assert!(Snake::from_body(grid(), cells(&[(40, 0)]), Direction::Right).is_err());
        assert!(Snake::from_body(grid(), cells(&[(1, 1), (1, 1)]), Direction::Right).is_err());
    }

    #[test]
    fn test_occupied() {
        let snake = snake(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        let occupied = snake.occupied();
        assert_eq!(occupied.len(), 3);
        assert!(occupied.contains(&Cell::new(4, 5)));
        assert!(snake.contains(Cell::new(3, 5)));
        assert!(!snake.contains(Cell::new(6, 5)));
    }
}
