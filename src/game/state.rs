use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use super::config::GameConfig;
use super::direction::Direction;
use super::error::GameError;
use super::food::Food;
use super::grid::{Cell, Grid};
use super::snake::{Advance, Snake};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The head landed on the food; the snake will grow by one
    pub ate_food: bool,
    /// The snake ran into itself and started over
    pub collided: bool,
}

/// Read-only view of the board after a tick, for renderers
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake_cells: Vec<Cell>,
    pub head: Cell,
    pub food_cell: Cell,
    pub grid: Grid,
}

impl Snapshot {
    pub fn is_snake(&self, cell: Cell) -> bool {
        self.snake_cells.contains(&cell)
    }
}

/// Complete game state: one snake, one food, and the rules that tie them.
///
/// Every call to [`GameState::tick`] leaves the state consistent; a self
/// collision resets the snake inside the tick rather than ending the game.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: Food,
    rng: StdRng,
    ticks: u64,
}

impl GameState {
    /// Start a game from a config, validating it first
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let grid = config.grid()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(grid, rng)
    }

    /// Fresh snake at the center, food anywhere else
    pub fn with_rng(grid: Grid, mut rng: StdRng) -> Result<Self, GameError> {
        let snake = Snake::new(grid);
        let food = Food::spawn(&grid, &snake.occupied(), &mut rng)?;
        Ok(Self {
            grid,
            snake,
            food,
            rng,
            ticks: 0,
        })
    }

    /// Assemble a state from prepared parts, e.g. to replay a position
    pub fn from_parts(snake: Snake, food: Food, rng: StdRng) -> Self {
        Self {
            grid: snake.grid(),
            snake,
            food,
            rng,
            ticks: 0,
        }
    }

    /// Run one simulation step.
    ///
    /// `requested` is the latest direction asked for since the previous tick.
    /// The only error is [`GameError::BoardExhausted`], when the snake has
    /// eaten its way across the whole board and no cell is left for food.
    pub fn tick(&mut self, requested: Option<Direction>) -> Result<TickOutcome, GameError> {
        if let Some(direction) = requested {
            self.snake.turn(direction);
        }

        self.ticks += 1;
        let mut outcome = TickOutcome::default();

        if self.snake.advance() == Advance::SelfCollision {
            debug!(tick = self.ticks, "self collision, snake reset");
            outcome.collided = true;
        }

        if self.snake.head() == self.food.position() {
            outcome.ate_food = true;
            self.snake.grow();
            debug!(
                tick = self.ticks,
                target_length = self.snake.target_length(),
                "food eaten"
            );

            if let Err(err) = self
                .food
                .relocate(&self.grid, &self.snake.occupied(), &mut self.rng)
            {
                warn!(tick = self.ticks, %err, "food could not be placed");
                return Err(err);
            }
        }

        Ok(outcome)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake_cells: self.snake.body().to_vec(),
            head: self.snake.head(),
            food_cell: self.food.position(),
            grid: self.grid,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Food eaten since the last reset
    pub fn score(&self) -> usize {
        self.snake.target_length() - 1
    }
}
