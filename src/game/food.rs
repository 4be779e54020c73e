use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::error::GameError;
use super::grid::{Cell, Grid};

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    /// Create food at a specific cell
    pub fn at(position: Cell) -> Self {
        Self { position }
    }

    /// Place food on a random cell not in `occupied`
    pub fn spawn<R: Rng + ?Sized>(
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let position = pick_free_cell(grid, occupied, rng)?;
        Ok(Self { position })
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Move the food to a random cell not in `occupied`.
    ///
    /// On `BoardExhausted` the position is left unchanged.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Cell, GameError> {
        self.position = pick_free_cell(grid, occupied, rng)?;
        Ok(self.position)
    }
}

/// Uniform choice over the free cells, collected up front so a full board is
/// detected instead of retried.
fn pick_free_cell<R: Rng + ?Sized>(
    grid: &Grid,
    occupied: &HashSet<Cell>,
    rng: &mut R,
) -> Result<Cell, GameError> {
    let free: Vec<Cell> = grid.all_cells().filter(|c| !occupied.contains(c)).collect();

    free.choose(rng)
        .copied()
        .ok_or(GameError::BoardExhausted {
            cells: grid.cell_count(),
        })
}
