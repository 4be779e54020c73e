use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::error::GameError;

/// One square of the board, addressed by column and row (not pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Pixel rectangle covered by a cell, for renderers that draw in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// The board: a `width_cells` x `height_cells` torus of square cells.
///
/// Every coordinate computation that can leave the board goes through
/// [`Grid::wrap`], so the rest of the game never has to think about edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cell_size: u32,
    width_cells: u32,
    height_cells: u32,
}

impl Grid {
    /// Derive the grid from a board size in pixels.
    ///
    /// The board must be a non-empty whole number of cells in each dimension.
    pub fn new(board_width: u32, board_height: u32, cell_size: u32) -> Result<Self, GameError> {
        if cell_size == 0 {
            return Err(GameError::invalid("cell size must be non-zero"));
        }
        if board_width == 0 || board_height == 0 {
            return Err(GameError::invalid(format!(
                "board must be non-empty, got {board_width}x{board_height}"
            )));
        }
        if board_width % cell_size != 0 || board_height % cell_size != 0 {
            return Err(GameError::invalid(format!(
                "board {board_width}x{board_height} is not a multiple of cell size {cell_size}"
            )));
        }
        if board_width / cell_size > i32::MAX as u32 || board_height / cell_size > i32::MAX as u32 {
            return Err(GameError::invalid("board has too many cells"));
        }

        Ok(Self {
            cell_size,
            width_cells: board_width / cell_size,
            height_cells: board_height / cell_size,
        })
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn width_cells(&self) -> u32 {
        self.width_cells
    }

    pub fn height_cells(&self) -> u32 {
        self.height_cells
    }

    pub fn cell_count(&self) -> usize {
        self.width_cells as usize * self.height_cells as usize
    }

    /// Starting cell of a fresh snake
    pub fn center(&self) -> Cell {
        Cell::new((self.width_cells / 2) as i32, (self.height_cells / 2) as i32)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.width_cells as i32
            && cell.y >= 0
            && cell.y < self.height_cells as i32
    }

    /// Step one cell in `direction`, reappearing on the opposite edge when
    /// stepping off the board.
    pub fn wrap(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(
            (cell.x + dx).rem_euclid(self.width_cells as i32),
            (cell.y + dy).rem_euclid(self.height_cells as i32),
        )
    }

    /// Every cell on the board, row by row
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width_cells as i32;
        (0..self.height_cells as i32).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }

    pub fn pixel_rect(&self, cell: Cell) -> PixelRect {
        PixelRect {
            x: cell.x as u32 * self.cell_size,
            y: cell.y as u32 * self.cell_size,
            size: self.cell_size,
        }
    }
}
