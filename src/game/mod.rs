//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board is a torus: leaving one edge re-enters from the opposite one.

pub mod config;
pub mod direction;
pub mod error;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use error::GameError;
pub use food::Food;
pub use grid::{Cell, Grid, PixelRect};
pub use snake::{Advance, Snake};
pub use state::{GameState, Snapshot, TickOutcome};
