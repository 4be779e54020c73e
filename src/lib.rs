//! Torus Snake - the classic snake game on a wrap-around board
//!
//! This library provides:
//! - Core simulation (game module): grid, snake, food and the tick state machine
//! - The I/O-agnostic control loop (driver module)
//! - Terminal input, rendering and session metrics
//! - The interactive terminal mode (modes module)

pub mod driver;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
