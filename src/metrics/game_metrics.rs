use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// In-memory statistics for one play session
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub ticks: u64,
    pub deaths: u32,
    pub food_eaten: u32,
    pub best_length: usize,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            ticks: 0,
            deaths: 0,
            food_eaten: 0,
            best_length: 1,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Record the result of a tick and the snake's length afterwards
    pub fn on_tick(&mut self, outcome: TickOutcome, snake_length: usize) {
        self.ticks += 1;
        if outcome.collided {
            self.deaths += 1;
        }
        if outcome.ate_food {
            self.food_eaten += 1;
        }
        self.best_length = self.best_length.max(snake_length);
        self.update();
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
