use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::grid::Grid;

pub const MAX_TICKS_PER_SECOND: u32 = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in pixels
    pub board_width: u32,
    /// Board height in pixels
    pub board_height: u32,
    /// Side of one square cell in pixels
    pub cell_size: u32,
    /// Simulation ticks per second
    pub ticks_per_second: u32,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 640,
            board_height: 480,
            cell_size: 20,
            ticks_per_second: 20,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board
    pub fn new(board_width: u32, board_height: u32, cell_size: u32) -> Self {
        Self {
            board_width,
            board_height,
            cell_size,
            ..Default::default()
        }
    }

    /// A 10x10 board for testing
    pub fn small() -> Self {
        Self::new(100, 100, 10)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))
    }

    /// The grid described by this config, or why there is none
    pub fn grid(&self) -> Result<Grid, GameError> {
        Grid::new(self.board_width, self.board_height, self.cell_size)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_TICKS_PER_SECOND).contains(&self.ticks_per_second) {
            return Err(GameError::invalid(format!(
                "tick rate must be between 1 and {MAX_TICKS_PER_SECOND} per second, got {}",
                self.ticks_per_second
            )));
        }
        self.grid().map(|_| ())
    }

    /// Wall-clock time between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.ticks_per_second.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_width, 640);
        assert_eq!(config.board_height, 480);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.ticks_per_second, 20);

        let grid = config.grid().unwrap();
        assert_eq!((grid.width_cells(), grid.height_cells()), (32, 24));
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 150, 15);
        let grid = config.grid().unwrap();
        assert_eq!((grid.width_cells(), grid.height_cells()), (20, 10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(GameConfig::new(645, 480, 20).validate().is_err());

        let config = GameConfig {
            ticks_per_second: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::ConfigurationInvalid { .. })
        ));

        let config = GameConfig {
            ticks_per_second: MAX_TICKS_PER_SECOND + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(GameConfig::default().tick_interval(), Duration::from_millis(50));

        let config = GameConfig {
            ticks_per_second: 8,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(125));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cell_size": 40, "seed": 9 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.cell_size, 40);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.board_width, 640);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::load(file.path()).is_err());
        assert!(GameConfig::load(Path::new("/definitely/missing.json")).is_err());
    }
}
