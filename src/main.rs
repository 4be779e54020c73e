use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use torus_snake::driver::SessionEnd;
use torus_snake::game::GameConfig;
use torus_snake::modes::HumanMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Snake on a wrap-around board")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON config file; the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    board_width: Option<u32>,

    /// Board height in pixels
    #[arg(long)]
    board_height: Option<u32>,

    /// Cell size in pixels; must divide both board dimensions
    #[arg(long)]
    cell_size: Option<u32>,

    /// Ticks per second
    #[arg(long)]
    tps: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.board_width {
            config.board_width = width;
        }
        if let Some(height) = self.board_height {
            config.board_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(tps) = self.tps {
            config.ticks_per_second = tps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

/// The terminal UI owns stderr, so logs only go to a file when asked for.
fn init_logging(path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            let summary = human_mode.run().await?;

            if summary.end == SessionEnd::BoardExhausted {
                println!("Board cleared! The snake fills every cell.");
            }
            println!(
                "Ticks: {}  Best length: {}  Deaths: {}  Time: {}",
                summary.ticks,
                summary.metrics.best_length,
                summary.metrics.deaths,
                summary.metrics.format_time()
            );
        }
    }

    Ok(())
}
