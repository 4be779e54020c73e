//! The control loop that turns a [`GameState`] into a playable session.
//!
//! The loop knows nothing about terminals or timers. It is handed an input
//! source, a frame pacer and a render sink, and runs ticks until the input
//! asks to quit or the board fills up.

use anyhow::Result;
use tracing::info;

use crate::game::{Direction, GameError, GameState, Snapshot, TickOutcome};
use crate::input::KeyAction;
use crate::metrics::SessionMetrics;

/// Where direction and quit requests come from
pub trait InputSource {
    /// Everything requested since the previous poll, oldest first. May be empty.
    fn poll(&mut self) -> Vec<KeyAction>;
}

/// Real-time pacing between ticks
pub trait FramePacer {
    fn wait_until_next_tick(&mut self) -> impl Future<Output = ()>;
}

/// Consumer of the board after every tick
pub trait RenderSink {
    fn render(&mut self, snapshot: &Snapshot, metrics: &SessionMetrics) -> Result<()>;
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player asked to quit
    Quit,
    /// The snake filled the whole board; there is nowhere left for food
    BoardExhausted,
}

pub struct RunSummary {
    pub end: SessionEnd,
    pub ticks: u64,
    pub metrics: SessionMetrics,
}

/// One poll's worth of input reduced to what a tick consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    /// Most recent direction request, if any
    pub direction: Option<Direction>,
    pub quit: bool,
}

impl TickInput {
    pub fn collect(actions: impl IntoIterator<Item = KeyAction>) -> Self {
        actions
            .into_iter()
            .fold(TickInput::default(), |mut input, action| {
                match action {
                    KeyAction::Turn(direction) => input.direction = Some(direction),
                    KeyAction::Quit => input.quit = true,
                    KeyAction::None => {}
                }
                input
            })
    }
}

/// Run ticks until quit or board exhaustion.
///
/// The initial board is rendered before the first wait. Input is polled once
/// per tick, right before the tick consumes it.
pub async fn run<I, P, R>(
    state: &mut GameState,
    input: &mut I,
    pacer: &mut P,
    sink: &mut R,
) -> Result<RunSummary>
where
    I: InputSource,
    P: FramePacer,
    R: RenderSink,
{
    let mut metrics = SessionMetrics::new();
    let grid = state.grid();
    info!(
        width = grid.width_cells(),
        height = grid.height_cells(),
        "session started"
    );

    sink.render(&state.snapshot(), &metrics)?;

    let end = loop {
        pacer.wait_until_next_tick().await;

        let requested = TickInput::collect(input.poll());
        if requested.quit {
            break SessionEnd::Quit;
        }

        match state.tick(requested.direction) {
            Ok(outcome) => metrics.on_tick(outcome, state.snake().len()),
            Err(GameError::BoardExhausted { .. }) => {
                let outcome = TickOutcome {
                    ate_food: true,
                    collided: false,
                };
                metrics.on_tick(outcome, state.snake().len());
                sink.render(&state.snapshot(), &metrics)?;
                break SessionEnd::BoardExhausted;
            }
            Err(err) => return Err(err.into()),
        }

        sink.render(&state.snapshot(), &metrics)?;
    };

    info!(
        ?end,
        ticks = state.ticks(),
        deaths = metrics.deaths,
        best_length = metrics.best_length,
        "session finished"
    );

    Ok(RunSummary {
        end,
        ticks: state.ticks(),
        metrics,
    })
}
