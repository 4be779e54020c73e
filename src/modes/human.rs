use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::warn;

use crate::driver::{self, FramePacer, InputSource, RenderSink, RunSummary};
use crate::game::{GameConfig, GameState, Snapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

type CrosstermTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Key presses forwarded from the terminal's event stream
pub struct ChannelInput {
    rx: UnboundedReceiver<KeyAction>,
}

impl ChannelInput {
    pub fn new(rx: UnboundedReceiver<KeyAction>) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self) -> Vec<KeyAction> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}

/// Fixed-rate pacing on a tokio interval
pub struct IntervalPacer {
    interval: Interval,
}

impl IntervalPacer {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

impl FramePacer for IntervalPacer {
    async fn wait_until_next_tick(&mut self) {
        self.interval.tick().await;
    }
}

struct TerminalSink<'a> {
    terminal: &'a mut CrosstermTerminal,
    renderer: Renderer,
}

impl RenderSink for TerminalSink<'_> {
    fn render(&mut self, snapshot: &Snapshot, metrics: &SessionMetrics) -> Result<()> {
        self.terminal
            .draw(|frame| self.renderer.render(frame, snapshot, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

/// Play in the terminal with the keyboard
pub struct HumanMode {
    config: GameConfig,
    state: GameState,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let state = GameState::new(&config).context("Cannot start game")?;
        Ok(Self { config, state })
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let (tx, rx) = unbounded_channel();
        let reader = tokio::spawn(forward_key_events(tx));

        let mut input = ChannelInput::new(rx);
        let mut pacer = IntervalPacer::new(self.config.tick_interval());
        let mut sink = TerminalSink {
            terminal: &mut terminal,
            renderer: Renderer::new(),
        };

        // Run game loop with cleanup
        let result = driver::run(&mut self.state, &mut input, &mut pacer, &mut sink).await;

        reader.abort();
        cleanup_terminal(&mut terminal)?;

        result
    }
}

async fn forward_key_events(tx: UnboundedSender<KeyAction>) {
    let handler = InputHandler::new();
    let mut event_stream = EventStream::new();

    while let Some(event) = event_stream.next().await {
        let key = match event {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(err) => {
                warn!(%err, "terminal event stream failed");
                break;
            }
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let action = handler.handle_key_event(key);
        if action != KeyAction::None && tx.send(action).is_err() {
            break;
        }
    }
}

fn cleanup_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use std::time::Instant;

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default()).unwrap();
        assert_eq!(mode.state.snake().len(), 1);
        assert_eq!(mode.state.score(), 0);
    }

    #[test]
    fn test_invalid_config_fails_early() {
        assert!(HumanMode::new(GameConfig::new(100, 100, 30)).is_err());
    }

    #[test]
    fn test_channel_input_drains_in_order() {
        let (tx, rx) = unbounded_channel();
        let mut input = ChannelInput::new(rx);
        assert!(input.poll().is_empty());

        tx.send(KeyAction::Turn(Direction::Up)).unwrap();
        tx.send(KeyAction::Turn(Direction::Left)).unwrap();
        assert_eq!(
            input.poll(),
            vec![
                KeyAction::Turn(Direction::Up),
                KeyAction::Turn(Direction::Left)
            ]
        );
        assert!(input.poll().is_empty());
    }

    #[tokio::test]
    async fn test_interval_pacer_waits_between_ticks() {
        let mut pacer = IntervalPacer::new(Duration::from_millis(20));
        let start = Instant::now();
        pacer.wait_until_next_tick().await; // first tick is immediate
        pacer.wait_until_next_tick().await;
        pacer.wait_until_next_tick().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
