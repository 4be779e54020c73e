use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, Snapshot};
use crate::metrics::SessionMetrics;

pub const BACKGROUND_COLOR: Color = Color::Rgb(0, 0, 0);
pub const BORDER_COLOR: Color = Color::Rgb(93, 216, 228);
pub const FOOD_COLOR: Color = Color::Rgb(255, 0, 0);
pub const SNAKE_COLOR: Color = Color::Rgb(0, 255, 0);

/// What occupies a cell, from the renderer's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Empty,
}

pub fn classify(snapshot: &Snapshot, cell: Cell) -> CellKind {
    if cell == snapshot.head {
        CellKind::Head
    } else if snapshot.is_snake(cell) {
        CellKind::Body
    } else if cell == snapshot.food_cell {
        CellKind::Food
    } else {
        CellKind::Empty
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &SessionMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);
        frame.render_widget(self.render_grid(snapshot), chunks[1]);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let grid = snapshot.grid;
        let background = Style::default().bg(BACKGROUND_COLOR);

        let lines: Vec<Line> = (0..grid.height_cells() as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..grid.width_cells() as i32)
                    .map(|x| match classify(snapshot, Cell::new(x, y)) {
                        CellKind::Head => Span::styled(
                            "■ ",
                            background.fg(SNAKE_COLOR).add_modifier(Modifier::BOLD),
                        ),
                        CellKind::Body => Span::styled("□ ", background.fg(SNAKE_COLOR)),
                        CellKind::Food => Span::styled(
                            "● ",
                            background.fg(FOOD_COLOR).add_modifier(Modifier::BOLD),
                        ),
                        CellKind::Empty => Span::styled("  ", background),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(BORDER_COLOR))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &SessionMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(
                snapshot.snake_cells.len().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_length.to_string(), value),
            Span::raw("    "),
            Span::styled("Deaths: ", label),
            Span::styled(metrics.deaths.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
