use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, EpisodeEngine, GameState};
use crate::metrics::SessionMetrics;

/// Draws a read-only snapshot of the engine. Never feeds anything back
/// into the simulation.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        engine: &EpisodeEngine,
        metrics: &SessionMetrics,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with live stats
        let stats = self.render_stats(chunks[0], engine, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let grid = self.render_grid(game_area, engine.state(), paused);
        frame.render_widget(grid, game_area);

        // Render footer with controls
        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, state: &GameState, paused: bool) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for cy in 0..state.cells_y() {
            let mut spans = Vec::new();

            for cx in 0..state.cells_x() {
                let cell = Cell::new(cx * state.block, cy * state.block);

                let glyph = if cell == state.snake.head() {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(cell) {
                    // Snake body
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if cell == state.food {
                    // Food
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(glyph);
            }

            lines.push(Line::from(spans));
        }

        let title = if paused { " Snake (paused) " } else { " Snake " };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        engine: &EpisodeEngine,
        metrics: &SessionMetrics,
    ) -> Paragraph<'_> {
        let state = engine.state();
        let outcomes = engine.outcomes();

        let text = vec![
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Record: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    engine.record().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Frame: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.frame.to_string(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Episodes: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    outcomes.episodes().to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled(
                    format!(
                        "wall {}  self {}  timeout {}",
                        outcomes.wall.episodes,
                        outcomes.self_collision.episodes,
                        outcomes.timeout.episodes
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" restart | "),
            Span::styled("1-4", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
