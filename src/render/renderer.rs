use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use std::time::Duration;

use crate::game::{Cell, ColorTag, GameState, Segment};
use crate::highscores::HighScoreEntry;
use crate::metrics::GameMetrics;
use crate::scheduler::Phase;

/// Modal content drawn over the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Title,
    /// Run ended; waiting for the results delay
    Crashed,
    Results { score: u32 },
    EnterInitials { score: u32, rank: usize, typed: String },
}

/// Everything the renderer reads for one frame
pub struct View<'a> {
    pub state: &'a GameState,
    pub phase: Phase,
    pub metrics: &'a GameMetrics,
    pub high_scores: &'a [HighScoreEntry],
    pub overlay: &'a Overlay,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &View) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(22)])
            .split(chunks[1]);

        let board_area = body[0];
        frame.render_widget(self.render_grid(view.state), board_area);
        frame.render_widget(self.render_high_scores(view.high_scores), body[1]);

        if let Some(banner) = self.render_banner(view) {
            let area = centered(board_area, 30, 7);
            frame.render_widget(Clear, area);
            frame.render_widget(banner, area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid.height());

        for y in 0..state.grid.height() {
            let spans: Vec<Span> = (0..state.grid.width())
                .flat_map(|x| self.cell_spans(state, Cell::new(x as i32, y as i32)))
                .collect();
            lines.push(Line::from(spans));
        }

        let border = if state.is_alive() { Color::White } else { Color::Red };
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(" Fruit Worm "),
            )
            .alignment(Alignment::Center)
    }

    /// Two characters per cell; a colour boundary paints each half separately
    fn cell_spans(&self, state: &GameState, cell: Cell) -> Vec<Span<'static>> {
        let segments = state.snake.segments();

        if let Some(index) = segments.iter().position(|s| s.position == cell) {
            let segment = &segments[index];
            let glyph = if index == 0 { "■" } else { "□" };
            let (left, right) = segment_colors(segments, index, state.color_change_pending());
            let mut style = Style::default();
            if index == 0 {
                style = style.add_modifier(Modifier::BOLD);
            }

            return vec![
                Span::styled(glyph, style.fg(tag_color(left))),
                Span::styled(
                    if segment.pending_gradient.is_some() { "▌" } else { " " },
                    style.fg(tag_color(right)),
                ),
            ];
        }

        if cell == state.food.position {
            return vec![Span::styled(
                "● ",
                Style::default()
                    .fg(tag_color(state.food.color))
                    .add_modifier(Modifier::BOLD),
            )];
        }

        vec![Span::styled(". ", Style::default().fg(Color::DarkGray))]
    }

    fn render_stats(&self, view: &View) -> Paragraph<'_> {
        let state = view.state;
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.snake.len().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Colours: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.colors().len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.metrics.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_high_scores(&self, entries: &[HighScoreEntry]) -> Paragraph<'_> {
        let mut lines: Vec<Line> = entries
            .iter()
            .take(20)
            .enumerate()
            .map(|(i, entry)| {
                Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!("{:<3}", entry.initials),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        format!(" {:>7}", entry.score),
                        Style::default().fg(Color::White),
                    ),
                ])
            })
            .collect();

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "no scores yet",
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" High Scores "),
        )
    }

    fn render_banner(&self, view: &View) -> Option<Paragraph<'_>> {
        let title = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let hint = Style::default().fg(Color::Gray);

        let (lines, border) = match view.overlay {
            Overlay::Title => (
                vec![
                    Line::from(Span::styled("FRUIT WORM", title)),
                    Line::from(""),
                    Line::from(Span::styled("Enter or Space to play", hint)),
                ],
                Color::Yellow,
            ),
            Overlay::Crashed => (
                vec![Line::from(Span::styled(
                    "GAME OVER",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))],
                Color::Red,
            ),
            Overlay::Results { score } => (
                vec![
                    Line::from(Span::styled(
                        "GAME OVER",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("Final Score: {}", score)),
                    Line::from(""),
                    Line::from(Span::styled("R to play again, Q to quit", hint)),
                ],
                Color::Red,
            ),
            Overlay::EnterInitials { score, rank, typed } => (
                vec![
                    Line::from(Span::styled(format!("NEW HIGH SCORE  #{}", rank), title)),
                    Line::from(format!("Score: {}", score)),
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("Initials: {:_<3}", typed),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled("Enter to save, Esc to skip", hint)),
                ],
                Color::Yellow,
            ),
            Overlay::None => match view.phase {
                Phase::Ready { remaining } => (
                    vec![
                        Line::from(Span::styled("GET READY", title)),
                        Line::from(countdown_secs(remaining).to_string()),
                    ],
                    Color::Green,
                ),
                Phase::Paused => (
                    vec![
                        Line::from(Span::styled("PAUSED", title)),
                        Line::from(Span::styled("P to resume", hint)),
                    ],
                    Color::Yellow,
                ),
                _ => return None,
            },
        };

        Some(
            Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            ),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
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

/// Left and right half colours for the segment at `index`.
///
/// A marked gradient always shows. Otherwise a boundary with the segment in
/// front is blended, except while a colour change is still waiting to land.
fn segment_colors(segments: &[Segment], index: usize, change_pending: bool) -> (ColorTag, ColorTag) {
    let segment = &segments[index];
    if let Some(gradient) = segment.pending_gradient {
        return (gradient.from_color, gradient.to_color);
    }
    if index > 0 && !change_pending {
        let ahead = segments[index - 1].color;
        if ahead != segment.color {
            return (segment.color, ahead);
        }
    }
    (segment.color, segment.color)
}

/// Whole seconds left on the ready countdown, rounded up
fn countdown_secs(remaining: Duration) -> u128 {
    remaining.as_millis().div_ceil(1000)
}

fn tag_color(tag: ColorTag) -> Color {
    let (r, g, b) = tag.rgb();
    Color::Rgb(r, g, b)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Gradient};
    use ratatui::{Terminal, backend::TestBackend};

    fn seg(x: i32, color: ColorTag) -> Segment {
        Segment::new(Cell::new(x, 0), color)
    }

    #[test]
    fn test_countdown_counts_two_then_one() {
        assert_eq!(countdown_secs(Duration::from_millis(2000)), 2);
        assert_eq!(countdown_secs(Duration::from_millis(1001)), 2);
        assert_eq!(countdown_secs(Duration::from_millis(1000)), 1);
        assert_eq!(countdown_secs(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_gradient_segment_colors() {
        let mut segments = vec![seg(3, ColorTag::Green), seg(2, ColorTag::Red), seg(1, ColorTag::Red)];
        segments[1].pending_gradient = Some(Gradient {
            from_color: ColorTag::Red,
            to_color: ColorTag::Green,
        });

        assert_eq!(
            segment_colors(&segments, 1, true),
            (ColorTag::Red, ColorTag::Green)
        );
        assert_eq!(
            segment_colors(&segments, 2, false),
            (ColorTag::Red, ColorTag::Red)
        );
    }

    #[test]
    fn test_boundary_blend_suppressed_while_pending() {
        let segments = vec![seg(2, ColorTag::Cyan), seg(1, ColorTag::Red)];

        assert_eq!(
            segment_colors(&segments, 1, false),
            (ColorTag::Red, ColorTag::Cyan)
        );
        assert_eq!(
            segment_colors(&segments, 1, true),
            (ColorTag::Red, ColorTag::Red)
        );
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(centered(area, 30, 7), Rect::new(5, 6, 30, 7));
        assert_eq!(centered(Rect::new(0, 0, 10, 4), 30, 7), Rect::new(0, 0, 10, 4));
    }

    #[test]
    fn test_render_every_overlay() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 3);
        let state = engine.reset();
        let metrics = GameMetrics::new();
        let scores = vec![HighScoreEntry::new("ABC", 500)];
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();

        let overlays = [
            Overlay::None,
            Overlay::Title,
            Overlay::Crashed,
            Overlay::Results { score: 320 },
            Overlay::EnterInitials {
                score: 320,
                rank: 2,
                typed: "AB".to_string(),
            },
        ];
        let phases = [
            Phase::Ready {
                remaining: Duration::from_millis(1500),
            },
            Phase::Running,
            Phase::Paused,
        ];

        for overlay in &overlays {
            for phase in phases {
                let view = View {
                    state: &state,
                    phase,
                    metrics: &metrics,
                    high_scores: &scores,
                    overlay,
                };
                terminal
                    .draw(|frame| renderer.render(frame, &view))
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_render_tiny_terminal() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 3);
        let state = engine.reset();
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();
        let mut terminal = Terminal::new(TestBackend::new(8, 4)).unwrap();
        let view = View {
            state: &state,
            phase: Phase::Paused,
            metrics: &metrics,
            high_scores: &[],
            overlay: &Overlay::None,
        };

        terminal
            .draw(|frame| renderer.render(frame, &view))
            .unwrap();
    }
}
