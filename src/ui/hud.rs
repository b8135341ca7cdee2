use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameState;

/// Values the HUD shows that the game state does not own.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub high_score: u32,
    /// High score as it stood when the current round began.
    pub reference_high_score: u32,
    pub theme: &'a Theme,
}

/// Renders the single status line above the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo<'_>) {
    frame.render_widget(
        Paragraph::new(status_line(state, info)).alignment(Alignment::Center),
        area,
    );
}

fn status_line(state: &GameState, info: &HudInfo<'_>) -> Line<'static> {
    let theme = info.theme;
    let label = Style::new().fg(theme.hud_muted);
    let sep = Span::styled("  │  ", label);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(
            state.score.to_string(),
            Style::new()
                .fg(theme.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled("High ", label),
        Span::styled(
            info.high_score.max(state.score).to_string(),
            Style::new()
                .fg(theme.hud_high_score)
                .add_modifier(Modifier::BOLD),
        ),
        sep,
        Span::styled(format!("{} ms", state.speed_ms), label),
    ])
}
