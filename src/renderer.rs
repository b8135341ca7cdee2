use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear};

use crate::config::{
    BORDER_ROUNDED, GLYPH_FOOD, GLYPH_GRID_DOT, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD,
    TERMINAL_COLUMNS_PER_CELL, Theme,
};
use crate::game::{GameState, GameStatus};
use crate::grid::{GridSize, Point};
use crate::ui::buttons::render_buttons;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::layout::BoardLayout;
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: &HudInfo<'_>) -> BoardLayout {
    let area = frame.area();
    let layout = BoardLayout::compute(area);
    let theme = hud_info.theme;

    frame.render_widget(Clear, area);
    render_hud(frame, layout.hud, state, hud_info);

    let block = Block::bordered()
        .border_set(BORDER_ROUNDED)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.board_bg));
    frame.render_widget(block, layout.board);

    render_board(frame.buffer_mut(), layout.board_inner, state, theme);
    render_buttons(frame, &layout, theme);

    match state.status {
        GameStatus::Idle => render_start_menu(frame, layout.board, hud_info.high_score, theme),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            layout.board,
            state.final_score(),
            hud_info.reference_high_score,
            state.death_reason,
            theme,
        ),
        GameStatus::Playing => {}
    }

    layout
}

/// Paints grid, snake and food into `inner`. Cells that do not fit are skipped.
pub fn render_board(buffer: &mut Buffer, inner: Rect, state: &GameState, theme: &Theme) {
    let bounds = state.bounds();
    render_grid(buffer, inner, bounds, theme);

    if let Some((x, y)) = logical_to_terminal(inner, bounds, state.food.position) {
        buffer.set_string(
            x,
            y,
            GLYPH_FOOD,
            Style::new()
                .fg(theme.food_highlight)
                .bg(theme.food)
                .add_modifier(Modifier::BOLD),
        );
    }

    // Tail first so the head wins if segments overlap.
    let segments: Vec<Point> = state.snake.segments().copied().collect();
    for (index, segment) in segments.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, *segment) else {
            continue;
        };

        let (glyph, color) = if index == 0 {
            (GLYPH_SNAKE_HEAD, theme.snake_head)
        } else {
            (GLYPH_SNAKE_BODY, theme.snake_body)
        };
        buffer.set_string(x, y, glyph, Style::new().fg(color).bg(theme.board_bg));
    }
}

fn render_grid(buffer: &mut Buffer, inner: Rect, bounds: GridSize, theme: &Theme) {
    let style = Style::new().fg(theme.grid_line).bg(theme.board_bg);

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            if let Some((column, row)) = logical_to_terminal(inner, bounds, Point { x, y }) {
                buffer.set_string(column, row, GLYPH_GRID_DOT, style);
            }
        }
    }
}

/// Maps a grid cell to the terminal column/row of its left half.
#[must_use]
pub fn logical_to_terminal(inner: Rect, bounds: GridSize, point: Point) -> Option<(u16, u16)> {
    if !point.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(point.x).ok()?.checked_mul(TERMINAL_COLUMNS_PER_CELL)?;
    let y_offset = u16::try_from(point.y).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x.saturating_add(TERMINAL_COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
