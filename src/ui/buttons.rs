use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};

use crate::config::Theme;
use crate::grid::Direction;
use crate::ui::layout::BoardLayout;

/// Draws the on-screen D-pad; clicks are hit-tested against the same layout.
pub fn render_buttons(frame: &mut Frame<'_>, layout: &BoardLayout, theme: &Theme) {
    let style = Style::new().fg(theme.button_fg);

    for button in layout.buttons {
        frame.render_widget(
            Paragraph::new(arrow(button.direction))
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::bordered().border_style(style)),
            button.area,
        );
    }
}

fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "↑",
        Direction::Down => "↓",
        Direction::Left => "←",
        Direction::Right => "→",
        Direction::None => "",
    }
}
