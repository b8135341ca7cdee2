use ratatui::layout::{Constraint, Flex, Layout, Rect};

use crate::config::{GRID_CELLS, TERMINAL_COLUMNS_PER_CELL};
use crate::grid::Direction;

const HUD_HEIGHT: u16 = 1;
const BUTTON_ROW_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 7;
const BORDER: u16 = 1;

/// Board width in terminal cells, border included.
pub const BOARD_WIDTH: u16 = GRID_CELLS * TERMINAL_COLUMNS_PER_CELL + 2 * BORDER;

/// Board height in terminal cells, border included.
pub const BOARD_HEIGHT: u16 = GRID_CELLS + 2 * BORDER;

/// One on-screen direction button.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionButton {
    pub direction: Direction,
    pub area: Rect,
}

/// Screen geometry shared by the renderer and mouse hit-testing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BoardLayout {
    pub hud: Rect,
    pub board: Rect,
    pub board_inner: Rect,
    pub buttons: [DirectionButton; 4],
}

impl BoardLayout {
    /// Centres the board in `area` with the HUD above and buttons below.
    ///
    /// Small terminals shrink the rectangles; nothing here fails.
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let [column] = Layout::horizontal([Constraint::Length(BOARD_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [hud, board, button_row] = Layout::vertical([
            Constraint::Length(HUD_HEIGHT),
            Constraint::Length(BOARD_HEIGHT),
            Constraint::Length(BUTTON_ROW_HEIGHT),
        ])
        .flex(Flex::Center)
        .areas(column);

        let board_inner = Rect {
            x: board.x.saturating_add(BORDER),
            y: board.y.saturating_add(BORDER),
            width: board.width.saturating_sub(2 * BORDER),
            height: board.height.saturating_sub(2 * BORDER),
        };

        let slots: [Rect; 4] = Layout::horizontal([Constraint::Length(BUTTON_WIDTH); 4])
            .flex(Flex::SpaceAround)
            .areas(button_row);
        let directions = [
            Direction::Left,
            Direction::Up,
            Direction::Down,
            Direction::Right,
        ];
        let buttons = std::array::from_fn(|index| DirectionButton {
            direction: directions[index],
            area: slots[index],
        });

        Self {
            hud,
            board,
            board_inner,
            buttons,
        }
    }

    /// Returns the direction of the button under a terminal cell, if any.
    #[must_use]
    pub fn button_at(&self, column: u16, row: u16) -> Option<Direction> {
        self.buttons
            .iter()
            .find(|button| contains(button.area, column, row))
            .map(|button| button.direction)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}
