use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

use crate::grid::{GridSize, Point};

/// Cells per side of the square board.
pub const GRID_CELLS: u16 = 20;

/// Logical canvas edge in pixels.
pub const CANVAS_SIZE_PX: u16 = 400;

/// Logical pixels per grid cell.
pub const CELL_SIZE_PX: u16 = CANVAS_SIZE_PX / GRID_CELLS;

/// Tick period at the start of a round.
pub const INITIAL_SPEED_MS: u64 = 200;

/// Fastest tick period a round can reach.
pub const MIN_SPEED_MS: u64 = 50;

/// Tick period reduction per food item eaten.
pub const SPEED_DECREMENT_MS: u64 = 5;

/// Minimum swipe displacement, in logical pixels, that counts as a gesture.
pub const SWIPE_THRESHOLD_PX: i32 = 30;

/// Timeout applied to every request against the score service.
pub const SCORE_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Immutable tuning for one engine instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub start: Point,
    pub initial_speed_ms: u64,
    pub min_speed_ms: u64,
    pub speed_decrement_ms: u64,
    pub swipe_threshold_px: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: GRID_CELLS,
                height: GRID_CELLS,
            },
            start: Point::new(10, 10),
            initial_speed_ms: INITIAL_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            speed_decrement_ms: SPEED_DECREMENT_MS,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
        }
    }
}

impl GameConfig {
    /// Tick period after one more food item, clamped at the minimum.
    #[must_use]
    pub fn next_speed_ms(&self, speed_ms: u64) -> u64 {
        speed_ms
            .saturating_sub(self.speed_decrement_ms)
            .max(self.min_speed_ms)
    }
}

/// Colours applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub board_bg: Color,
    pub grid_line: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub food_highlight: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_high_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub game_over_title: Color,
    pub button_fg: Color,
}

/// Slate board with an emerald snake and a rose food marker.
pub const THEME_SLATE: Theme = Theme {
    board_bg: Color::Rgb(15, 23, 42),
    grid_line: Color::Rgb(30, 41, 59),
    snake_head: Color::Rgb(52, 211, 153),
    snake_body: Color::Rgb(5, 150, 105),
    food: Color::Rgb(244, 63, 94),
    food_highlight: Color::Rgb(253, 164, 175),
    border_fg: Color::Rgb(51, 65, 85),
    hud_score: Color::Rgb(52, 211, 153),
    hud_high_score: Color::Rgb(251, 191, 36),
    hud_muted: Color::Rgb(100, 116, 139),
    menu_title: Color::Rgb(45, 212, 191),
    game_over_title: Color::Rgb(244, 63, 94),
    button_fg: Color::Rgb(148, 163, 184),
};

pub const BORDER_ROUNDED: border::Set = border::ROUNDED;

/// Two terminal columns make one square-looking grid cell.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;

pub const GLYPH_GRID_DOT: &str = " ·";
pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "()";
