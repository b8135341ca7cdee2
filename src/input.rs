use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::config::{CELL_SIZE_PX, TERMINAL_COLUMNS_PER_CELL};
use crate::grid::Direction;
use crate::ui::layout::BoardLayout;

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Confirm,
    Quit,
}

/// Result of offering a direction to the arbiter.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Submission {
    Accepted,
    NotPlaying,
    Reversal,
    NoDirection,
}

/// Single-slot mailbox between input handlers and the tick.
///
/// Input overwrites `pending`; the tick copies it into `last_applied` when it
/// moves. Reversal checks compare against `last_applied` only, so two quick
/// presses between ticks can never fold the snake back onto itself.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct DirectionSlot {
    pending: Direction,
    last_applied: Direction,
}

impl DirectionSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `requested` unless it reverses the last executed move.
    pub fn submit(&mut self, requested: Direction) -> Submission {
        if requested.is_none() {
            return Submission::NoDirection;
        }

        if requested.reverses(self.last_applied) {
            return Submission::Reversal;
        }

        self.pending = requested;
        Submission::Accepted
    }

    /// Commits the pending direction for this tick. Returns `None` while no
    /// direction has been chosen yet.
    pub fn take_for_tick(&mut self) -> Option<Direction> {
        if self.pending.is_none() {
            return None;
        }

        self.last_applied = self.pending;
        Some(self.pending)
    }

    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }

    #[must_use]
    pub fn last_applied(&self) -> Direction {
        self.last_applied
    }
}

/// Maps one key press to a game input.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Classifies a swipe by its dominant axis.
///
/// Ties go to the vertical axis. The dominant displacement must be strictly
/// greater than `threshold_px`, otherwise the gesture is dropped.
#[must_use]
pub fn classify_swipe(dx_px: i32, dy_px: i32, threshold_px: i32) -> Option<Direction> {
    if dx_px.abs() > dy_px.abs() {
        if dx_px.abs() <= threshold_px {
            return None;
        }
        Some(if dx_px > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        if dy_px.abs() <= threshold_px {
            return None;
        }
        Some(if dy_px > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Tracks one press-drag-release gesture in terminal cell coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, column: u16, row: u16) {
        self.start = Some((column, row));
    }

    /// Finishes the gesture and returns its direction, if it was a swipe.
    pub fn end(&mut self, column: u16, row: u16, threshold_px: i32) -> Option<Direction> {
        let (start_column, start_row) = self.start.take()?;
        let (dx_px, dy_px) = cells_to_logical_px(
            i32::from(column) - i32::from(start_column),
            i32::from(row) - i32::from(start_row),
        );
        classify_swipe(dx_px, dy_px, threshold_px)
    }
}

/// Converts a terminal cell displacement into logical canvas pixels.
#[must_use]
pub fn cells_to_logical_px(d_columns: i32, d_rows: i32) -> (i32, i32) {
    let cell_px = i32::from(CELL_SIZE_PX);
    let columns_per_cell = i32::from(TERMINAL_COLUMNS_PER_CELL);
    (d_columns * cell_px / columns_per_cell, d_rows * cell_px)
}

/// Turns raw terminal events into game inputs.
#[derive(Debug)]
pub struct InputHandler {
    swipe: SwipeTracker,
    swipe_threshold_px: i32,
}

impl InputHandler {
    #[must_use]
    pub fn new(swipe_threshold_px: i32) -> Self {
        Self {
            swipe: SwipeTracker::default(),
            swipe_threshold_px,
        }
    }

    /// Waits up to `timeout` for one terminal event and translates it.
    pub fn poll_input(
        &mut self,
        timeout: Duration,
        layout: &BoardLayout,
    ) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let input = match event::read()? {
            Event::Key(key) => map_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, layout),
            _ => None,
        };
        Ok(input)
    }

    /// Button clicks submit immediately; any other press starts a swipe.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, layout: &BoardLayout) -> Option<GameInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(direction) = layout.button_at(mouse.column, mouse.row) {
                    return Some(GameInput::Direction(direction));
                }
                self.swipe.begin(mouse.column, mouse.row);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self
                .swipe
                .end(mouse.column, mouse.row, self.swipe_threshold_px)
                .map(GameInput::Direction),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::layout::Rect;

    use super::{
        DirectionSlot, GameInput, InputHandler, Submission, SwipeTracker, classify_swipe,
        map_key_event,
    };
    use crate::config::SWIPE_THRESHOLD_PX;
    use crate::grid::Direction;
    use crate::ui::layout::BoardLayout;

    fn press(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn slot_rejects_reversal_of_last_applied_move() {
        let mut slot = DirectionSlot::new();
        assert_eq!(slot.submit(Direction::Left), Submission::Accepted);
        assert_eq!(slot.take_for_tick(), Some(Direction::Left));

        assert_eq!(slot.submit(Direction::Right), Submission::Reversal);
        assert_eq!(slot.pending(), Direction::Left);
    }

    #[test]
    fn slot_is_last_write_wins() {
        let mut slot = DirectionSlot::new();
        slot.submit(Direction::Up);
        slot.submit(Direction::Left);

        assert_eq!(slot.take_for_tick(), Some(Direction::Left));
        assert_eq!(slot.last_applied(), Direction::Left);
    }

    #[test]
    fn quick_double_turn_cannot_reverse() {
        let mut slot = DirectionSlot::new();
        slot.submit(Direction::Left);
        slot.take_for_tick();

        // Up is legal, but Right still reverses the move that actually ran.
        assert_eq!(slot.submit(Direction::Up), Submission::Accepted);
        assert_eq!(slot.submit(Direction::Right), Submission::Reversal);
        assert_eq!(slot.pending(), Direction::Up);
    }

    #[test]
    fn slot_holds_direction_across_ticks() {
        let mut slot = DirectionSlot::new();
        assert_eq!(slot.take_for_tick(), None);

        slot.submit(Direction::Down);
        assert_eq!(slot.take_for_tick(), Some(Direction::Down));
        assert_eq!(slot.take_for_tick(), Some(Direction::Down));
    }

    #[test]
    fn slot_ignores_none() {
        let mut slot = DirectionSlot::new();

        assert_eq!(slot.submit(Direction::None), Submission::NoDirection);
        assert_eq!(slot.pending(), Direction::None);
    }

    #[test]
    fn arrow_keys_and_wasd_map_to_directions() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key_event(key(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(map_key_event(key(KeyCode::Enter)), Some(GameInput::Confirm));
        assert_eq!(map_key_event(key(KeyCode::Char('q'))), Some(GameInput::Quit));
        assert_eq!(map_key_event(key(KeyCode::Tab)), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(map_key_event(event), Some(GameInput::Quit));
    }

    #[test]
    fn swipe_uses_dominant_axis() {
        assert_eq!(classify_swipe(40, 10, 30), Some(Direction::Right));
        assert_eq!(classify_swipe(-40, 35, 30), Some(Direction::Left));
        assert_eq!(classify_swipe(5, -31, 30), Some(Direction::Up));
        assert_eq!(classify_swipe(31, 31, 30), Some(Direction::Down));
    }

    #[test]
    fn short_swipes_are_dropped() {
        assert_eq!(classify_swipe(30, 0, 30), None);
        assert_eq!(classify_swipe(0, -30, 30), None);
        // Dominant axis is short even though it wins the comparison.
        assert_eq!(classify_swipe(25, 20, 30), None);
    }

    #[test]
    fn tracker_converts_cells_to_pixels() {
        let mut tracker = SwipeTracker::default();

        // Four columns = two grid cells = 40 px.
        tracker.begin(10, 5);
        assert_eq!(tracker.end(14, 5, 30), Some(Direction::Right));

        // Three columns = 30 px, not beyond the threshold.
        tracker.begin(10, 5);
        assert_eq!(tracker.end(7, 5, 30), None);

        // Two rows = 40 px.
        tracker.begin(10, 5);
        assert_eq!(tracker.end(10, 3, 30), Some(Direction::Up));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = SwipeTracker::default();

        assert_eq!(tracker.end(30, 30, 30), None);
    }

    #[test]
    fn mouse_drag_and_button_click_become_directions() {
        let layout = BoardLayout::compute(Rect::new(0, 0, 80, 30));
        let mut handler = InputHandler::new(SWIPE_THRESHOLD_PX);

        let down_button = layout
            .buttons
            .iter()
            .find(|button| button.direction == Direction::Down)
            .map(|button| button.area)
            .expect("layout has a down button");
        assert_eq!(
            handler.handle_mouse(
                press(MouseEventKind::Down(MouseButton::Left), down_button.x, down_button.y),
                &layout
            ),
            Some(GameInput::Direction(Direction::Down))
        );

        let board = layout.board_inner;
        let (x, y) = (board.x + 10, board.y + 10);
        assert_eq!(
            handler.handle_mouse(press(MouseEventKind::Down(MouseButton::Left), x, y), &layout),
            None
        );
        assert_eq!(
            handler.handle_mouse(press(MouseEventKind::Up(MouseButton::Left), x, y - 3), &layout),
            Some(GameInput::Direction(Direction::Up))
        );
    }
}
