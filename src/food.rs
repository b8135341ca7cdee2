use rand::Rng;

use crate::grid::{GridSize, Point};

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Point,
}

impl Food {
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    /// Spawns food uniformly over the whole grid.
    ///
    /// Cells under the snake are not excluded, so food can land on the body.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Self {
        Self::new(spawn_position(rng, bounds))
    }

    /// Returns true when `head` lands exactly on this food.
    #[must_use]
    pub fn is_eaten_by(self, head: Point) -> bool {
        self.position == head
    }
}

/// Draws a uniformly random cell inside `bounds`.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Point {
    debug_assert!(bounds.width > 0 && bounds.height > 0);

    Point {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}
