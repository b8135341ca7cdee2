use std::collections::VecDeque;

use crate::grid::Point;

/// Ordered snake body; the front segment is the head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Point>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Point) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Point>) -> Self {
        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Returns the current head, or `None` for an empty body.
    #[must_use]
    pub fn head(&self) -> Option<Point> {
        self.body.front().copied()
    }

    /// Returns true if any segment occupies `point`.
    #[must_use]
    pub fn occupies(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    /// Adds a new head segment.
    pub fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
    }

    /// Removes and returns the tail segment.
    pub fn pop_tail(&mut self) -> Option<Point> {
        self.body.pop_back()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }
}
