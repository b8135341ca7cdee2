use crate::config::GameConfig;
use crate::food::Food;
use crate::grid::{Direction, GridSize};
use crate::input::DirectionSlot;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Playing,
    GameOver,
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete game state for one round.
///
/// Only the engine mutates this; everything else reads it by reference.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub direction: DirectionSlot,
    pub speed_ms: u64,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    bounds: GridSize,
}

impl GameState {
    /// Fresh idle state: one-cell snake at the start point, no direction yet.
    #[must_use]
    pub fn new(config: &GameConfig, food: Food) -> Self {
        Self {
            snake: Snake::new(config.start),
            food,
            direction: DirectionSlot::new(),
            speed_ms: config.initial_speed_ms,
            score: 0,
            tick_count: 0,
            status: GameStatus::Idle,
            death_reason: None,
            bounds: config.grid,
        }
    }

    /// Returns board dimensions for this state.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.direction.pending()
    }

    #[must_use]
    pub fn last_applied_direction(&self) -> Direction {
        self.direction.last_applied()
    }

    /// Score a game-over at this point would report.
    #[must_use]
    pub fn final_score(&self) -> u32 {
        u32::try_from(self.snake.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_start_screen(&self) -> bool {
        self.status == GameStatus::Idle
    }
}
