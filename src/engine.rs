use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::food::Food;
use crate::game::{DeathReason, GameState, GameStatus};
use crate::grid::Direction;
use crate::input::Submission;
use crate::timer::TickTimer;

/// What one tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The round is not running.
    NotPlaying,
    /// No direction chosen yet; the snake stays put.
    Waiting,
    Moved,
    /// Food eaten. `score` is the score-update notification.
    Grew { score: u32, speed_ms: u64 },
    /// Round ended. `final_score` is the game-over notification.
    GameOver {
        final_score: u32,
        reason: DeathReason,
    },
}

/// Owns the authoritative game state and the tick schedule driving it.
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
    timer: TickTimer,
}

impl Engine {
    /// Creates an idle engine with an entropy-seeded food generator.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates an idle engine with deterministic food placement.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Resumes from an explicit state, e.g. a scripted board position.
    ///
    /// When the state is `Playing` it ticks straight away through
    /// [`Engine::tick`]; call [`Engine::arm_timer`] to drive it by time.
    #[must_use]
    pub fn from_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        Self {
            config,
            state,
            rng: StdRng::seed_from_u64(seed),
            timer: TickTimer::new(),
        }
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let food = Food::spawn(&mut rng, config.grid);
        Self {
            config,
            state: GameState::new(&config, food),
            rng,
            timer: TickTimer::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// Current tick period.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.speed_ms)
    }

    /// Resets to a fresh board and begins a round. Valid from any status.
    pub fn start(&mut self, now: Instant) {
        self.reset_state();
        self.state.status = GameStatus::Playing;
        self.arm_timer(now);
        info!(
            "round started: head {:?}, food {:?}",
            self.state.snake.head(),
            self.state.food.position
        );
    }

    /// Returns to a fresh idle board and stops ticking.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.reset_state();
    }

    /// Starts the tick schedule at the current speed.
    pub fn arm_timer(&mut self, now: Instant) {
        self.timer.arm(self.tick_interval(), now);
    }

    fn reset_state(&mut self) {
        let food = Food::spawn(&mut self.rng, self.config.grid);
        self.state = GameState::new(&self.config, food);
    }

    /// Offers a direction for the next tick.
    pub fn submit_direction(&mut self, requested: Direction) -> Submission {
        if self.state.status != GameStatus::Playing {
            debug!("ignored {requested:?}: round is {:?}", self.state.status);
            return Submission::NotPlaying;
        }

        let submission = self.state.direction.submit(requested);
        if submission != Submission::Accepted {
            debug!(
                "rejected {requested:?} ({submission:?}); last applied {:?}",
                self.state.last_applied_direction()
            );
        }
        submission
    }

    /// Runs one tick if the schedule is due, re-arming or cancelling it as
    /// the outcome requires.
    pub fn advance(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.state.status != GameStatus::Playing {
            self.timer.cancel();
            return None;
        }

        if !self.timer.fire_if_due(now) {
            return None;
        }

        let outcome = self.tick();
        if let TickOutcome::Grew { speed_ms, .. } = outcome {
            self.timer.arm(Duration::from_millis(speed_ms), now);
        }
        Some(outcome)
    }

    /// Advances the simulation by exactly one step.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.status != GameStatus::Playing {
            return TickOutcome::NotPlaying;
        }

        let Some(direction) = self.state.direction.take_for_tick() else {
            return TickOutcome::Waiting;
        };

        let Some(head) = self.state.snake.head() else {
            warn!("playing with an empty snake; ending round");
            return self.end_round(DeathReason::SelfCollision);
        };

        self.state.tick_count += 1;
        let new_head = head.offset(direction);

        if !new_head.is_within_bounds(self.state.bounds()) {
            return self.end_round(DeathReason::WallCollision);
        }

        if self.state.snake.occupies(new_head) {
            return self.end_round(DeathReason::SelfCollision);
        }

        self.state.snake.push_head(new_head);

        if !self.state.food.is_eaten_by(new_head) {
            let _ = self.state.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.state.score = self.state.final_score();
        self.state.food = Food::spawn(&mut self.rng, self.config.grid);
        self.state.speed_ms = self.config.next_speed_ms(self.state.speed_ms);

        if self.state.snake.occupies(self.state.food.position) {
            debug!("food spawned under the snake at {:?}", self.state.food.position);
        }

        TickOutcome::Grew {
            score: self.state.score,
            speed_ms: self.state.speed_ms,
        }
    }

    fn end_round(&mut self, reason: DeathReason) -> TickOutcome {
        let final_score = self.state.final_score();

        self.timer.cancel();
        self.state.status = GameStatus::GameOver;
        self.state.death_reason = Some(reason);
        self.state.score = final_score;
        info!(
            "round over after {} ticks: {reason:?}, final score {final_score}",
            self.state.tick_count
        );

        TickOutcome::GameOver {
            final_score,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{Engine, TickOutcome};
    use crate::config::{GameConfig, MIN_SPEED_MS};
    use crate::food::Food;
    use crate::game::{DeathReason, GameState, GameStatus};
    use crate::grid::{Direction, Point};
    use crate::input::Submission;
    use crate::snake::Snake;

    fn playing_engine(segments: Vec<Point>, last_move: Direction, food: Point) -> Engine {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Food::new(food));
        state.snake = Snake::from_segments(segments);
        state.status = GameStatus::Playing;
        if !last_move.is_none() {
            state.direction.submit(last_move);
            state.direction.take_for_tick();
        }
        Engine::from_state(config, state, 5)
    }

    fn segments(state: &GameState) -> Vec<Point> {
        state.snake.segments().copied().collect()
    }

    #[test]
    fn snake_waits_for_first_input() {
        let mut engine = Engine::with_seed(GameConfig::default(), 1);
        engine.start(Instant::now());

        for _ in 0..5 {
            assert_eq!(engine.tick(), TickOutcome::Waiting);
        }

        assert_eq!(segments(engine.state()), vec![Point::new(10, 10)]);
        assert_eq!(engine.state().status, GameStatus::Playing);
    }

    #[test]
    fn single_step_moves_without_growth() {
        let mut engine = playing_engine(vec![Point::new(10, 10)], Direction::None, Point::new(0, 0));

        engine.submit_direction(Direction::Right);
        assert_eq!(engine.tick(), TickOutcome::Moved);

        assert_eq!(segments(engine.state()), vec![Point::new(11, 10)]);
        assert_eq!(engine.state().score, 0);
    }

    #[test]
    fn eating_grows_scores_and_speeds_up() {
        let mut engine = playing_engine(
            vec![Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
            Point::new(6, 5),
        );

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::Grew {
                score: 3,
                speed_ms: 195
            }
        );
        assert_eq!(engine.state().snake.len(), 4);
        assert_eq!(engine.state().score, 3);
        assert_eq!(engine.state().speed_ms, 195);
        assert!(engine.state().food.position.is_within_bounds(engine.state().bounds()));
    }

    #[test]
    fn wall_collision_freezes_board() {
        let body = vec![Point::new(0, 10), Point::new(1, 10)];
        let mut engine = playing_engine(body.clone(), Direction::Left, Point::new(15, 15));

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                final_score: 1,
                reason: DeathReason::WallCollision
            }
        );
        assert_eq!(engine.state().status, GameStatus::GameOver);
        assert_eq!(segments(engine.state()), body);
        assert_eq!(engine.tick(), TickOutcome::NotPlaying);
        assert_eq!(segments(engine.state()), body);
    }

    #[test]
    fn self_collision_ends_round() {
        // Head at (2,2) moving up into its own body at (2,1).
        let body = vec![
            Point::new(2, 2),
            Point::new(3, 2),
            Point::new(3, 1),
            Point::new(2, 1),
            Point::new(1, 1),
        ];
        let mut engine = playing_engine(body, Direction::Left, Point::new(15, 15));
        assert_eq!(engine.submit_direction(Direction::Up), Submission::Accepted);

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                final_score: 4,
                reason: DeathReason::SelfCollision
            }
        );
        assert_eq!(engine.state().death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn reversal_is_rejected_but_turn_is_accepted() {
        let mut engine = playing_engine(
            vec![Point::new(5, 5), Point::new(6, 5), Point::new(7, 5)],
            Direction::Left,
            Point::new(15, 15),
        );

        assert_eq!(engine.submit_direction(Direction::Right), Submission::Reversal);
        assert_eq!(engine.state().pending_direction(), Direction::Left);

        assert_eq!(engine.submit_direction(Direction::Up), Submission::Accepted);
        engine.tick();

        assert_eq!(engine.state().snake.head(), Some(Point::new(5, 4)));
    }

    #[test]
    fn input_is_ignored_outside_a_round() {
        let mut engine = Engine::with_seed(GameConfig::default(), 2);

        assert_eq!(engine.submit_direction(Direction::Up), Submission::NotPlaying);
        assert_eq!(engine.state().pending_direction(), Direction::None);
        assert_eq!(engine.tick(), TickOutcome::NotPlaying);
    }

    #[test]
    fn start_resets_a_finished_round() {
        let mut engine = playing_engine(vec![Point::new(0, 0)], Direction::Up, Point::new(9, 9));
        engine.tick();
        assert_eq!(engine.state().status, GameStatus::GameOver);

        engine.start(Instant::now());

        let state = engine.state();
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(segments(state), vec![Point::new(10, 10)]);
        assert_eq!(state.pending_direction(), Direction::None);
        assert_eq!(state.last_applied_direction(), Direction::None);
        assert_eq!(state.speed_ms, 200);
        assert_eq!(state.score, 0);
        assert_eq!(state.death_reason, None);
    }

    #[test]
    fn reset_returns_to_idle_and_stops_the_timer() {
        let mut engine = Engine::with_seed(GameConfig::default(), 3);
        engine.start(Instant::now());
        assert!(engine.timer().is_armed());

        engine.reset();

        assert_eq!(engine.state().status, GameStatus::Idle);
        assert!(!engine.timer().is_armed());
    }

    #[test]
    fn advance_follows_the_timer() {
        let start = Instant::now();
        let mut engine = Engine::with_seed(GameConfig::default(), 4);
        engine.start(start);
        engine.submit_direction(Direction::Up);

        assert_eq!(engine.advance(start + Duration::from_millis(100)), None);
        assert_eq!(
            engine.advance(start + Duration::from_millis(200)),
            Some(TickOutcome::Moved)
        );
        assert_eq!(engine.state().snake.head(), Some(Point::new(10, 9)));
    }

    #[test]
    fn growth_rearms_timer_at_the_new_speed() {
        let start = Instant::now();
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Food::new(Point::new(10, 9)));
        state.status = GameStatus::Playing;
        let mut engine = Engine::from_state(config, state, 6);
        engine.arm_timer(start);
        engine.submit_direction(Direction::Up);

        let ate_at = start + Duration::from_millis(200);
        assert!(matches!(
            engine.advance(ate_at),
            Some(TickOutcome::Grew { speed_ms: 195, .. })
        ));
        assert_eq!(engine.timer().period(), Some(Duration::from_millis(195)));
        assert_eq!(engine.advance(ate_at + Duration::from_millis(194)), None);
        assert!(engine.advance(ate_at + Duration::from_millis(195)).is_some());
    }

    #[test]
    fn game_over_cancels_the_timer() {
        let start = Instant::now();
        let mut engine = playing_engine(vec![Point::new(0, 0)], Direction::Left, Point::new(9, 9));
        engine.arm_timer(start);

        let outcome = engine.advance(start + Duration::from_millis(200));

        assert!(matches!(outcome, Some(TickOutcome::GameOver { .. })));
        assert!(!engine.timer().is_armed());
        assert_eq!(engine.advance(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn speed_never_drops_below_minimum() {
        let config = GameConfig::default();
        let mut engine = playing_engine(vec![Point::new(0, 0)], Direction::None, Point::new(1, 0));
        engine.submit_direction(Direction::Right);

        let mut previous = engine.state().speed_ms;
        for x in 1..20 {
            // Put food directly ahead so every step is a growth tick.
            let mut state = engine.state().clone();
            state.food = Food::new(Point::new(x, 0));
            engine = Engine::from_state(config, state, 7);
            engine.tick();

            let speed = engine.state().speed_ms;
            assert!(speed <= previous);
            assert!(speed >= MIN_SPEED_MS);
            previous = speed;
        }
        assert_eq!(engine.state().snake.len(), 20);
    }

    #[test]
    fn growth_near_the_floor_clamps_to_minimum_speed() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, Food::new(Point::new(11, 10)));
        state.snake = Snake::from_segments(vec![Point::new(10, 10)]);
        state.status = GameStatus::Playing;
        state.speed_ms = 52;
        let mut engine = Engine::from_state(config, state, 8);
        engine.submit_direction(Direction::Right);

        assert_eq!(
            engine.tick(),
            TickOutcome::Grew {
                score: 1,
                speed_ms: MIN_SPEED_MS
            }
        );

        let mut state = engine.state().clone();
        state.food = Food::new(Point::new(12, 10));
        let mut engine = Engine::from_state(config, state, 8);
        let start = Instant::now();
        engine.arm_timer(start);

        assert_eq!(
            engine.advance(start + Duration::from_millis(50)),
            Some(TickOutcome::Grew {
                score: 2,
                speed_ms: MIN_SPEED_MS
            })
        );
        assert_eq!(engine.state().speed_ms, MIN_SPEED_MS);
        assert_eq!(
            engine.timer().period(),
            Some(Duration::from_millis(MIN_SPEED_MS))
        );
    }
}
