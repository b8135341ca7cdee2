use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{GameConfig, SCORE_REQUEST_TIMEOUT, THEME_SLATE};
use grid_snake::engine::{Engine, TickOutcome};
use grid_snake::error::AppError;
use grid_snake::game::GameStatus;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging::{default_log_path, init_file_logger};
use grid_snake::renderer;
use grid_snake::score::{FileScoreBridge, HttpScoreBridge, ScoreBridge, ScoreKeeper};
use grid_snake::terminal_runtime::{AppTerminal, TerminalSession, install_panic_hook};
use grid_snake::ui::hud::HudInfo;
use grid_snake::ui::layout::BoardLayout;
use log::{LevelFilter, debug, info};
use ratatui::layout::Rect;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the high-score service, e.g. http://localhost:8000.
    /// Without it scores are kept in a local file.
    #[arg(long = "score-url")]
    score_url: Option<String>,

    /// Local score file used when no service URL is given.
    #[arg(long = "score-file")]
    score_file: Option<PathBuf>,

    /// Seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// off, error, warn, info, debug or trace.
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(error) = init_file_logger(&log_path, cli.log_level) {
        eprintln!("Logging disabled: {error}");
    }

    install_panic_hook();
    run(&cli)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let mut scores = ScoreKeeper::spawn(score_bridge(cli))?;

    let config = GameConfig::default();
    let mut engine = match cli.seed {
        Some(seed) => Engine::with_seed(config, seed),
        None => Engine::new(config),
    };

    let result = {
        let mut session = TerminalSession::enter()?;
        game_loop(session.terminal_mut(), &mut engine, &mut scores)
    };

    scores.shutdown();
    info!("exiting");
    result
}

fn score_bridge(cli: &Cli) -> Arc<dyn ScoreBridge> {
    if let Some(url) = &cli.score_url {
        let bridge = HttpScoreBridge::new(url, SCORE_REQUEST_TIMEOUT);
        info!("using score service at {}", bridge.endpoint());
        return Arc::new(bridge);
    }

    let bridge = cli
        .score_file
        .clone()
        .map_or_else(FileScoreBridge::at_default_path, FileScoreBridge::new);
    info!("using score file {}", bridge.path().display());
    Arc::new(bridge)
}

fn game_loop(
    terminal: &mut AppTerminal,
    engine: &mut Engine,
    scores: &mut ScoreKeeper,
) -> Result<(), AppError> {
    let mut input = InputHandler::new(engine.config().swipe_threshold_px);
    let mut layout = BoardLayout::compute(Rect::default());
    let mut reference_high_score = scores.high_score();

    loop {
        if scores.poll() {
            debug!("known high score is now {}", scores.high_score());
        }
        if engine.state().status != GameStatus::GameOver {
            reference_high_score = scores.high_score();
        }

        let hud_info = HudInfo {
            high_score: scores.high_score(),
            reference_high_score,
            theme: &THEME_SLATE,
        };
        terminal.draw(|frame| {
            layout = renderer::render(frame, engine.state(), &hud_info);
        })?;

        let timeout = engine
            .timer()
            .remaining(Instant::now())
            .map_or(FRAME_INTERVAL, |remaining| remaining.min(FRAME_INTERVAL));

        match input.poll_input(timeout, &layout)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Confirm) if engine.state().status != GameStatus::Playing => {
                engine.start(Instant::now());
            }
            Some(GameInput::Direction(direction)) => {
                engine.submit_direction(direction);
            }
            Some(GameInput::Confirm) | None => {}
        }

        match engine.advance(Instant::now()) {
            Some(TickOutcome::Grew { score, speed_ms }) => {
                debug!("score {score}, tick period now {speed_ms} ms");
            }
            Some(TickOutcome::GameOver { final_score, .. }) => {
                scores.record_game_over(final_score);
            }
            _ => {}
        }
    }

    Ok(())
}
