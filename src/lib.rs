//! Tick-based grid Snake: simulation engine, input arbitration, terminal
//! renderer and a bridge to an external high-score store.

pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod timer;
pub mod ui;
