mod config;
mod error;
mod events;
mod food;
mod game;
mod grid;
mod input;
mod render;
mod snake;
mod state;
mod term;

use std::fs::OpenOptions;
use std::process::exit;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ConfigProvider, FileConfig, CONFIG_FILE, EVENT_LOG_FILE};
use crate::error::AppError;
use crate::events::FileEventSink;
use crate::game::SnakeGame;
use crate::state::GameState;

pub type Coords = (i32, i32);

/// Diagnostics file, written only when RUST_LOG is set. The terminal itself
/// belongs to the game screen.
const TRACE_FILE: &str = "snake-trace.log";

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("snake: {}", e);
        exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = FileConfig::new(CONFIG_FILE).load();
    let sink = FileEventSink::open(EVENT_LOG_FILE);

    let mut game = SnakeGame::new(GameState::new(config), Box::new(sink));
    game.run()
}

fn init_tracing() {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => return,
    };

    let file = match OpenOptions::new().create(true).append(true).open(TRACE_FILE) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("snake: can't open {}: {}", TRACE_FILE, e);
            return;
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
}
