//! Game event log

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    SessionStart { width: i32, height: i32 },
    SessionEnd { high_score: u32 },
    GameStarted,
    FoodEaten { x: i32, y: i32, points: u32, score: u32, length: usize },
    LevelUp { level: u32, speed_ms: u64 },
    GameOver { score: u32, high_score: u32, won: bool, cause: Option<String> },
}

#[derive(Serialize)]
struct LogEntry<'a> {
    /// Unix timestamp in milliseconds
    timestamp_ms: u128,
    #[serde(flatten)]
    event: &'a GameEvent,
}

pub trait EventSink {
    fn record(&mut self, event: &GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn record(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Appends one JSON object per line. Write failures are swallowed so a full
/// disk never ends a game.
pub struct FileEventSink {
    writer: Option<BufWriter<File>>,
}

impl FileEventSink {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                info!("Event logging enabled, writing to {}", path.display());
                FileEventSink { writer: Some(BufWriter::new(file)) }
            }
            Err(e) => {
                error!("Failed to open event log {}: {}", path.display(), e);
                FileEventSink { writer: None }
            }
        }
    }
}

impl EventSink for FileEventSink {
    fn record(&mut self, event: &GameEvent) {
        let w = match self.writer.as_mut() {
            Some(w) => w,
            None => return,
        };

        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        if let Ok(json) = serde_json::to_string(&LogEntry { timestamp_ms, event }) {
            let _ = writeln!(w, "{}", json);
            let _ = w.flush();
        }
    }
}
