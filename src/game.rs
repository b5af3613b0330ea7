use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

use crate::error::AppError;
use crate::events::{EventSink, GameEvent};
use crate::input;
use crate::render;
use crate::state::{Flow, GameState, Phase};
use crate::term::TermManager;

const POLL_INTERVAL_MS: u64 = 5;
const FRAME_INTERVAL_MS: u64 = 16;

pub struct SnakeGame<R> {
    state: GameState<R>,
    term: TermManager,
    sink: Box<dyn EventSink>,
    fps: FpsCounter,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(state: GameState<R>, sink: Box<dyn EventSink>) -> Self {
        SnakeGame { state, term: TermManager::new(), sink, fps: FpsCounter::new(Instant::now()) }
    }

    /// Runs until the player quits. The terminal is restored on every path out.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.term.setup()?;
        let res = self.check_size().and_then(|_| self.play());
        self.term.restore()?;
        res
    }

    ///////////////////////////////////////////////////////////////////////////

    fn check_size(&self) -> Result<(), AppError> {
        let frame = render::render(&self.state);
        let need_cols = render::max_width(&self.state) as u16;
        // Leave a row for the FPS readout
        let need_rows = frame.height() as u16 + 1;

        let (cols, rows) = self.term.size()?;
        if cols < need_cols || rows < need_rows {
            return Err(AppError::TerminalTooSmall { cols, rows, need_cols, need_rows });
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), AppError> {
        let grid = self.state.grid();
        info!("Session started on a {}x{} grid", grid.width(), grid.height());
        self.sink.record(&GameEvent::SessionStart { width: grid.width(), height: grid.height() });

        let mut last_step = Instant::now();
        let mut last_frame: Option<Instant> = None;

        loop {
            if let Some(key) = self.term.poll_key(Duration::from_millis(POLL_INTERVAL_MS))? {
                let was_running = self.state.phase() == Phase::Running;
                if self.state.apply(input::command_for(&key)) == Flow::Quit {
                    break;
                }
                // Don't count time spent outside Running towards the next step
                if !was_running {
                    last_step = Instant::now();
                }
            }

            if self.state.phase() == Phase::Running && last_step.elapsed() >= self.state.speed() {
                last_step = Instant::now();
                self.state.step();
            }

            self.forward_events();

            let now = Instant::now();
            let due = last_frame
                .map(|t| now.duration_since(t) >= Duration::from_millis(FRAME_INTERVAL_MS))
                .unwrap_or(true);
            if due {
                last_frame = Some(now);
                let fps = self.fps.tick(now);
                let mut frame = render::render(&self.state);
                frame.push_status(format!("FPS: {}", fps));
                self.term.draw(&frame)?;
            }
        }

        self.forward_events();
        info!("Session ended, high score {}", self.state.high_score());
        self.sink.record(&GameEvent::SessionEnd { high_score: self.state.high_score() });
        Ok(())
    }

    fn forward_events(&mut self) {
        for event in self.state.take_events() {
            self.sink.record(&event);
        }
    }
}

/// Frames drawn during the last full second
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    current: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        FpsCounter { window_start: now, frames: 0, current: 0 }
    }

    /// Counts a frame drawn at `now` and returns the readout to show with it.
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.frames += 1;

        let elapsed = now.duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.current = (self.frames as f64 / elapsed.as_secs_f64()).round() as u32;
            self.frames = 0;
            self.window_start = now;
        }

        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_updates_once_per_window() {
        let start = Instant::now();
        let mut fps = FpsCounter::new(start);

        for i in 1..60 {
            assert_eq!(fps.tick(start + Duration::from_millis(i * 16)), 0);
        }
        assert_eq!(fps.tick(start + Duration::from_millis(1000)), 60);

        // Next window starts fresh
        assert_eq!(fps.tick(start + Duration::from_millis(1100)), 60);
        for i in 0..29 {
            fps.tick(start + Duration::from_millis(1200 + i * 20));
        }
        assert_eq!(fps.tick(start + Duration::from_millis(2000)), 31);
    }
}
