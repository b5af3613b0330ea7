use crate::food;
use crate::state::{GameState, Phase};

const BORDER_CHAR: char = '#';
const SNAKE_BODY_CHAR: char = 'o';
const DEAD_SNAKE_CHAR: char = 'X';

const CONTROLS: &str = "WASD/arrows move  P pause  R restart  Q quit";

/// One screenful: the bordered board followed by the status lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub board: Vec<String>,
    pub status: Vec<String>,
}

impl Frame {
    pub fn push_status(&mut self, line: impl Into<String>) {
        self.status.push(line.into());
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.board.iter().chain(self.status.iter()).map(String::as_str)
    }

    pub fn height(&self) -> usize {
        self.board.len() + self.status.len()
    }

    pub fn width(&self) -> usize {
        self.lines().map(|l| l.chars().count()).max().unwrap_or(0)
    }
}

pub fn render<R>(state: &GameState<R>) -> Frame {
    let grid = state.grid();
    let (w, h) = (grid.width() as usize, grid.height() as usize);
    let mut cells = vec![vec![' '; w]; h];

    for food in state.foods() {
        cells[food.pos.1 as usize][food.pos.0 as usize] = food.glyph();
    }

    let dead = state.phase() == Phase::GameOver { won: false };
    let snake = state.snake();
    for (i, pos) in snake.body().iter().enumerate() {
        let ch = if dead {
            DEAD_SNAKE_CHAR
        } else if i == 0 {
            snake.head_char()
        } else {
            SNAKE_BODY_CHAR
        };
        cells[pos.1 as usize][pos.0 as usize] = ch;
    }

    let edge: String = std::iter::repeat(BORDER_CHAR).take(w + 2).collect();
    let mut board = Vec::with_capacity(h + 2);
    board.push(edge.clone());
    for row in cells {
        let mut line = String::with_capacity(w + 2);
        line.push(BORDER_CHAR);
        line.extend(row);
        line.push(BORDER_CHAR);
        board.push(line);
    }
    board.push(edge);

    let status = vec![
        progress_line(
            state.score(),
            state.high_score(),
            state.level(),
            snake.len(),
            state.speed().as_millis(),
        ),
        CONTROLS.to_string(),
        banner(state.phase(), state.score()),
    ];

    Frame { board, status }
}

/// Upper bound on the width of any frame this game can render, board and
/// status lines included.
pub fn max_width<R>(state: &GameState<R>) -> usize {
    let grid = state.grid();
    let cells = (grid.width() * grid.height()) as u32;
    // Every cell eaten at the richest tier
    let score = cells.saturating_mul(food::max_points());
    let level = 1 + cells;
    let slowest = state.initial_speed();

    let progress = progress_line(score, score, level, cells as usize, slowest.as_millis());
    let game_over = banner(Phase::GameOver { won: false }, score);

    [grid.width() as usize + 2, progress.len(), CONTROLS.len(), game_over.len()]
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
}

fn progress_line(score: u32, high_score: u32, level: u32, length: usize, speed_ms: u128) -> String {
    format!(
        "Score: {}  High score: {}  Level: {}  Length: {}  Speed: {}ms",
        score, high_score, level, length, speed_ms
    )
}

fn banner(phase: Phase, score: u32) -> String {
    match phase {
        Phase::Menu => "SNAKE - press Enter to start".to_string(),
        Phase::Running => String::new(),
        Phase::Paused => "Paused - press P to resume".to_string(),
        Phase::GameOver { won } => format!(
            "{} Final score: {} - R to play again, any other key to quit",
            if won { "You won!" } else { "Game over!" },
            score
        ),
    }
}
