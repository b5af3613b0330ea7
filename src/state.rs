use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::events::GameEvent;
use crate::food::{self, Food};
use crate::grid::Grid;
use crate::input::Command;
use crate::snake::{Direction, MoveResult, Snake};
use crate::Coords;

const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Running,
    Paused,
    GameOver { won: bool },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything a game needs between ticks. Rendering and the loop only read
/// it; `apply` and `step` are the only ways it changes.
pub struct GameState<R = ThreadRng> {
    config: Config,
    grid: Grid,
    snake: Snake,
    foods: Vec<Food>,
    phase: Phase,
    score: u32,
    high_score: u32,
    eaten: u32,
    events: Vec<GameEvent>,
    rng: R,
}

impl GameState<ThreadRng> {
    pub fn new(config: Config) -> Self {
        GameState::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(config: Config, rng: R) -> Self {
        let grid = Grid::new(config.width, config.height);
        let snake = Snake::new(grid.center(), INITIAL_SNAKE_LENGTH, Direction::Right);

        let mut state = GameState {
            config,
            grid,
            snake,
            foods: vec![],
            phase: Phase::Menu,
            score: 0,
            high_score: 0,
            eaten: 0,
            events: vec![],
            rng,
        };
        state.reset();
        state
    }

    /// Fresh snake and food. The score so far counts toward the high score,
    /// even for a game abandoned mid-way.
    pub fn reset(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.snake = Snake::new(self.grid.center(), INITIAL_SNAKE_LENGTH, Direction::Right);
        self.score = 0;
        self.eaten = 0;
        self.foods = food::spawn(self.grid, &self.snake, &[], self.config.food_count, &mut self.rng);
    }

    pub fn apply(&mut self, command: Command) -> Flow {
        use Command::*;

        match (self.phase, command) {
            (_, Quit) => return Flow::Quit,

            (Phase::Menu, Confirm) => self.start(),
            (Phase::Menu, Turn(dir)) => {
                self.start();
                self.snake.set_direction(dir);
            }

            (Phase::Running, Turn(dir)) => {
                if !self.snake.set_direction(dir) {
                    debug!("Rejected turn {:?} while heading {:?}", dir, self.snake.heading());
                }
            }
            (Phase::Running, TogglePause) => self.phase = Phase::Paused,
            (Phase::Paused, TogglePause) | (Phase::Paused, Confirm) => self.phase = Phase::Running,
            (Phase::Running, Restart) | (Phase::Paused, Restart) => self.restart(),

            (Phase::GameOver { .. }, Restart) | (Phase::GameOver { .. }, Confirm) => self.restart(),
            (Phase::GameOver { .. }, _) => return Flow::Quit,

            _ => {}
        }

        Flow::Continue
    }

    /// Advances the game by one tick
    pub fn step(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        let eats = match self.snake.next_head() {
            Some(head) => self.foods.iter().position(|f| f.pos == head),
            None => return,
        };

        match self.snake.move_step(self.grid, eats.is_some()) {
            MoveResult::Idle => {}
            MoveResult::Crashed(crash) => {
                info!("Crashed into {} with score {}", crash.describe(), self.score);
                self.end(false, Some(crash.describe()));
            }
            MoveResult::Moved { new_head, .. } => {
                if let Some(i) = eats {
                    self.eat(i, new_head);
                }
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn start(&mut self) {
        self.phase = Phase::Running;
        self.events.push(GameEvent::GameStarted);
    }

    fn restart(&mut self) {
        self.reset();
        self.start();
    }

    fn eat(&mut self, index: usize, pos: Coords) {
        let level_before = self.level();
        let eaten = self.foods.remove(index);

        self.score += eaten.points();
        self.eaten += 1;
        self.events.push(GameEvent::FoodEaten {
            x: pos.0,
            y: pos.1,
            points: eaten.points(),
            score: self.score,
            length: self.snake.len(),
        });

        let level = self.level();
        if level > level_before {
            let speed_ms = self.speed().as_millis() as u64;
            info!("Level {} reached, tick is now {}ms", level, speed_ms);
            self.events.push(GameEvent::LevelUp { level, speed_ms });
        }

        if self.foods.is_empty() {
            self.foods = food::spawn(self.grid, &self.snake, &[], self.config.food_count, &mut self.rng);
            if self.foods.is_empty() {
                info!("Board filled with score {}", self.score);
                self.end(true, None);
            }
        }
    }

    fn end(&mut self, won: bool, cause: Option<&str>) {
        self.phase = Phase::GameOver { won };
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
            won,
            cause: cause.map(str::to_string),
        });
    }
}

impl<R> GameState<R> {
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[cfg(test)]
    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn level(&self) -> u32 {
        1 + self.eaten / self.config.foods_per_level
    }

    pub fn speed(&self) -> Duration {
        self.config.tick_interval(self.level())
    }

    /// Tick interval at level 1, the slowest a game runs
    pub fn initial_speed(&self) -> Duration {
        self.config.tick_interval(1)
    }
}

#[cfg(test)]
impl<R> GameState<R> {
    pub(crate) fn place(&mut self, snake: Snake, foods: Vec<Food>) {
        self.snake = snake;
        self.foods = foods;
    }

    pub(crate) fn resize(&mut self, width: i32, height: i32) {
        self.config.width = width;
        self.config.height = height;
        self.grid = Grid::new(width, height);
    }
}
