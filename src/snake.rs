use std::collections::VecDeque;

use crate::grid::Grid;
use crate::Coords;
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Stop,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> Coords {
        match self {
            Stop => (0, 0),
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right)
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    SelfBite,
}

impl Crash {
    pub fn describe(self) -> &'static str {
        match self {
            Crash::Wall => "wall",
            Crash::SelfBite => "self",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Option<Coords> },
    Crashed(Crash),
    Idle,
}

/// Body is stored head first.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
    heading: Direction,
}

impl Snake {
    pub fn new(head: Coords, size: usize, heading: Direction) -> Self {
        let diff = heading.delta();

        let body = (0..size as i32)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body, direction: Stop, heading }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn next_head(&self) -> Option<Coords> {
        if self.direction == Stop {
            return None;
        }

        let head = self.head();
        let diff = self.direction.delta();
        Some((head.0 + diff.0, head.1 + diff.1))
    }

    pub fn move_step(&mut self, grid: Grid, grow: bool) -> MoveResult {
        let new_head = match self.next_head() {
            Some(pos) => pos,
            None => return Idle,
        };

        if !grid.contains(new_head) {
            return Crashed(Crash::Wall);
        }

        if self.occupies(new_head) {
            return Crashed(Crash::SelfBite);
        }

        self.body.push_front(new_head);
        self.heading = self.direction;

        if grow {
            Moved { new_head, old_tail: None }
        } else {
            Moved { new_head, old_tail: self.body.pop_back() }
        }
    }

    /// Rejects a turn straight back onto the neck. Compared against the
    /// heading of the last step, so two quick presses within one tick can't
    /// reverse the snake either.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == Stop || new_direction.is_opposite(self.heading) {
            return false;
        }

        self.direction = new_direction;
        true
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn head_char(&self) -> char {
        match self.heading {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right | Stop => '>',
        }
    }
}
