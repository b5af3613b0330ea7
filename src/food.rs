use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::Grid;
use crate::snake::Snake;
use crate::Coords;

const BASE_POINTS: u32 = 10;
const TIER_BONUS: u32 = 5;
const FOOD_CHARS: [char; 3] = ['*', '$', '@'];
/// Batches hold at most 9 foods (see `food_count` in the config)
const MAX_TIER: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub pos: Coords,
    /// Slot index within the batch it was spawned in
    pub tier: usize,
}

impl Food {
    pub fn new(pos: Coords, tier: usize) -> Self {
        Food { pos, tier }
    }

    pub fn points(&self) -> u32 {
        BASE_POINTS + TIER_BONUS * self.tier as u32
    }

    pub fn glyph(&self) -> char {
        FOOD_CHARS[self.tier.min(FOOD_CHARS.len() - 1)]
    }
}

/// Most points a single food can be worth
pub fn max_points() -> u32 {
    Food::new((0, 0), MAX_TIER).points()
}

pub fn free_cells(grid: Grid, snake: &Snake, foods: &[Food]) -> Vec<Coords> {
    grid.cells()
        .filter(|pos| !snake.occupies(*pos) && !foods.iter().any(|f| f.pos == *pos))
        .collect()
}

/// Places up to `count` foods on distinct free cells. Returns fewer when the
/// board doesn't have room for all of them.
pub fn spawn<R: Rng + ?Sized>(
    grid: Grid,
    snake: &Snake,
    foods: &[Food],
    count: usize,
    rng: &mut R,
) -> Vec<Food> {
    let choices = free_cells(grid, snake, foods);

    choices
        .choose_multiple(rng, count)
        .enumerate()
        .map(|(tier, pos)| Food::new(*pos, tier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn points_are_tiered() {
        assert_eq!(Food::new((0, 0), 0).points(), 10);
        assert_eq!(Food::new((0, 0), 1).points(), 15);
        assert_eq!(Food::new((0, 0), 2).points(), 20);
        assert_eq!(Food::new((0, 0), 7).glyph(), '@');
        assert_eq!(max_points(), 50);
    }

    #[test]
    fn free_cells_skip_snake_and_food() {
        let grid = Grid::new(5, 1);
        let snake = Snake::new((2, 0), 2, Direction::Right);
        let foods = [Food::new((4, 0), 0)];

        assert_eq!(free_cells(grid, &snake, &foods), vec![(0, 0), (3, 0)]);
    }

    #[test]
    fn spawned_food_never_overlaps() {
        let grid = Grid::new(6, 4);
        let snake = Snake::new((3, 2), 4, Direction::Right);
        let existing = [Food::new((5, 3), 0)];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let foods = spawn(grid, &snake, &existing, 3, &mut rng);
            assert_eq!(foods.len(), 3);

            let cells: HashSet<Coords> = foods.iter().map(|f| f.pos).collect();
            assert_eq!(cells.len(), 3);
            for food in &foods {
                assert!(grid.contains(food.pos));
                assert!(!snake.occupies(food.pos));
                assert_ne!(food.pos, (5, 3));
            }
            let tiers: Vec<usize> = foods.iter().map(|f| f.tier).collect();
            assert_eq!(tiers, vec![0, 1, 2]);
        }
    }

    #[test]
    fn spawn_stops_when_board_is_full() {
        let grid = Grid::new(3, 1);
        let snake = Snake::new((2, 0), 2, Direction::Right);
        let mut rng = StdRng::seed_from_u64(1);

        let foods = spawn(grid, &snake, &[], 3, &mut rng);
        assert_eq!(foods, vec![Food::new((0, 0), 0)]);

        let full = Snake::new((2, 0), 3, Direction::Right);
        assert!(spawn(grid, &full, &[], 3, &mut rng).is_empty());
    }
}
