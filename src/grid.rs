use crate::Coords;

/// Playfield bounds. Cells live in `[0, width) x [0, height)`, origin top-left.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 >= 0 && pos.1 >= 0 && pos.0 < self.width && pos.1 < self.height
    }

    pub fn center(&self) -> Coords {
        (self.width / 2, self.height / 2)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let grid = Grid::new(40, 20);
        assert!(grid.contains((0, 0)));
        assert!(grid.contains((39, 19)));
        assert!(!grid.contains((40, 10)));
        assert!(!grid.contains((10, 20)));
        assert!(!grid.contains((-1, 5)));
        assert!(!grid.contains((5, -1)));
    }

    #[test]
    fn cells_covers_the_whole_grid() {
        let grid = Grid::new(4, 3);
        let cells: Vec<Coords> = grid.cells().collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], (0, 0));
        assert_eq!(cells[4], (0, 1));
        assert_eq!(cells[11], (3, 2));
    }
}
