//! The bounded arena the snakes move on.
//!
//! Coordinates follow screen conventions: `x` grows to the right and `y`
//! grows downwards, so [`Direction::Up`] decreases `y`.

use rand::Rng;

/// A single square of the arena.
///
/// Coordinates are signed so that a projected head one step past the wall
/// can still be represented and rejected by [`Grid::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `direction`.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.value();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Facing of a snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed scan order used when several direction keys are held at once.
    pub const VARIANTS: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Offset `(dx, dy)` of one step in this direction.
    #[must_use]
    pub fn value(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[must_use]
    pub fn get_opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.get_opposite() == other
    }
}

/// Immutable dimensions of the arena in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Leaving the grid is fatal, it never wraps around to the other side.
    pub const WRAPS: bool = false;

    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..i32::from(self.width)).contains(&cell.x)
            && (0..i32::from(self.height)).contains(&cell.y)
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = i32::from(self.width);
        let height = i32::from(self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }

    /// Samples a cell uniformly from the whole grid.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(
            rng.gen_range(0..i32::from(self.width)),
            rng.gen_range(0..i32::from(self.height)),
        )
    }
}
