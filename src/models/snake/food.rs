//! Placement of the single food item.

use log::warn;
use rand::{seq::SliceRandom, Rng};

use super::{
    grid::{Cell, Grid},
    snake_player::SnakePlayer,
};

/// Random draws attempted before falling back to scanning every free cell.
pub const MAX_SAMPLE_ATTEMPTS: usize = 256;

/// The food item currently on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
}

impl Food {
    #[must_use]
    pub const fn new(cell: Cell) -> Self {
        Self { cell }
    }
}

fn is_occupied(cell: Cell, snakes: &[SnakePlayer]) -> bool {
    snakes
        .iter()
        .filter(|s| s.is_alive())
        .any(|s| s.occupies(cell))
}

/// Picks a cell not covered by any live snake.
///
/// Cells are sampled uniformly and rejected while occupied. After
/// [`MAX_SAMPLE_ATTEMPTS`] misses the free cells are enumerated and one is
/// chosen from those, so the search always terminates. Returns `None` only
/// when every cell is occupied.
pub fn spawn_food<R: Rng + ?Sized>(
    grid: &Grid,
    snakes: &[SnakePlayer],
    rng: &mut R,
) -> Option<Food> {
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let cell = grid.random_cell(rng);
        if !is_occupied(cell, snakes) {
            return Some(Food::new(cell));
        }
    }

    warn!("Food sampling missed {MAX_SAMPLE_ATTEMPTS} times. Scanning for free cells");
    let available: Vec<Cell> = grid.cells().filter(|c| !is_occupied(*c, snakes)).collect();
    if let Some(cell) = available.choose(rng) {
        Some(Food::new(*cell))
    } else {
        warn!("No where left to place food");
        None
    }
}
