//! Module for containing the Snake Game Player.
use std::collections::VecDeque;
use std::fmt;

use log::debug;

use super::grid::{Cell, Direction, Grid};

/// Position of a player in the active-player list of a session.
///
/// Start corner and key bindings are chosen by slot.
pub type Slot = usize;

/// The player number (1 to 4) picked on the selection screen.
///
/// The number decides the color and the name shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const ALL: [PlayerId; 4] = [PlayerId(1), PlayerId(2), PlayerId(3), PlayerId(4)];

    /// Returns `None` unless `number` is between 1 and 4.
    #[must_use]
    pub fn new(number: u8) -> Option<Self> {
        (1..=4).contains(&number).then_some(Self(number))
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PLAYER {}", self.0)
    }
}

/// Why a snake stopped moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    OwnBody,
    OtherSnake(Slot),
}

/// Snake player in the [`crate::models::snake::snake_game::SnakeGame`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakePlayer {
    pub player: PlayerId,
    pub slot: Slot,
    body: VecDeque<Cell>,
    direction: Direction,
    score: u32,
    death: Option<DeathCause>,
}

impl SnakePlayer {
    /// Creates a snake whose head is at `head` with the rest of the body
    /// trailing behind it, opposite to `direction`.
    ///
    /// `length` is clamped to at least one cell.
    #[must_use]
    pub fn new(
        player: PlayerId,
        slot: Slot,
        head: Cell,
        direction: Direction,
        length: usize,
    ) -> Self {
        let behind = direction.get_opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        body.push_back(cell);
        for _ in 1..length {
            cell = cell.neighbor(behind);
            body.push_back(cell);
        }
        Self {
            player,
            slot,
            body,
            direction,
            score: 0,
            death: None,
        }
    }

    /// Creates the snake for `slot` at its starting corner, facing right.
    #[must_use]
    pub fn spawn(player: PlayerId, slot: Slot, grid: &Grid, length: usize) -> Self {
        Self::new(
            player,
            slot,
            Self::starting_head(slot, grid),
            Direction::Right,
            length,
        )
    }

    /// Head position for each slot: the four quarter points of the grid,
    /// then the center for anything past the fourth slot.
    #[must_use]
    pub fn starting_head(slot: Slot, grid: &Grid) -> Cell {
        let w = i32::from(grid.width());
        let h = i32::from(grid.height());
        match slot {
            0 => Cell::new(w / 4, h / 4),
            1 => Cell::new(w * 3 / 4, h / 4),
            2 => Cell::new(w / 4, h * 3 / 4),
            3 => Cell::new(w * 3 / 4, h * 3 / 4),
            _ => Cell::new(w / 2, h / 2),
        }
    }

    /// Check if the snake is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    #[must_use]
    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death
    }

    #[must_use]
    pub fn head(&self) -> Cell {
        // body is never empty
        self.body[0]
    }

    #[must_use]
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Commits the facing for the coming move. Ignored once dead.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.is_alive() {
            self.direction = direction;
        }
    }

    /// Moves the head to `new_head`. Without growth the tail cell is dropped
    /// so the length stays the same.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        if self.is_dead() {
            debug!("Tried to move dead snake {}", self.slot);
            return;
        }
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn add_point(&mut self) {
        if self.is_alive() {
            self.score += 1;
        }
    }

    /// Marks the snake dead. The body and score are frozen from here on and
    /// the first recorded cause is kept.
    pub fn kill(&mut self, cause: DeathCause) {
        if self.is_alive() {
            debug!("Snake {} died: {:?}", self.slot, cause);
            self.death = Some(cause);
        }
    }
}
