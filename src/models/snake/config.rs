//! Tunable parameters of a snake session.

use std::time::Duration;

use super::{
    grid::Grid,
    snake_game::{
        Result, SnakeError, COUNTDOWN_START, DEFAULT_GRID_SIZE, INITIAL_SNAKE_LENGTH,
        MAX_BOARD_SIZE, MILLIS_BETWEEN_TICKS, MIN_BOARD_SIZE, WINNING_SCORE,
    },
};

/// Configuration of one session. The defaults reproduce the arcade rules.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    /// Side of one cell in pixels. Only used for drawing.
    pub cell_size: f32,
    pub tick_interval: Duration,
    /// Seconds shown before the first tick.
    pub countdown_start: u8,
    pub win_score: u32,
    pub initial_length: usize,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            cell_size: 15.0,
            tick_interval: Duration::from_millis(MILLIS_BETWEEN_TICKS),
            countdown_start: COUNTDOWN_START,
            win_score: WINNING_SCORE,
            initial_length: INITIAL_SNAKE_LENGTH,
        }
    }
}

impl SnakeConfig {
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    #[must_use]
    pub fn with_grid_size(mut self, width: u16, height: u16) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Checks the values a session cannot run with.
    ///
    /// # Errors
    ///
    /// [`SnakeError::InvalidBoardSize`] if either side is outside
    /// `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`, [`SnakeError::InvalidTickInterval`]
    /// for a zero interval, [`SnakeError::InvalidSnakeLength`] if a starting
    /// body would not fit between its corner and the left wall, and
    /// [`SnakeError::InvalidWinScore`] for a zero winning score.
    pub fn validate(&self) -> Result<()> {
        let sizes = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        if !sizes.contains(&self.grid_width) || !sizes.contains(&self.grid_height) {
            return Err(SnakeError::InvalidBoardSize);
        }
        if self.tick_interval.is_zero() {
            return Err(SnakeError::InvalidTickInterval);
        }
        if !(1..=self.max_initial_length()).contains(&self.initial_length) {
            return Err(SnakeError::InvalidSnakeLength);
        }
        if self.win_score == 0 {
            return Err(SnakeError::InvalidWinScore);
        }
        Ok(())
    }

    /// Longest body that fits behind the leftmost starting heads at `w / 4`.
    #[must_use]
    pub fn max_initial_length(&self) -> usize {
        usize::from(self.grid_width / 4) + 1
    }
}
