//! Timing of a session: the countdown, then fixed-interval ticks.
//!
//! The loop owns no timer of its own. Whoever drives it calls
//! [`GameLoop::on_frame`] with the current instant as often as it likes and
//! the loop decides whether the countdown moves on or a tick is due. Dropping
//! the loop is all it takes to stop a session.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use super::{
    config::SnakeConfig,
    input::HeldKeys,
    snake_game::{Result, SnakeGame},
    snake_player::PlayerId,
};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Where a session is. Setup happens inside [`GameLoop::new`], which leaves
/// the loop in `Countdown`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Seconds left to show, and when the current one started.
    Countdown { remaining: u8, since: Instant },
    /// `last_tick` is `None` until the first tick has run.
    Running { last_tick: Option<Instant> },
    Over,
}

/// What a call to [`GameLoop::on_frame`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Idle,
    CountedDown(u8),
    Started,
    Ticked,
    Finished,
}

#[derive(Debug)]
pub struct GameLoop {
    game: SnakeGame,
    phase: Phase,
    tick_interval: Duration,
    rng: StdRng,
}

impl GameLoop {
    /// Sets up a new game for `players` and arms the countdown at `now`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::models::snake::snake_game::SnakeError`] if the game
    /// cannot be created with these players and config.
    pub fn new(players: &[PlayerId], config: &SnakeConfig, now: Instant) -> Result<Self> {
        Self::with_rng(players, config, now, StdRng::from_entropy())
    }

    /// Same as [`GameLoop::new`] with a caller-provided random source.
    ///
    /// # Errors
    ///
    /// See [`GameLoop::new`].
    pub fn with_rng(
        players: &[PlayerId],
        config: &SnakeConfig,
        now: Instant,
        mut rng: StdRng,
    ) -> Result<Self> {
        let game = SnakeGame::new(players, config, &mut rng)?;
        let phase = if config.countdown_start == 0 {
            Phase::Running { last_tick: None }
        } else {
            Phase::Countdown {
                remaining: config.countdown_start,
                since: now,
            }
        };
        Ok(Self {
            game,
            phase,
            tick_interval: config.tick_interval,
            rng,
        })
    }

    /// Advances the session to `now`.
    ///
    /// During the countdown one second is taken off per elapsed second. While
    /// running, a tick happens when strictly more than the tick interval has
    /// passed since the last one, or right away for the very first tick. At
    /// most one tick runs per call no matter how late the frame is.
    ///
    /// Both clocks restart at the frame that fired, not at the exact
    /// deadline, so a late frame pushes the next second or tick back by its
    /// lateness. At 16 ms frames a 150 ms interval ticks every ~160 ms.
    pub fn on_frame(&mut self, now: Instant, held: &HeldKeys) -> FrameOutcome {
        match self.phase {
            Phase::Countdown { remaining, since } => {
                if now.saturating_duration_since(since) < ONE_SECOND {
                    return FrameOutcome::Idle;
                }
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    info!("Countdown finished. Starting game");
                    self.phase = Phase::Running { last_tick: None };
                    FrameOutcome::Started
                } else {
                    debug!("Countdown at {remaining}");
                    self.phase = Phase::Countdown {
                        remaining,
                        since: now,
                    };
                    FrameOutcome::CountedDown(remaining)
                }
            }
            Phase::Running { last_tick } => {
                let due = match last_tick {
                    None => true,
                    Some(last) => now.saturating_duration_since(last) > self.tick_interval,
                };
                if !due {
                    return FrameOutcome::Idle;
                }
                self.game = self.game.step(held, &mut self.rng);
                if self.game.is_over() {
                    info!("Game finished: {:?}", self.game.outcome_text());
                    self.phase = Phase::Over;
                    FrameOutcome::Finished
                } else {
                    self.phase = Phase::Running {
                        last_tick: Some(now),
                    };
                    FrameOutcome::Ticked
                }
            }
            Phase::Over => FrameOutcome::Idle,
        }
    }

    #[must_use]
    pub fn game(&self) -> &SnakeGame {
        &self.game
    }

    /// Number to show while counting down.
    #[must_use]
    pub fn countdown(&self) -> Option<u8> {
        match self.phase {
            Phase::Countdown { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}
