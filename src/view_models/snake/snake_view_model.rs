use std::time::Duration;

use iced::{
    keyboard::{key::Named, Key},
    time::Instant,
};
use log::{debug, info, warn};

use crate::{
    app::Message,
    models::snake::{
        config::SnakeConfig,
        game_loop::{FrameOutcome, GameLoop},
        input::{GameKey, HeldKeys},
        snake_game::{SnakeError, SnakeGame},
        snake_player::PlayerId,
    },
    view_model::ViewModel,
    views::snake::{snake_game_screen::SnakeGameMessage, snake_mediator::SnakeMessage},
};

/// How often the screen asks the loop whether something is due.
pub const MILLIS_BETWEEN_FRAMES: u64 = 16;

/// Maps a toolkit key onto the keys the game tracks.
#[must_use]
pub fn to_game_key(key: &Key) -> Option<GameKey> {
    match key {
        Key::Named(Named::ArrowUp) => Some(GameKey::ArrowUp),
        Key::Named(Named::ArrowDown) => Some(GameKey::ArrowDown),
        Key::Named(Named::ArrowLeft) => Some(GameKey::ArrowLeft),
        Key::Named(Named::ArrowRight) => Some(GameKey::ArrowRight),
        Key::Character(c) => {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(GameKey::character(ch)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// One play session: the loop, and the keys currently held on the shared
/// keyboard.
#[derive(Debug)]
pub struct SnakeViewModel {
    players: Vec<PlayerId>,
    config: SnakeConfig,
    session: GameLoop,
    held: HeldKeys,
}

impl SnakeViewModel {
    /// Starts a session for `players` with the default rules.
    ///
    /// # Errors
    ///
    /// If the players cannot make up a [`SnakeGame`], returns a [`SnakeError`].
    pub fn new(players: Vec<PlayerId>) -> Result<Self, SnakeError> {
        Self::with_config(players, SnakeConfig::default())
    }

    /// Starts a session for `players` with `config`.
    ///
    /// # Errors
    ///
    /// If the players or config cannot make up a [`SnakeGame`], returns a
    /// [`SnakeError`].
    pub fn with_config(players: Vec<PlayerId>, config: SnakeConfig) -> Result<Self, SnakeError> {
        debug!("New SnakeViewModel for {players:?} with {config:#?}");
        let session = GameLoop::new(&players, &config, Instant::now())?;
        Ok(Self {
            players,
            config,
            session,
            held: HeldKeys::new(),
        })
    }

    #[must_use]
    pub fn get_game(&self) -> &SnakeGame {
        self.session.game()
    }

    #[must_use]
    pub fn get_config(&self) -> &SnakeConfig {
        &self.config
    }

    #[must_use]
    pub fn countdown(&self) -> Option<u8> {
        self.session.countdown()
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.session.is_over()
    }

    #[must_use]
    pub fn get_time_between_frames(&self) -> Duration {
        Duration::from_millis(MILLIS_BETWEEN_FRAMES)
    }

    #[must_use]
    pub fn get_held_keys(&self) -> &HeldKeys {
        &self.held
    }

    fn exit() -> Message {
        Message::Snake(SnakeMessage::SnakeSelectionScreenTransition)
    }

    fn restart(&self) -> Message {
        Message::Snake(SnakeMessage::SnakeGameScreenTransition(
            self.players.clone(),
        ))
    }

    fn on_key_pressed(&mut self, key: &Key) -> Option<Message> {
        match key {
            Key::Named(Named::Escape) => {
                debug!("Exit requested");
                return Some(Self::exit());
            }
            Key::Named(Named::Space) if self.game_over() => {
                debug!("Restart requested");
                return Some(self.restart());
            }
            _ => (),
        }
        if let Some(game_key) = to_game_key(key) {
            self.held.press(game_key);
        }
        None
    }

    fn on_frame(&mut self, now: Instant) {
        match self.session.on_frame(now, &self.held) {
            FrameOutcome::Started => info!("Snake game running for {:?}", self.players),
            FrameOutcome::Finished => {
                info!(
                    "Snake game over: {}",
                    self.get_game().outcome_text().unwrap_or_default()
                );
            }
            FrameOutcome::CountedDown(_) | FrameOutcome::Ticked | FrameOutcome::Idle => (),
        }
    }
}

impl ViewModel for SnakeViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        let Message::Snake(snake_message) = message else {
            warn!("Non-snake message sent to SnakeViewModel: {:#?}", message);
            return None;
        };
        let SnakeMessage::SnakeGameMessage(game_message) = snake_message else {
            warn!(
                "Non-SnakeGameMessage sent to SnakeViewModel: {:#?}",
                snake_message
            );
            return None;
        };
        match game_message {
            SnakeGameMessage::KeyPressed(key) => self.on_key_pressed(&key),
            SnakeGameMessage::KeyReleased(key) => {
                if let Some(game_key) = to_game_key(&key) {
                    self.held.release(game_key);
                }
                None
            }
            SnakeGameMessage::Frame(now) => {
                self.on_frame(now);
                None
            }
            SnakeGameMessage::Exit => Some(Self::exit()),
            SnakeGameMessage::Reset => {
                debug!("Reset requested. Starting a new game");
                Some(self.restart())
            }
        }
    }
}
