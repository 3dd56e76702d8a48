use iced::{Element, Subscription};
use log::{debug, error};

use crate::{
    app::Message, models::snake::snake_player::PlayerId, view::View,
    view_models::snake::snake_view_model::SnakeViewModel,
};

use super::{
    snake_game_screen::{SnakeGameMessage, SnakeGameScreen},
    snake_selection_screen::{SnakeSelectionMessage, SnakeSelectionScreen},
};

#[derive(Clone, Debug)]
pub enum SnakeMessage {
    Default,
    SnakeGameScreenTransition(Vec<PlayerId>),
    SnakeSelectionScreenTransition,
    HomeScreenTransition,
    SnakeGameMessage(SnakeGameMessage),
    SnakeSelectionMessage(SnakeSelectionMessage),
}

impl SnakeMessage {
    #[must_use]
    pub fn new() -> Self {
        SnakeMessage::Default
    }
}

impl Default for SnakeMessage {
    fn default() -> Self {
        SnakeMessage::new()
    }
}

#[derive(Debug)]
pub enum SnakeScreen {
    SnakeGameScreen(SnakeGameScreen),
    SnakeSelectionScreen(SnakeSelectionScreen),
}

impl View for SnakeScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        match self {
            SnakeScreen::SnakeGameScreen(snake_game_screen) => snake_game_screen.update(message),
            SnakeScreen::SnakeSelectionScreen(snake_selection_screen) => {
                snake_selection_screen.update(message)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        match self {
            SnakeScreen::SnakeGameScreen(snake_game_screen) => snake_game_screen.view(),
            SnakeScreen::SnakeSelectionScreen(snake_selection_screen) => {
                snake_selection_screen.view()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        match self {
            SnakeScreen::SnakeGameScreen(snake_game_screen) => snake_game_screen.subscription(),
            SnakeScreen::SnakeSelectionScreen(snake_selection_screen) => {
                snake_selection_screen.subscription()
            }
        }
    }
}

/// Switches between player selection and the game itself.
///
/// Leaving a game drops its [`SnakeGameScreen`], and with it the session and
/// its frame subscription.
#[derive(Debug)]
pub struct SnakeMediator {
    snake_screen: SnakeScreen,
    last_players: Vec<PlayerId>,
}

impl Default for SnakeMediator {
    fn default() -> Self {
        Self::new()
    }
}

impl SnakeMediator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            snake_screen: SnakeScreen::SnakeSelectionScreen(SnakeSelectionScreen::new()),
            last_players: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self.snake_screen, SnakeScreen::SnakeGameScreen(_))
    }
}

impl View for SnakeMediator {
    fn update(&mut self, message: Message) -> Option<Message> {
        if let Message::Snake(snake_message) = message {
            match snake_message {
                SnakeMessage::Default => None,
                SnakeMessage::SnakeGameScreenTransition(players) => {
                    debug!("Transitioning to snake game screen");
                    match SnakeViewModel::new(players.clone()) {
                        Ok(view_model) => {
                            self.last_players = players;
                            self.snake_screen =
                                SnakeScreen::SnakeGameScreen(SnakeGameScreen::new(view_model));
                        }
                        Err(e) => error!("Could not start snake game for {players:?}: {e}"),
                    }
                    None
                }
                SnakeMessage::SnakeSelectionScreenTransition => {
                    debug!("Transitioning to snake selection screen");
                    self.snake_screen = SnakeScreen::SnakeSelectionScreen(
                        SnakeSelectionScreen::with_selected(&self.last_players),
                    );
                    None
                }
                SnakeMessage::HomeScreenTransition => {
                    debug!("Transitioning to home screen");
                    Some(Message::new_home())
                }
                _ => match self.snake_screen.update(Message::Snake(snake_message)) {
                    // screens only hand back transitions, so this recurses at most once
                    Some(m) => self.update(m),
                    None => None,
                },
            }
        } else {
            debug!(
                "Received a non-snake message in the snake mediator. Message: {:#?}",
                message
            );
            None
        }
    }

    fn view(&self) -> Element<'_, Message> {
        self.snake_screen.view()
    }

    fn subscription(&self) -> Subscription<Message> {
        self.snake_screen.subscription()
    }
}
