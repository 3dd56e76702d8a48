use log::debug;

use crate::{
    app::Message,
    models::snake::{snake_game::MAX_NUM_OF_PLAYERS, snake_player::PlayerId},
    view_model::ViewModel,
    views::snake::{
        snake_mediator::SnakeMessage, snake_selection_screen::SnakeSelectionMessage,
    },
};

/// Players picked for the next game, in the order they were picked.
#[derive(Debug, Default)]
pub struct SnakeSelectionViewModel {
    selected: Vec<PlayerId>,
}

impl SnakeSelectionViewModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an earlier pick, dropping repeats.
    #[must_use]
    pub fn with_selected(players: &[PlayerId]) -> Self {
        let mut view_model = Self::new();
        for player in players {
            if !view_model.is_selected(*player) {
                view_model.toggle(*player);
            }
        }
        view_model
    }

    /// Adds `player` at the end of the pick order, or removes it if present.
    pub fn toggle(&mut self, player: PlayerId) {
        if let Some(i) = self.selected.iter().position(|p| *p == player) {
            self.selected.remove(i);
        } else if self.selected.len() < MAX_NUM_OF_PLAYERS {
            self.selected.push(player);
        }
    }

    #[must_use]
    pub fn is_selected(&self, player: PlayerId) -> bool {
        self.selected.contains(&player)
    }

    #[must_use]
    pub fn validate_number_of_players(&self) -> bool {
        (1..=MAX_NUM_OF_PLAYERS).contains(&self.selected.len())
    }

    #[must_use]
    pub fn get_selected(&self) -> &[PlayerId] {
        &self.selected
    }
}

impl ViewModel for SnakeSelectionViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        let Message::Snake(SnakeMessage::SnakeSelectionMessage(message)) = message else {
            debug!("Received non snake selection message: {:#?}", message);
            return None;
        };
        match message {
            SnakeSelectionMessage::TogglePlayer(player) => {
                self.toggle(player);
                debug!("Selected players: {:?}", self.selected);
                None
            }
            SnakeSelectionMessage::Submit => {
                if self.validate_number_of_players() {
                    debug!("Transitioning to snake game with {:?}", self.selected);
                    Some(Message::Snake(SnakeMessage::SnakeGameScreenTransition(
                        self.selected.clone(),
                    )))
                } else {
                    debug!("Start requested without players");
                    None
                }
            }
        }
    }
}
