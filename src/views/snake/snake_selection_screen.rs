use iced::{
    alignment,
    keyboard::{self, key::Named, Key},
    widget::{button, column, container, row, text},
    Element, Length, Subscription,
};

use crate::{
    app::Message, models::snake::snake_player::PlayerId, view::View,
    view_model::ViewModel,
    view_models::snake::snake_selection_view_model::SnakeSelectionViewModel,
};

use super::{snake_game_screen::player_color, snake_mediator::SnakeMessage};

#[derive(Debug, Clone)]
pub enum SnakeSelectionMessage {
    TogglePlayer(PlayerId),
    Submit,
}

#[derive(Debug)]
pub struct SnakeSelectionScreen {
    view_model: SnakeSelectionViewModel,
}

impl Default for SnakeSelectionScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SnakeSelectionScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_model: SnakeSelectionViewModel::new(),
        }
    }

    /// Reopens the screen with the players of the last game still picked.
    #[must_use]
    pub fn with_selected(players: &[PlayerId]) -> Self {
        Self {
            view_model: SnakeSelectionViewModel::with_selected(players),
        }
    }
}

impl View for SnakeSelectionScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> Element<'_, Message> {
        let mut players = row![].spacing(10);
        for player in PlayerId::ALL {
            let label = text(format!("P{}", player.number()))
                .size(24)
                .color(player_color(player))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center);
            let toggle = button(label)
                .on_press(Message::Snake(SnakeMessage::SnakeSelectionMessage(
                    SnakeSelectionMessage::TogglePlayer(player),
                )))
                .width(80)
                .height(80)
                .style(if self.view_model.is_selected(player) {
                    button::primary
                } else {
                    button::secondary
                });
            players = players.push(toggle);
        }

        let start_message = self.view_model.validate_number_of_players().then_some(
            Message::Snake(SnakeMessage::SnakeSelectionMessage(
                SnakeSelectionMessage::Submit,
            )),
        );
        let submit_button = button(text("START SNAKE GAME"))
            .on_press_maybe(start_message)
            .width(Length::Shrink);
        let home_button = button(text("Back to Home"))
            .on_press(Message::Snake(SnakeMessage::HomeScreenTransition))
            .width(Length::Shrink);

        let content = column![
            text("CHARACTER SELECT").size(24),
            players,
            submit_button,
            home_button,
        ]
        .spacing(20)
        .align_x(alignment::Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _| match key {
            Key::Named(Named::Escape) => Some(Message::Snake(SnakeMessage::HomeScreenTransition)),
            _ => None,
        })
    }
}
