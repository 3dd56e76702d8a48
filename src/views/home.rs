use iced::{
    keyboard::{self, key::Named, Key},
    widget::{button, column, container, text},
    Alignment, Color, Element, Length, Subscription,
};
use log::debug;

use crate::{app::Message, view::View};

#[derive(Clone, Debug)]
pub enum HomeMessage {
    Default,
    Snake,
}

impl HomeMessage {
    #[must_use]
    pub fn new() -> Self {
        HomeMessage::Default
    }
}

impl Default for HomeMessage {
    fn default() -> Self {
        HomeMessage::new()
    }
}

/// Title screen.
#[derive(Debug)]
pub struct Home {}

impl Home {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl View for Home {
    fn update(&mut self, message: Message) -> Option<Message> {
        if let Message::Home(message) = message {
            match message {
                HomeMessage::Snake => Some(Message::new_snake()),
                HomeMessage::Default => None,
            }
        } else {
            debug!("Received message for Home but was: {:#?}", message);
            None
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let start_button = button(
            text("START GAME")
                .align_x(iced::alignment::Horizontal::Center)
                .align_y(iced::alignment::Vertical::Center),
        )
        .on_press(Message::Home(HomeMessage::Snake))
        .width(200)
        .height(50);

        let content = column![
            text("RETRO REALM").size(48),
            start_button,
            text("ENTER to select").color(Color::from_rgb8(0x9c, 0xa3, 0xaf)),
        ]
        .spacing(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _| match key {
            Key::Named(Named::Enter) => Some(Message::Home(HomeMessage::Snake)),
            _ => None,
        })
    }
}

impl Default for Home {
    fn default() -> Self {
        Self::new()
    }
}
