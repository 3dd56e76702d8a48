use iced::{Element, Subscription};
use log::debug;

use crate::{
    view::View,
    views::{
        home::{Home, HomeMessage},
        snake::snake_mediator::{SnakeMediator, SnakeMessage},
    },
};

// https://docs.rs/iced/latest/i686-unknown-linux-gnu/iced/?search=command#scaling-applications
pub struct State {
    screen: Screen,
}

#[derive(Debug)]
enum Screen {
    Home(Home),
    Snake(SnakeMediator),
}

impl Screen {
    pub fn new_home() -> Self {
        Screen::Home(Home::new())
    }

    pub fn new_snake() -> Self {
        Screen::Snake(SnakeMediator::new())
    }
}

#[derive(Clone, Debug)]
pub enum Message {
    Home(HomeMessage),
    Snake(SnakeMessage),
}

impl Message {
    #[must_use]
    pub fn new_home() -> Self {
        Message::Home(HomeMessage::new())
    }

    #[must_use]
    pub fn new_snake() -> Self {
        Message::Snake(SnakeMessage::new())
    }
}

impl View for Screen {
    fn update(&mut self, message: Message) -> Option<Message> {
        match self {
            Screen::Home(screen) => screen.update(message),
            Screen::Snake(screen) => screen.update(message),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        match self {
            Screen::Home(screen) => screen.view(),
            Screen::Snake(screen) => screen.view(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        match self {
            Screen::Home(screen) => screen.subscription(),
            Screen::Snake(screen) => screen.subscription(),
        }
    }
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::new_home(),
        }
    }

    /// Routes `message` to the current screen and swaps screens when it asks to.
    pub fn update(state: &mut State, message: Message) {
        if let Some(next) = state.screen.update(message) {
            match next {
                Message::Home(_) => {
                    debug!("Switching to home screen");
                    state.screen = Screen::new_home();
                }
                Message::Snake(_) => {
                    debug!("Switching to snake screens");
                    state.screen = Screen::new_snake();
                }
            }
        }
    }

    #[must_use]
    pub fn view(state: &State) -> Element<'_, Message> {
        state.screen.view()
    }

    #[must_use]
    pub fn subscription(state: &State) -> Subscription<Message> {
        state.screen.subscription()
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        matches!(self.screen, Screen::Home(_))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
