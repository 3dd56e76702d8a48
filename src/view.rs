use iced::{Element, Subscription};

use crate::app::Message;

/// A screen of the application.
pub trait View {
    /// Returns a message when the screen wants to hand over to another one.
    fn update(&mut self, message: Message) -> Option<Message>;

    fn view(&self) -> Element<'_, Message>;

    /// Timers and keyboard listeners the screen needs while it is shown.
    fn subscription(&self) -> Subscription<Message>;
}
