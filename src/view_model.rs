//! The [`ViewModel`] half of the screens.
//!
//! A view model owns the state behind a screen. It takes the screen's
//! messages and either updates that state or asks for a screen change.

use crate::app::Message;

pub trait ViewModel {
    /// Applies `message`. Returns the message of the screen to switch to, if any.
    fn update(&mut self, message: Message) -> Option<Message>;
}
