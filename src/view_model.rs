//! The [`ViewModel`] trait sitting between the screens and the game model.

use crate::app::Message;

/// Owns model state on behalf of a [`crate::view::View`] and mutates it in
/// response to messages.
pub trait ViewModel {
    /// Applies `message`, returning a follow up message for the view if any.
    fn update(&mut self, message: Message) -> Option<Message>;
}
