use iced::{Element, Subscription};
use log::debug;

use crate::{
    app::Message,
    models::snake::snake_game::Result,
    view::View,
    view_models::snake::snake_view_model::{SnakeVariant, SnakeViewModel},
    views::home::HomeMessage,
};

use super::snake_game_screen::{SnakeGameMessage, SnakeGameScreen};

#[derive(Clone, Debug)]
pub enum SnakeMessage {
    NewGame(SnakeVariant),
    HomeScreenTransition,
    SnakeGameMessage(SnakeGameMessage),
}

#[derive(Debug)]
pub struct SnakeMediator {
    snake_screen: SnakeGameScreen,
}

impl SnakeMediator {
    /// # Errors
    ///
    /// Fails if the game behind the screen cannot be created.
    pub fn new(variant: SnakeVariant) -> Result<Self> {
        debug!("Opening snake game screen ({variant})");
        Ok(Self {
            snake_screen: SnakeGameScreen::new(SnakeViewModel::new(variant)?),
        })
    }

    #[must_use]
    pub fn get_screen(&self) -> &SnakeGameScreen {
        &self.snake_screen
    }
}

impl View for SnakeMediator {
    fn update(&mut self, message: Message) -> Option<Message> {
        if let Message::Snake(snake_message) = message {
            match snake_message {
                SnakeMessage::HomeScreenTransition => {
                    debug!("Transitioning to home screen");
                    Some(Message::Home(HomeMessage::Default))
                }
                // the app swaps in a fresh mediator
                SnakeMessage::NewGame(variant) => {
                    Some(Message::Snake(SnakeMessage::NewGame(variant)))
                }
                SnakeMessage::SnakeGameMessage(_) => {
                    self.snake_screen.update(Message::Snake(snake_message))
                }
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
