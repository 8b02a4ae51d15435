use iced::{Element, Subscription};
use log::{debug, error};

use crate::{
    view::View,
    view_models::snake::snake_view_model::SnakeVariant,
    views::{
        home::{Home, HomeMessage},
        snake::snake_mediator::{SnakeMediator, SnakeMessage},
    },
};

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

    pub fn new_snake(variant: SnakeVariant) -> Self {
        match SnakeMediator::new(variant) {
            Ok(mediator) => Screen::Snake(mediator),
            Err(e) => {
                error!("Could not start a {variant} game: {e}. Going back home");
                Screen::new_home()
            }
        }
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

    pub fn update(state: &mut State, message: Message) {
        if let Some(next) = state.screen.update(message) {
            match next {
                Message::Home(_) => state.screen = Screen::new_home(),
                Message::Snake(SnakeMessage::NewGame(variant)) => {
                    state.screen = Screen::new_snake(variant);
                }
                Message::Snake(other) => {
                    debug!("Ignoring snake message returned to the app: {:#?}", other);
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
