use iced::{
    widget::{button, column, container, row, text},
    Alignment, Element, Length,
};
use log::debug;

use crate::{
    app::Message, view::View, view_models::snake::snake_view_model::SnakeVariant,
};

use super::snake::snake_mediator::SnakeMessage;

#[derive(Clone, Debug)]
pub enum HomeMessage {
    Default,
    Play(SnakeVariant),
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
                HomeMessage::Play(variant) => {
                    debug!("Selected the {variant} variant");
                    Some(Message::Snake(SnakeMessage::NewGame(variant)))
                }
                HomeMessage::Default => Some(Message::Home(HomeMessage::Default)),
            }
        } else {
            debug!("Received message for Home but was: {:#?}", message);
            None
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let height = 50;
        let width = height * 3;
        let make_button = |variant: SnakeVariant| {
            button(
                text(variant.to_string())
                    .align_x(iced::alignment::Horizontal::Center)
                    .align_y(iced::alignment::Vertical::Center),
            )
            .on_press(Message::Home(HomeMessage::Play(variant)))
            .width(width)
            .height(height)
        };

        let buttons = column![
            text("Snake! Eat the green food, dodge the blue food and the red walls"),
            row![
                make_button(SnakeVariant::Classic),
                make_button(SnakeVariant::AutoStart),
            ]
            .spacing(10),
        ]
        .spacing(20)
        .align_x(Alignment::Center);

        container(buttons)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center)
            .into()
    }
}

impl Default for Home {
    fn default() -> Self {
        Self::new()
    }
}
