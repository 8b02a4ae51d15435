use std::time::{Duration, Instant};

use iced::{
    keyboard::{self, Key},
    time,
    widget::{button, canvas, column, container, row, text},
    Alignment, Element, Length, Subscription,
};

use crate::{
    app::Message,
    view::View,
    view_model::ViewModel,
    view_models::snake::snake_view_model::{SnakeVariant, SnakeViewModel},
};

use super::{board::Board, snake_mediator::SnakeMessage};

#[derive(Clone, Debug)]
pub enum SnakeGameMessage {
    Key(Key),
    Timer(Instant),
    Start,
    Restart,
}

fn game_message(message: SnakeGameMessage) -> Message {
    Message::Snake(SnakeMessage::SnakeGameMessage(message))
}

#[derive(Debug)]
pub struct SnakeGameScreen {
    view_model: SnakeViewModel,
}

impl SnakeGameScreen {
    #[must_use]
    pub fn new(view_model: SnakeViewModel) -> Self {
        Self { view_model }
    }

    #[must_use]
    pub fn get_view_model(&self) -> &SnakeViewModel {
        &self.view_model
    }
}

impl View for SnakeGameScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> Element<'_, Message> {
        let game = self.view_model.get_game();
        let variant = self.view_model.get_variant();
        let canvas_size = game.config().canvas_size();

        let home_button = button(text("Back to Home"))
            .on_press(Message::Snake(SnakeMessage::HomeScreenTransition))
            .width(160)
            .height(40);
        let mut controls = row![home_button].spacing(10);
        if variant == SnakeVariant::Classic {
            let start_button = button(text("Start"))
                .on_press_maybe((!game.is_running()).then(|| game_message(SnakeGameMessage::Start)))
                .width(80)
                .height(40);
            let restart_button = button(text("Restart"))
                .on_press(game_message(SnakeGameMessage::Restart))
                .width(80)
                .height(40);
            controls = controls.push(start_button).push(restart_button);
        }

        let mut content = column![controls, text(format!("Score: {}", game.score())).size(24)]
            .spacing(10)
            .align_x(Alignment::Center);
        if variant == SnakeVariant::AutoStart {
            let countdown = self
                .view_model
                .countdown(Instant::now())
                .map(|c| c.to_string())
                .unwrap_or_default();
            content = content.push(text(countdown));
        }
        let board = canvas(Board::new(game))
            .width(Length::Fixed(canvas_size))
            .height(Length::Fixed(canvas_size));
        content = content.push(board);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keyboard = keyboard::on_key_press(|key, _| {
            Some(Message::Snake(SnakeMessage::SnakeGameMessage(
                SnakeGameMessage::Key(key),
            )))
        });
        if !self.view_model.get_game().is_running() {
            return keyboard;
        }
        let timer = time::every(Duration::from_millis(
            self.view_model.get_time_between_frames(),
        ))
        .map(SnakeGameMessage::Timer)
        .map(SnakeMessage::SnakeGameMessage)
        .map(Message::Snake);
        Subscription::batch(vec![timer, keyboard])
    }
}
