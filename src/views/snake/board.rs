//! Canvas drawing of the snake board.
use iced::{
    alignment, mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke, Text},
    Color, Pixels, Point, Rectangle, Renderer, Size, Theme,
};

use crate::{
    app::Message,
    models::snake::{
        config::GameConfig,
        hazard::Edge,
        snake_game::{Cell, GameStatus, SnakeGame},
    },
};

const BODY: Color = Color {
    r: 100.0 / 255.0,
    g: 149.0 / 255.0,
    b: 237.0 / 255.0,
    a: 1.0,
};
const HEAD: Color = Color {
    r: 0.0,
    g: 128.0 / 255.0,
    b: 128.0 / 255.0,
    a: 1.0,
};
const FOOD: Color = Color {
    r: 0.0,
    g: 128.0 / 255.0,
    b: 0.0,
    a: 1.0,
};
const BLUE_FOOD: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};
const RED_WALL: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

#[derive(Debug)]
pub struct Board<'a> {
    game: &'a SnakeGame,
}

impl<'a> Board<'a> {
    #[must_use]
    pub fn new(game: &'a SnakeGame) -> Self {
        Self { game }
    }
}

/// Top left corner and size of `cell` in pixels.
#[must_use]
pub fn cell_rect(config: &GameConfig, cell: Cell) -> (Point, Size) {
    (
        Point::new(config.to_pixels(cell.0), config.to_pixels(cell.1)),
        Size::new(config.cell_size, config.cell_size),
    )
}

/// Strip covered by a red wall on `edge`, one cell thick.
#[must_use]
pub fn wall_rect(config: &GameConfig, edge: Edge) -> (Point, Size) {
    let full = config.canvas_size();
    let thick = config.cell_size;
    match edge {
        Edge::Top => (Point::ORIGIN, Size::new(full, thick)),
        Edge::Bottom => (Point::new(0.0, full - thick), Size::new(full, thick)),
        Edge::Left => (Point::ORIGIN, Size::new(thick, full)),
        Edge::Right => (Point::new(full - thick, 0.0), Size::new(thick, full)),
    }
}

fn fill_cell(frame: &mut Frame, config: &GameConfig, cell: Cell, color: Color) {
    let (top_left, size) = cell_rect(config, cell);
    frame.fill_rectangle(top_left, size, color);
}

impl canvas::Program<Message> for Board<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let config = self.game.config();
        let mut frame = Frame::new(renderer, bounds.size());

        // body first so the head stays on top
        for &cell in self.game.snake().iter().skip(1) {
            fill_cell(&mut frame, config, cell, BODY);
        }
        if let Some(head) = self.game.head() {
            fill_cell(&mut frame, config, head, HEAD);
        }
        fill_cell(&mut frame, config, self.game.food(), FOOD);
        if let Some(blue_food) = self.game.blue_food() {
            fill_cell(&mut frame, config, blue_food, BLUE_FOOD);
        }

        let full = config.canvas_size();
        frame.stroke(
            &Path::rectangle(Point::ORIGIN, Size::new(full, full)),
            Stroke::default().with_color(Color::BLACK).with_width(1.0),
        );
        if let Some(edge) = self.game.red_wall() {
            let (top_left, size) = wall_rect(config, edge);
            frame.fill_rectangle(top_left, size, RED_WALL);
        }

        if self.game.status() == GameStatus::GameOver {
            frame.fill_text(Text {
                content: String::from("Game Over!"),
                position: Point::new(full / 2.0, full / 2.0),
                color: Color::BLACK,
                size: Pixels(40.0),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
