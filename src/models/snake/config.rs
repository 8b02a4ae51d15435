//! Tunables for a game of snake.
use super::{
    hazard::{HazardKind, HazardTimings},
    snake_game::{Cell, Result, SnakeError},
};

/// Amount of time between two ticks of the game loop.
pub const MILLIS_BETWEEN_FRAMES: u64 = 200;
/// Number of cells along each side of the board.
pub const GRID_SIZE: i32 = 20;
/// Side of one cell in pixels.
pub const CELL_SIZE: f32 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub grid_size: i32,
    pub cell_size: f32,
    pub millis_between_frames: u64,
    pub start: Cell,
    pub initial_food: Cell,
    pub blue_food: HazardTimings,
    pub red_wall: HazardTimings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            cell_size: CELL_SIZE,
            millis_between_frames: MILLIS_BETWEEN_FRAMES,
            start: (GRID_SIZE / 2, GRID_SIZE / 2),
            initial_food: (15, 15),
            blue_food: HazardTimings::BLUE_FOOD,
            red_wall: HazardTimings::RED_WALL,
        }
    }
}

impl GameConfig {
    /// Side of the drawing surface in pixels.
    #[must_use]
    pub fn canvas_size(&self) -> f32 {
        self.to_pixels(self.grid_size)
    }

    /// Pixel offset of the cell coordinate `v`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_pixels(&self, v: i32) -> f32 {
        v as f32 * self.cell_size
    }

    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.grid_size).contains(&cell.0) && (0..self.grid_size).contains(&cell.1)
    }

    #[must_use]
    pub fn timings(&self, kind: HazardKind) -> HazardTimings {
        match kind {
            HazardKind::BlueFood => self.blue_food,
            HazardKind::RedWall => self.red_wall,
        }
    }

    /// Checks that a game can be played with these values.
    ///
    /// # Errors
    ///
    /// Returns the first [`SnakeError`] found.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(SnakeError::InvalidGridSize(self.grid_size));
        }
        if !self.in_bounds(self.start) {
            return Err(SnakeError::StartOutOfBounds(self.start));
        }
        if !self.in_bounds(self.initial_food) {
            return Err(SnakeError::FoodOutOfBounds(self.initial_food));
        }
        if self.millis_between_frames == 0 {
            return Err(SnakeError::InvalidFrameInterval);
        }
        for kind in [HazardKind::BlueFood, HazardKind::RedWall] {
            if !self.timings(kind).is_valid() {
                return Err(SnakeError::InvalidHazardTiming(kind));
            }
        }
        Ok(())
    }
}
