use std::collections::VecDeque;

use log::{debug, error, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{
    config::GameConfig,
    hazard::{Edge, HazardEvent, HazardKind},
};

/// Grid coordinate `(x, y)`. `(0, 0)` is the top left cell.
pub type Cell = (i32, i32);

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SnakeError {
    InvalidGridSize(i32),
    StartOutOfBounds(Cell),
    FoodOutOfBounds(Cell),
    InvalidFrameInterval,
    InvalidHazardTiming(HazardKind),
}

impl std::fmt::Display for SnakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeError::InvalidGridSize(size) => write!(f, "invalid grid size {size}"),
            SnakeError::StartOutOfBounds(cell) => {
                write!(f, "starting cell {cell:?} is outside the grid")
            }
            SnakeError::FoodOutOfBounds(cell) => {
                write!(f, "initial food {cell:?} is outside the grid")
            }
            SnakeError::InvalidFrameInterval => write!(f, "time between frames must be positive"),
            SnakeError::InvalidHazardTiming(kind) => {
                write!(f, "{kind} has a minimum wait above its maximum wait")
            }
        }
    }
}

impl std::error::Error for SnakeError {}

/// Direction the player can ask the snake to move in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeAction {
    Up,
    Down,
    Left,
    Right,
}

impl SnakeAction {
    pub const VARIANTS: &'static [SnakeAction] = &[Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector `(dx, dy)` of the action. `y` grows downwards.
    #[must_use]
    pub fn value(&self) -> (i32, i32) {
        match self {
            SnakeAction::Up => (0, -1),
            SnakeAction::Down => (0, 1),
            SnakeAction::Left => (-1, 0),
            SnakeAction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ready,
    Running,
    GameOver,
}

/// What happened during a single [`SnakeGame::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub ate_food: bool,
    pub ate_blue_food: bool,
    pub bounced: bool,
    pub game_over: bool,
}

/// Model of the snake game.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    config: GameConfig,
    snake: VecDeque<Cell>,
    direction: (i32, i32),
    food: Cell,
    blue_food: Option<Cell>,
    red_wall: Option<Edge>,
    score: u32,
    status: GameStatus,
    rng: StdRng,
}

impl SnakeGame {
    /// Creates a game that has not started yet.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if `config` does not validate.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as [`SnakeGame::new`] but every random choice follows `seed`.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if `config` does not validate.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let mut snake = VecDeque::new();
        snake.push_front(config.start);
        Ok(Self {
            food: config.initial_food,
            config,
            snake,
            direction: (0, 0),
            blue_food: None,
            red_wall: None,
            score: 0,
            status: GameStatus::Ready,
            rng,
        })
    }

    /// Puts the game back in its initial state.
    pub fn reset(&mut self) {
        self.snake.clear();
        self.snake.push_front(self.config.start);
        self.direction = (0, 0);
        self.food = self.config.initial_food;
        self.blue_food = None;
        self.red_wall = None;
        self.score = 0;
        self.status = GameStatus::Ready;
    }

    pub fn start(&mut self) {
        self.reset();
        self.status = GameStatus::Running;
        info!("Game started");
    }

    pub fn game_over(&mut self) {
        if self.status == GameStatus::GameOver {
            return;
        }
        self.status = GameStatus::GameOver;
        info!("Game over. Final score {}", self.score);
    }

    /// Turns the snake. A horizontal action is only taken while the snake has
    /// no horizontal speed, and likewise for vertical actions.
    ///
    /// Returns true if the direction changed.
    pub fn change_direction(&mut self, action: SnakeAction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        let allowed = match action {
            SnakeAction::Left | SnakeAction::Right => self.direction.0 == 0,
            SnakeAction::Up | SnakeAction::Down => self.direction.1 == 0,
        };
        if allowed {
            self.direction = action.value();
        }
        allowed
    }

    /// Advances the snake by one cell and resolves everything it ran into.
    pub fn step(&mut self) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.status != GameStatus::Running {
            return outcome;
        }
        let Some(&(x, y)) = self.snake.front() else {
            error!("Snake has no head. Ending game");
            self.game_over();
            outcome.game_over = true;
            return outcome;
        };
        let head = (x + self.direction.0, y + self.direction.1);
        self.snake.push_front(head);

        if head == self.food {
            self.score += 1;
            self.food = self.random_cell();
            outcome.ate_food = true;
            debug!("Ate food. Score {}, food moved to {:?}", self.score, self.food);
        } else if self.blue_food == Some(head) {
            self.score = self.score.saturating_sub(1);
            self.snake.pop_back();
            if self.snake.len() > 1 {
                self.snake.pop_back();
            }
            self.blue_food = None;
            outcome.ate_blue_food = true;
            debug!("Ate blue food. Score {}, length {}", self.score, self.snake.len());
        } else {
            self.snake.pop_back();
        }

        if !self.config.in_bounds(head) {
            let last = self.config.grid_size - 1;
            let clamped = (head.0.clamp(0, last), head.1.clamp(0, last));
            if let Some(front) = self.snake.front_mut() {
                *front = clamped;
            }
            self.direction = (-self.direction.0, -self.direction.1);
            outcome.bounced = true;
        }

        let head = self.snake.front().copied();
        if let (Some(edge), Some(head)) = (self.red_wall, head) {
            if edge.contains(head, self.config.grid_size) {
                debug!("Snake hit the {edge} red wall at {head:?}");
                self.game_over();
                outcome.game_over = true;
            }
        }
        outcome
    }

    /// Toggles a hazard. Ignored unless the game is running.
    pub fn apply(&mut self, event: HazardEvent) {
        if self.status != GameStatus::Running {
            debug!("Dropping {event:?} since the game is not running");
            return;
        }
        match event {
            HazardEvent::Pending { .. } => (),
            HazardEvent::Appear {
                kind: HazardKind::BlueFood,
                ..
            } => self.show_blue_food(),
            HazardEvent::Appear {
                kind: HazardKind::RedWall,
                ..
            } => {
                self.raise_red_wall();
            }
            HazardEvent::Disappear {
                kind: HazardKind::BlueFood,
            } => self.hide_blue_food(),
            HazardEvent::Disappear {
                kind: HazardKind::RedWall,
            } => self.lower_red_wall(),
        }
    }

    pub fn show_blue_food(&mut self) {
        let cell = self.random_cell();
        debug!("Blue food at {cell:?}");
        self.blue_food = Some(cell);
    }

    #[cfg(test)]
    pub(crate) fn place_blue_food(&mut self, cell: Cell) {
        self.blue_food = Some(cell);
    }

    pub fn hide_blue_food(&mut self) {
        self.blue_food = None;
    }

    /// Activates a random edge and returns it.
    pub fn raise_red_wall(&mut self) -> Edge {
        let edge = Edge::random(&mut self.rng);
        debug!("Red wall raised on the {edge} edge");
        self.red_wall = Some(edge);
        edge
    }

    pub fn lower_red_wall(&mut self) {
        self.red_wall = None;
    }

    fn random_cell(&mut self) -> Cell {
        let size = self.config.grid_size;
        (self.rng.gen_range(0..size), self.rng.gen_range(0..size))
    }

    #[must_use]
    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> (i32, i32) {
        self.direction
    }

    #[must_use]
    pub fn food(&self) -> Cell {
        self.food
    }

    #[must_use]
    pub fn blue_food(&self) -> Option<Cell> {
        self.blue_food
    }

    #[must_use]
    pub fn red_wall(&self) -> Option<Edge> {
        self.red_wall
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn running_game() -> SnakeGame {
        let mut game = SnakeGame::with_seed(GameConfig::default(), 42).unwrap();
        game.start();
        game
    }

    fn place(game: &mut SnakeGame, cells: &[Cell], direction: (i32, i32)) {
        game.snake = cells.iter().copied().collect();
        game.direction = direction;
        // keep the food out of the way
        game.food = (0, 19);
    }

    #[test]
    fn test_initial_state() {
        let game = SnakeGame::new(GameConfig::default()).unwrap();
        assert_eq!(game.status(), GameStatus::Ready);
        assert_eq!(game.head(), Some((10, 10)));
        assert_eq!(game.len(), 1);
        assert_eq!(game.direction(), (0, 0));
        assert_eq!(game.food(), (15, 15));
        assert_eq!(game.score(), 0);
        assert!(game.blue_food().is_none());
        assert!(game.red_wall().is_none());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            grid_size: -3,
            ..GameConfig::default()
        };
        assert!(SnakeGame::new(config).is_err());
    }

    #[test]
    fn test_step_does_nothing_before_start() {
        let mut game = SnakeGame::with_seed(GameConfig::default(), 1).unwrap();
        game.direction = (1, 0);
        assert_eq!(game.step(), StepOutcome::default());
        assert_eq!(game.head(), Some((10, 10)));
    }

    #[test]
    fn test_snake_rests_until_turned() {
        let mut game = running_game();
        game.step();
        assert_eq!(game.head(), Some((10, 10)));
        assert!(game.change_direction(SnakeAction::Right));
        game.step();
        assert_eq!(game.head(), Some((11, 10)));
        assert_eq!(game.len(), 1);
    }

    #[test]
    fn test_change_direction_blocks_busy_axis() {
        let mut game = running_game();
        assert!(game.change_direction(SnakeAction::Right));
        assert!(!game.change_direction(SnakeAction::Left));
        assert!(!game.change_direction(SnakeAction::Right));
        assert!(game.change_direction(SnakeAction::Up));
        assert_eq!(game.direction(), (0, -1));
        assert!(!game.change_direction(SnakeAction::Down));
        assert!(game.change_direction(SnakeAction::Left));
        assert_eq!(game.direction(), (-1, 0));
    }

    #[test]
    fn test_change_direction_ignored_when_not_running() {
        let mut game = SnakeGame::with_seed(GameConfig::default(), 1).unwrap();
        assert!(!game.change_direction(SnakeAction::Up));
        assert_eq!(game.direction(), (0, 0));
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let mut game = running_game();
        place(&mut game, &[(5, 5), (4, 5)], (1, 0));
        game.food = (6, 5);
        let outcome = game.step();
        assert!(outcome.ate_food);
        assert_eq!(game.score(), 1);
        assert_eq!(game.len(), 3);
        assert_eq!(game.head(), Some((6, 5)));
        assert!(game.config().in_bounds(game.food()));
    }

    #[test]
    fn test_blue_food_shrinks_and_costs_a_point() {
        let mut game = running_game();
        place(&mut game, &[(5, 5), (4, 5), (3, 5)], (1, 0));
        game.score = 2;
        game.blue_food = Some((6, 5));
        let outcome = game.step();
        assert!(outcome.ate_blue_food);
        assert_eq!(game.score(), 1);
        assert_eq!(game.len(), 2);
        assert!(game.blue_food().is_none());
        assert_eq!(
            game.snake().iter().copied().collect::<Vec<_>>(),
            vec![(6, 5), (5, 5)]
        );
    }

    #[test]
    fn test_blue_food_floors_score_and_length() {
        let mut game = running_game();
        place(&mut game, &[(5, 5)], (1, 0));
        game.blue_food = Some((6, 5));
        let outcome = game.step();
        assert!(outcome.ate_blue_food);
        assert_eq!(game.score(), 0);
        assert_eq!(game.len(), 1);
        assert_eq!(game.head(), Some((6, 5)));
    }

    #[test]
    fn test_edge_bounces_back() {
        let mut game = running_game();
        place(&mut game, &[(19, 10)], (1, 0));
        let outcome = game.step();
        assert!(outcome.bounced);
        assert!(!outcome.game_over);
        assert_eq!(game.head(), Some((19, 10)));
        assert_eq!(game.direction(), (-1, 0));
        game.step();
        assert_eq!(game.head(), Some((18, 10)));

        place(&mut game, &[(4, 0)], (0, -1));
        game.step();
        assert_eq!(game.head(), Some((4, 0)));
        assert_eq!(game.direction(), (0, 1));
    }

    #[test]
    fn test_active_red_wall_ends_game() {
        let mut game = running_game();
        place(&mut game, &[(19, 10)], (1, 0));
        game.red_wall = Some(Edge::Right);
        let outcome = game.step();
        assert!(outcome.game_over);
        assert_eq!(game.status(), GameStatus::GameOver);
        // nothing moves anymore
        assert_eq!(game.step(), StepOutcome::default());
    }

    #[test]
    fn test_inactive_or_other_red_wall_is_harmless() {
        let mut game = running_game();
        place(&mut game, &[(19, 10)], (1, 0));
        assert!(!game.step().game_over);

        place(&mut game, &[(19, 10)], (1, 0));
        game.red_wall = Some(Edge::Left);
        assert!(!game.step().game_over);
        assert!(game.is_running());
    }

    #[test]
    fn test_red_wall_reached_along_the_edge() {
        let mut game = running_game();
        place(&mut game, &[(5, 1)], (0, -1));
        game.red_wall = Some(Edge::Top);
        assert!(game.step().game_over);
    }

    #[test]
    fn test_apply_toggles_hazards() {
        let mut game = running_game();
        game.apply(HazardEvent::Appear {
            kind: HazardKind::BlueFood,
            visible_for: Duration::from_secs(10),
            sent_at: Instant::now(),
        });
        let blue = game.blue_food().unwrap();
        assert!(game.config().in_bounds(blue));
        game.apply(HazardEvent::Disappear {
            kind: HazardKind::BlueFood,
        });
        assert!(game.blue_food().is_none());

        game.apply(HazardEvent::Appear {
            kind: HazardKind::RedWall,
            visible_for: Duration::from_secs(10),
            sent_at: Instant::now(),
        });
        assert!(game.red_wall().is_some());
        game.apply(HazardEvent::Disappear {
            kind: HazardKind::RedWall,
        });
        assert!(game.red_wall().is_none());
    }

    #[test]
    fn test_apply_ignored_after_game_over() {
        let mut game = running_game();
        game.game_over();
        game.apply(HazardEvent::Appear {
            kind: HazardKind::RedWall,
            visible_for: Duration::from_secs(10),
            sent_at: Instant::now(),
        });
        assert!(game.red_wall().is_none());
    }

    #[test]
    fn test_start_resets_everything() {
        let mut game = running_game();
        place(&mut game, &[(1, 1), (1, 2)], (0, -1));
        game.score = 9;
        game.raise_red_wall();
        game.show_blue_food();
        game.game_over();
        game.start();
        assert!(game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.head(), Some((10, 10)));
        assert_eq!(game.len(), 1);
        assert_eq!(game.direction(), (0, 0));
        assert!(game.red_wall().is_none());
        assert!(game.blue_food().is_none());
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let mut game = SnakeGame::with_seed(GameConfig::default(), 99).unwrap();
        game.start();
        let mut rng = StdRng::seed_from_u64(5);
        for i in 0..2_000 {
            if i % 3 == 0 {
                let action = SnakeAction::VARIANTS[rng.gen_range(0..SnakeAction::VARIANTS.len())];
                game.change_direction(action);
            }
            if i % 50 == 0 {
                game.show_blue_food();
            }
            let before = game.len();
            let outcome = game.step();
            if outcome.ate_food {
                assert!(game.len() > before);
            }
            if outcome.ate_blue_food {
                assert!(game.len() <= before);
            }
            assert!(game.len() >= 1);
            assert!(game.config().in_bounds(game.head().unwrap()));
        }
        assert!(game.is_running());
    }
}
