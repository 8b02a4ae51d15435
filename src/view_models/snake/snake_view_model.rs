use std::time::{Duration, Instant};

use iced::keyboard::{key::Named, Key};
use log::{debug, error, info, warn};
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};

use super::hazard_scheduler::{self, ScheduleHandle};
use crate::{
    app::Message,
    models::snake::{
        config::GameConfig,
        hazard::{HazardEvent, HazardKind},
        snake_game::{Result, SnakeAction, SnakeGame, StepOutcome},
    },
    view_model::ViewModel,
    views::snake::{snake_game_screen::SnakeGameMessage, snake_mediator::SnakeMessage},
};

/// The two ways the game can be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeVariant {
    /// Waits for the Start button and can be restarted.
    Classic,
    /// Starts as soon as it is opened, shows a countdown and cannot be restarted.
    AutoStart,
}

impl std::fmt::Display for SnakeVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeVariant::Classic => write!(f, "Classic"),
            SnakeVariant::AutoStart => write!(f, "Auto-start"),
        }
    }
}

/// Time left in the current red wall phase, in whole seconds rounded up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Countdown {
    RedWallIn(u64),
    RedWallFor(u64),
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Countdown::RedWallIn(secs) => write!(f, "Red wall in {secs}s"),
            Countdown::RedWallFor(secs) => write!(f, "Red wall for {secs}s"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct RedWallPhase {
    active: bool,
    ends_at: Instant,
}

/// Owns the game and the hazard schedules feeding it.
#[derive(Debug)]
pub struct SnakeViewModel {
    variant: SnakeVariant,
    game: SnakeGame,
    runtime: Option<Handle>,
    sender: Option<UnboundedSender<HazardEvent>>,
    receiver: Option<UnboundedReceiver<HazardEvent>>,
    blue_food_schedule: Option<ScheduleHandle>,
    red_wall_schedule: Option<ScheduleHandle>,
    red_wall_phase: Option<RedWallPhase>,
}

impl SnakeViewModel {
    /// Creates a view model playing `variant` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::models::snake::snake_game::SnakeError`] if the game
    /// cannot be created.
    pub fn new(variant: SnakeVariant) -> Result<Self> {
        Ok(Self::with_game(variant, SnakeGame::new(GameConfig::default())?))
    }

    /// Wraps an existing game. [`SnakeVariant::AutoStart`] starts it right away.
    #[must_use]
    pub fn with_game(variant: SnakeVariant, game: SnakeGame) -> Self {
        debug!("New SnakeViewModel for the {variant} variant");
        let runtime = match Handle::try_current() {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("No tokio runtime available. Hazards are disabled: {e}");
                None
            }
        };
        let mut view_model = Self {
            variant,
            game,
            runtime,
            sender: None,
            receiver: None,
            blue_food_schedule: None,
            red_wall_schedule: None,
            red_wall_phase: None,
        };
        if variant == SnakeVariant::AutoStart {
            view_model.start();
        }
        view_model
    }

    /// Starts a new game unless one is already running.
    pub fn start(&mut self) {
        if self.game.is_running() {
            debug!("Start requested but the game is already running");
            return;
        }
        self.game.start();
        self.red_wall_phase = None;
        // a fresh channel so nothing from an older game leaks in
        let (sender, receiver) = mpsc::unbounded_channel();
        self.sender = Some(sender);
        self.receiver = Some(receiver);
        self.blue_food_schedule = self.spawn_schedule(HazardKind::BlueFood);
        self.red_wall_schedule = self.spawn_schedule(HazardKind::RedWall);
    }

    /// Ends the current game and starts another one.
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.end_game();
        self.start();
    }

    /// Stops the game and every hazard schedule.
    pub fn end_game(&mut self) {
        self.game.game_over();
        self.stop_schedules();
    }

    /// One frame of the game loop.
    pub fn tick(&mut self) -> StepOutcome {
        if !self.game.is_running() {
            return StepOutcome::default();
        }
        self.drain_hazard_events();
        let outcome = self.game.step();
        if outcome.ate_blue_food {
            // the blue food schedule starts over from a hidden phase
            self.blue_food_schedule = self.spawn_schedule(HazardKind::BlueFood);
        }
        if outcome.game_over {
            self.stop_schedules();
        }
        outcome
    }

    /// Turns the snake if `key` is one of the movement keys.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        let action = match key {
            Key::Named(code) => match code {
                Named::ArrowUp => Some(SnakeAction::Up),
                Named::ArrowDown => Some(SnakeAction::Down),
                Named::ArrowLeft => Some(SnakeAction::Left),
                Named::ArrowRight => Some(SnakeAction::Right),
                _ => None,
            },
            Key::Character(c) => match c.as_str() {
                "w" | "W" => Some(SnakeAction::Up),
                "s" | "S" => Some(SnakeAction::Down),
                "a" | "A" => Some(SnakeAction::Left),
                "d" | "D" => Some(SnakeAction::Right),
                _ => None,
            },
            Key::Unidentified => None,
        };
        match action {
            Some(action) => self.game.change_direction(action),
            None => false,
        }
    }

    fn drain_hazard_events(&mut self) {
        let Some(receiver) = self.receiver.as_mut() else {
            return;
        };
        while let Ok(event) = receiver.try_recv() {
            debug!("Hazard event: {event:?}");
            match event {
                HazardEvent::Pending {
                    kind: HazardKind::RedWall,
                    appears_in,
                    sent_at,
                } => {
                    self.red_wall_phase = Some(RedWallPhase {
                        active: false,
                        ends_at: sent_at + appears_in,
                    });
                }
                HazardEvent::Appear {
                    kind: HazardKind::RedWall,
                    visible_for,
                    sent_at,
                } => {
                    self.red_wall_phase = Some(RedWallPhase {
                        active: true,
                        ends_at: sent_at + visible_for,
                    });
                }
                _ => (),
            }
            self.game.apply(event);
        }
    }

    fn spawn_schedule(&self, kind: HazardKind) -> Option<ScheduleHandle> {
        let (Some(runtime), Some(sender)) = (self.runtime.as_ref(), self.sender.as_ref()) else {
            warn!("Cannot schedule {kind} without a runtime and a channel");
            return None;
        };
        let timings = self.game.config().timings(kind);
        Some(hazard_scheduler::spawn(
            runtime,
            kind,
            timings,
            sender.clone(),
            None,
        ))
    }

    fn stop_schedules(&mut self) {
        for schedule in [
            self.blue_food_schedule.take(),
            self.red_wall_schedule.take(),
        ]
        .into_iter()
        .flatten()
        {
            schedule.cancel();
        }
        self.red_wall_phase = None;
    }

    /// Seconds left before the red wall next rises or drops.
    #[must_use]
    pub fn countdown(&self, now: Instant) -> Option<Countdown> {
        if !self.game.is_running() {
            return None;
        }
        let phase = self.red_wall_phase?;
        let left = phase.ends_at.saturating_duration_since(now);
        let secs = round_up_secs(left);
        Some(if phase.active {
            Countdown::RedWallFor(secs)
        } else {
            Countdown::RedWallIn(secs)
        })
    }

    #[must_use]
    pub fn get_game(&self) -> &SnakeGame {
        &self.game
    }

    #[must_use]
    pub fn get_variant(&self) -> SnakeVariant {
        self.variant
    }

    #[must_use]
    pub fn get_time_between_frames(&self) -> u64 {
        self.game.config().millis_between_frames
    }

    #[must_use]
    pub fn has_active_schedules(&self) -> bool {
        self.blue_food_schedule.is_some() || self.red_wall_schedule.is_some()
    }
}

fn round_up_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

impl ViewModel for SnakeViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        let Message::Snake(snake_message) = message else {
            warn!("Non-snake message sent to SnakeViewModel: {:#?}", message);
            return None;
        };
        let SnakeMessage::SnakeGameMessage(snake_game_message) = snake_message else {
            warn!(
                "Non-SnakeGameMessage sent to SnakeViewModel: {:#?}",
                snake_message
            );
            return None;
        };
        match snake_game_message {
            SnakeGameMessage::Key(key) => {
                self.handle_key(&key);
            }
            SnakeGameMessage::Timer(_) => {
                self.tick();
            }
            SnakeGameMessage::Start => self.start(),
            SnakeGameMessage::Restart => {
                if self.variant == SnakeVariant::Classic {
                    self.restart();
                } else {
                    warn!("Restart is not available in the {} variant", self.variant);
                }
            }
        }
        None
    }
}

impl Drop for SnakeViewModel {
    fn drop(&mut self) {
        self.stop_schedules();
    }
}
