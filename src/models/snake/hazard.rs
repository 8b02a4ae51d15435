//! Hazards that come and go while the snake is moving.
use std::time::{Duration, Instant};

use rand::Rng;

use super::snake_game::Cell;

/// One of the four edges of the board. An active red wall sits on one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const VARIANTS: [Edge; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Picks one of the four edges uniformly.
    pub fn random<R: Rng>(rng: &mut R) -> Edge {
        Self::VARIANTS[rng.gen_range(0..Self::VARIANTS.len())]
    }

    /// Whether `cell` lies on this edge of a `grid_size` x `grid_size` board.
    #[must_use]
    pub fn contains(self, cell: Cell, grid_size: i32) -> bool {
        let last = grid_size - 1;
        match self {
            Edge::Top => cell.1 == 0,
            Edge::Bottom => cell.1 == last,
            Edge::Left => cell.0 == 0,
            Edge::Right => cell.0 == last,
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edge::Top => write!(f, "top"),
            Edge::Bottom => write!(f, "bottom"),
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HazardKind {
    BlueFood,
    RedWall,
}

impl std::fmt::Display for HazardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HazardKind::BlueFood => write!(f, "blue food"),
            HazardKind::RedWall => write!(f, "red wall"),
        }
    }
}

/// Sent by a hazard schedule whenever its hazard should toggle, plus a
/// heads-up when the next appearance is planned.
///
/// `sent_at` is when the schedule entered the phase, so durations can be
/// counted from there rather than from when the event is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardEvent {
    Pending {
        kind: HazardKind,
        appears_in: Duration,
        sent_at: Instant,
    },
    Appear {
        kind: HazardKind,
        visible_for: Duration,
        sent_at: Instant,
    },
    Disappear {
        kind: HazardKind,
    },
}

/// How long a hazard stays hidden (a whole number of seconds drawn from an
/// inclusive range) and how long it stays up once shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HazardTimings {
    pub min_wait_secs: u64,
    pub max_wait_secs: u64,
    pub visible_secs: u64,
}

impl HazardTimings {
    /// Blue food: hidden for 13 to 18 seconds, then shown for 10.
    pub const BLUE_FOOD: HazardTimings = HazardTimings {
        min_wait_secs: 13,
        max_wait_secs: 18,
        visible_secs: 10,
    };
    /// Red wall: down for 1 to 13 seconds, then up for 10.
    pub const RED_WALL: HazardTimings = HazardTimings {
        min_wait_secs: 1,
        max_wait_secs: 13,
        visible_secs: 10,
    };

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_wait_secs <= self.max_wait_secs
    }

    /// Draws the next hidden period.
    pub fn next_wait<R: Rng>(&self, rng: &mut R) -> Duration {
        if !self.is_valid() {
            return Duration::from_secs(self.max_wait_secs);
        }
        Duration::from_secs(rng.gen_range(self.min_wait_secs..=self.max_wait_secs))
    }

    #[must_use]
    pub fn visible_for(&self) -> Duration {
        Duration::from_secs(self.visible_secs)
    }
}
