//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommandError;

/// Directional helm input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    /// All directions in the order held controls are applied each tick.
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    /// Whether this direction displaces the vessel sideways.
    pub fn is_lateral(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Direction::Forward => "Forward",
            Direction::Backward => "Backward",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(token)
    }
}

impl FromStr for Direction {
    type Err = CommandError;

    /// Parse a control token as wired on the helm panel buttons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Forward" => Ok(Direction::Forward),
            "Backward" => Ok(Direction::Backward),
            "Left" => Ok(Direction::Left),
            "Right" => Ok(Direction::Right),
            other => Err(CommandError::InvalidDirection(other.to_string())),
        }
    }
}

/// How the stop lever brings the vessel to rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopMode {
    /// Speed drops to zero immediately.
    #[default]
    Emergency,
    /// Speed ramps down at the brake deceleration.
    Gradual,
}

/// Why a directional command was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Controls are locked (stop lever engaged).
    Locked,
    /// A brake ramp is in progress.
    Braking,
    /// The move heads into the current contact.
    Blocked,
    /// The lateral destination overlaps a static obstacle.
    Occupied,
}

/// Intensity of the jolt fed back to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeedbackSeverity {
    /// Lateral input swallowed by the brake ramp.
    Bump,
    /// Helm command vetoed by a contact or obstacle.
    Blocked,
    /// The hull struck something and lost its way.
    Impact,
}

/// Mission outcome. `Failed` and `Won` are absorbing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    #[default]
    InProgress,
    Failed,
    Won,
}

impl MissionOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MissionOutcome::InProgress)
    }
}

/// Result of a capture attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureResult {
    Hit(u32),
    Miss,
}

/// Obstacle category, carried for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Wall,
    Rock,
    Wreck,
    Other,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Briefing,
    Active,
    Paused,
    Debrief,
}

/// How a dive ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiveResult {
    /// Every target photographed.
    Won,
    /// Too many wrong photos.
    Failed,
    /// Hull integrity reached zero.
    HullLost,
}
