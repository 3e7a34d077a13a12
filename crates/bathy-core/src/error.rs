//! Error types surfaced at the simulation boundary.
//!
//! Gameplay rejections (blocked moves, missed photos) are not errors; they are
//! ordinary return values. These enums cover programmer mistakes, calls made
//! after the mission has ended, and bad configuration.

use std::fmt;

use crate::enums::MissionOutcome;

/// A malformed helm command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The direction token is not one of Forward/Backward/Left/Right.
    InvalidDirection(String),
    /// The time step is zero, negative, or not finite.
    InvalidTimeStep(f64),
    /// A heading vector with no length.
    DegenerateHeading,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidDirection(token) => {
                write!(f, "invalid direction token {:?}", token)
            }
            CommandError::InvalidTimeStep(dt) => write!(f, "invalid time step {}", dt),
            CommandError::DegenerateHeading => write!(f, "heading vector has zero length"),
        }
    }
}

impl std::error::Error for CommandError {}

/// A capture attempt the mission tracker refused to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// The mission already reached the given terminal outcome.
    AlreadyTerminal(MissionOutcome),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::AlreadyTerminal(outcome) => {
                write!(f, "mission already ended ({:?})", outcome)
            }
        }
    }
}

impl std::error::Error for CaptureError {}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse(String),
    /// A numeric field is outside its accepted range.
    OutOfRange { field: &'static str, value: f64 },
    /// The mission lists no photo targets.
    NoTargets,
    /// A target has a non-finite coordinate or a non-positive radius.
    InvalidTarget { index: usize },
    /// An obstacle has a non-finite or non-positive dimension.
    InvalidObstacle { index: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "config parse error: {}", msg),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "{} out of range: {}", field, value)
            }
            ConfigError::NoTargets => write!(f, "mission has no photo targets"),
            ConfigError::InvalidTarget { index } => write!(f, "target #{} is invalid", index),
            ConfigError::InvalidObstacle { index } => {
                write!(f, "obstacle #{} is invalid", index)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
