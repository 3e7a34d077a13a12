//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Helm ---
    /// Start holding a helm button. Applied every active tick until released.
    PressControl { direction: Direction },
    /// Release a held helm button.
    ReleaseControl { direction: Direction },
    /// Kill all way immediately.
    EmergencyStop,
    /// Ramp speed down to zero.
    GradualStop,
    /// Throw the stop lever: engaging locks the helm and stops the vessel,
    /// disengaging unlocks it.
    ToggleStopLever,
    /// Lock or unlock the helm directly.
    LockControls { locked: bool },
    /// Point the bow along `(x, z)`.
    SetHeading { x: f64, z: f64 },

    // --- Camera ---
    /// Fire the camera at the vessel's current coordinates.
    TakePhoto,

    // --- Dive control ---
    /// Start the dive from the briefing.
    StartDive,
    /// Put the vessel back at the spawn point with a fresh hull.
    Respawn,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Leave the debrief (or abandon the dive) and return to the briefing.
    ReturnToBriefing,
}
