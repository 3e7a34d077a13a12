//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::FeedbackSeverity;
use crate::types::DVec2;

/// Everything the presentation layer may react to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A helm command was vetoed or the hull struck something.
    BlockedFeedback { severity: FeedbackSeverity },
    /// A new target was photographed.
    TargetCaptured { target_id: u32, coordinates: DVec2 },
    /// The shutter fired away from every open target.
    PhotoMissed { fail_count: u32, max_fails: u32 },
    /// Too many wrong photos.
    MissionFailed { fail_count: u32, max_fails: u32 },
    /// Every target photographed.
    MissionWon,
    /// The hull took a hit.
    HullDamaged { health: u32, max_health: u32 },
    /// Hull integrity reached zero.
    HullDestroyed,
    /// A fresh sonar echo appeared on the scope.
    SonarContact { position: DVec2 },
    /// Proximity cue toward the nearest open target.
    ProximityPing { pitch: f64, distance: f64 },
    /// The helm lock changed.
    ControlsLocked { locked: bool },
}
