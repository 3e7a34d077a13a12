//! Plain data carried by the simulation.
//!
//! Obstacles and sonar blips live as hecs entities; the vessel, mission and
//! hull state are owned directly by their models. Behavior lives in
//! `bathy-helm` and `bathy-sim`, not here.

use serde::{Deserialize, Serialize};

use crate::enums::ObstacleKind;
use crate::types::DVec2;

/// Kinematic state of the vessel on the (x, z) plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselState {
    /// World position; `x` is X, `y` is Z.
    pub position: DVec2,
    /// Signed scalar speed along `heading`. Positive = forward.
    pub speed: f64,
    /// Unit forward axis.
    pub heading: DVec2,
    /// True while at least one obstacle contact is active.
    pub is_blocked: bool,
    /// Most recent contact normal (vessel toward obstacle); zero when unblocked.
    pub blocking_normal: DVec2,
    /// External veto on all directional commands.
    pub controls_locked: bool,
    /// Present only while a gradual stop is in progress.
    pub brake: Option<BrakeRamp>,
}

impl Default for VesselState {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            speed: 0.0,
            heading: DVec2::Y,
            is_blocked: false,
            blocking_normal: DVec2::ZERO,
            controls_locked: false,
            brake: None,
        }
    }
}

/// A bounded-rate speed reduction in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrakeRamp {
    pub target: f64,
}

/// A collision notification delivered to the vessel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Host-chosen identity of the touching obstacle.
    pub key: u64,
    /// Unit normal pointing from the vessel into the obstacle.
    pub normal: DVec2,
    /// `false` means the contact has ended.
    pub ongoing: bool,
}

impl Contact {
    /// Build a contact from an outward surface normal (pointing away from
    /// the obstacle, toward the vessel), as most physics layers report it.
    pub fn from_surface_normal(key: u64, surface_normal: DVec2, ongoing: bool) -> Self {
        Self {
            key,
            normal: -surface_normal,
            ongoing,
        }
    }
}

/// A photo target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionTarget {
    /// Load-order identity; never changes.
    pub id: u32,
    pub name: String,
    pub coordinates: DVec2,
    /// Capture tolerance.
    pub radius: f64,
    /// Flips false to true once, never back.
    pub captured: bool,
}

/// Hull integrity bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullState {
    pub health: u32,
    pub max_health: u32,
    /// Sim time of the last accepted hit.
    pub last_damage_at: Option<f64>,
    pub destroyed: bool,
}

/// Geometry of a static obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum ObstacleShape {
    /// A disc of radius `size`.
    Point { position: DVec2, size: f64 },
    /// A wall segment of total width `thickness`.
    Line {
        start: DVec2,
        end: DVec2,
        thickness: f64,
    },
    /// A box of `dimensions` (width, depth) rotated by `rotation_deg` about `center`.
    Rectangle {
        center: DVec2,
        dimensions: DVec2,
        #[serde(default)]
        rotation_deg: f64,
    },
}

/// Static obstacle entity component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub name: String,
    #[serde(default)]
    pub kind: ObstacleKind,
    #[serde(flatten)]
    pub shape: ObstacleShape,
}

/// A fading sonar return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SonarBlip {
    /// World position of the echo.
    pub position: DVec2,
    /// Seconds until the blip disappears.
    pub remaining_secs: f64,
    /// Full lifetime, for fading.
    pub lifetime_secs: f64,
}

impl SonarBlip {
    /// 1.0 when fresh, falling to 0.0 as the blip expires.
    pub fn fade(&self) -> f64 {
        if self.lifetime_secs > 0.0 {
            (self.remaining_secs / self.lifetime_secs).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
