//! Dive state snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::components::ObstacleShape;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{DVec2, SimTime};

/// Complete dive state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiveSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub result: Option<DiveResult>,
    pub vessel: VesselView,
    pub mission: MissionView,
    pub hull: HullView,
    pub sonar: SonarView,
    pub chart: ChartView,
    pub obstacles: Vec<ObstacleView>,
    /// Events raised during this tick, in emission order.
    pub events: Vec<SimEvent>,
}

/// Helm readout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VesselView {
    pub x: f64,
    pub z: f64,
    /// Signed speed (knots).
    pub speed: f64,
    pub heading: DVec2,
    pub blocked: bool,
    pub braking: bool,
    pub controls_locked: bool,
    pub stop_lever_engaged: bool,
    pub held_controls: Vec<Direction>,
}

/// Photo mission progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionView {
    pub outcome: MissionOutcome,
    pub fail_count: u32,
    pub max_fails: u32,
    pub targets: Vec<TargetView>,
    pub shutter_ready: bool,
}

/// A photo target as shown on the mission board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: u32,
    pub name: String,
    pub x: f64,
    pub z: f64,
    pub radius: f64,
    pub captured: bool,
    /// Bearing from the vessel in degrees (sweep convention).
    pub bearing_deg: f64,
    pub distance: f64,
}

/// Hull integrity gauge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HullView {
    pub health: u32,
    pub max_health: u32,
    pub destroyed: bool,
}

/// Sonar scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SonarView {
    /// Current sweep angle in degrees, `[0, 360)`.
    pub sweep_deg: f64,
    pub range: f64,
    pub blips: Vec<BlipView>,
}

/// A blip, relative to the vessel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlipView {
    /// Offset from the vessel, scaled so the scope edge is length 1.
    pub offset: DVec2,
    /// 1.0 when fresh, falling to 0.0 as it fades.
    pub fade: f64,
}

/// Sea chart with ticked-off cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartView {
    pub width: u32,
    pub height: u32,
    /// `(column, row)` of every marked cell.
    pub marked: Vec<(u32, u32)>,
}

/// A static obstacle, for map rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub name: String,
    pub kind: ObstacleKind,
    pub shape: ObstacleShape,
}
