//! Snapshot system: assembles a complete DiveSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use bathy_core::components::{Obstacle, SonarBlip};
use bathy_core::enums::*;
use bathy_core::events::SimEvent;
use bathy_core::state::*;
use bathy_core::types::{bearing_deg, DVec2, SimTime};
use bathy_helm::{HullIntegrity, MissionTracker, VesselMotion};

use crate::chart::SeaChart;
use crate::systems::sonar::SonarSweep;

/// Build a complete DiveSnapshot from the current dive state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    result: Option<DiveResult>,
    vessel: &VesselMotion,
    stop_lever_engaged: bool,
    held_controls: &[Direction],
    mission: &MissionTracker,
    shutter_ready: bool,
    hull: &HullIntegrity,
    sweep: &SonarSweep,
    sonar_range: f64,
    chart: &SeaChart,
    events: Vec<SimEvent>,
) -> DiveSnapshot {
    DiveSnapshot {
        time: *time,
        phase,
        result,
        vessel: build_vessel(vessel, stop_lever_engaged, held_controls),
        mission: build_mission(mission, vessel.position(), shutter_ready),
        hull: build_hull(hull),
        sonar: build_sonar(world, vessel.position(), sweep, sonar_range),
        chart: chart.view(),
        obstacles: build_obstacles(world),
        events,
    }
}

fn build_vessel(vessel: &VesselMotion, stop_lever_engaged: bool, held: &[Direction]) -> VesselView {
    let state = vessel.state();
    VesselView {
        x: state.position.x,
        z: state.position.y,
        speed: state.speed,
        heading: state.heading,
        blocked: state.is_blocked,
        braking: vessel.is_braking(),
        controls_locked: state.controls_locked,
        stop_lever_engaged,
        held_controls: held.to_vec(),
    }
}

fn build_mission(mission: &MissionTracker, from: DVec2, shutter_ready: bool) -> MissionView {
    MissionView {
        outcome: mission.outcome(),
        fail_count: mission.fail_count(),
        max_fails: mission.max_fails(),
        targets: mission
            .targets()
            .iter()
            .map(|t| TargetView {
                id: t.id,
                name: t.name.clone(),
                x: t.coordinates.x,
                z: t.coordinates.y,
                radius: t.radius,
                captured: t.captured,
                bearing_deg: bearing_deg(from, t.coordinates),
                distance: from.distance(t.coordinates),
            })
            .collect(),
        shutter_ready,
    }
}

fn build_hull(hull: &HullIntegrity) -> HullView {
    let state = hull.state();
    HullView {
        health: state.health,
        max_health: state.max_health,
        destroyed: state.destroyed,
    }
}

/// Blips relative to the vessel, scaled so the scope edge is 1.
fn build_sonar(world: &World, origin: DVec2, sweep: &SonarSweep, range: f64) -> SonarView {
    let blips = world
        .query::<&SonarBlip>()
        .iter()
        .map(|(_, blip)| BlipView {
            offset: (blip.position - origin) / range,
            fade: blip.fade(),
        })
        .collect();

    SonarView {
        sweep_deg: sweep.angle_deg,
        range,
        blips,
    }
}

fn build_obstacles(world: &World) -> Vec<ObstacleView> {
    world
        .query::<&Obstacle>()
        .iter()
        .map(|(_, o)| ObstacleView {
            name: o.name.clone(),
            kind: o.kind,
            shape: o.shape,
        })
        .collect()
}
