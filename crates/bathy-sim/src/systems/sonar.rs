//! Sonar sweep: a rotating beam that leaves fading blips where it hits.

use hecs::World;

use bathy_core::components::{Obstacle, ObstacleShape, SonarBlip};
use bathy_core::config::SonarConfig;
use bathy_core::events::SimEvent;
use bathy_core::types::{bearing_deg, DVec2};

use crate::geometry;

/// Beam angle state, in degrees from +X toward +Z.
#[derive(Debug, Clone, Copy, Default)]
pub struct SonarSweep {
    pub angle_deg: f64,
}

impl SonarSweep {
    pub fn beam_direction(&self) -> DVec2 {
        DVec2::from_angle(self.angle_deg.to_radians())
    }
}

/// Advance the beam and record what it touches this tick.
pub fn run(
    world: &mut World,
    sweep: &mut SonarSweep,
    origin: DVec2,
    config: &SonarConfig,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let arc = BeamArc {
        from_deg: sweep.angle_deg,
        span_deg: config.scan_speed * 360.0 * dt,
    };
    sweep.angle_deg = (arc.from_deg + arc.span_deg).rem_euclid(360.0);
    let dir = sweep.beam_direction();

    let hits: Vec<DVec2> = world
        .query::<&Obstacle>()
        .iter()
        .filter_map(|(_, obstacle)| echo(&obstacle.shape, origin, dir, arc, config))
        .collect();

    for hit in hits {
        record_blip(world, hit, config, events);
    }
}

/// The sector the beam swept through during one tick.
#[derive(Debug, Clone, Copy)]
struct BeamArc {
    from_deg: f64,
    span_deg: f64,
}

impl BeamArc {
    fn contains(&self, bearing: f64) -> bool {
        self.span_deg >= 360.0 || (bearing - self.from_deg).rem_euclid(360.0) <= self.span_deg
    }
}

/// Where the beam touches `shape` this tick, if at all.
///
/// Point obstacles are seen anywhere inside the swept arc or within the beam
/// width of its end direction. Lines and rectangles are ray cast along `dir`.
fn echo(
    shape: &ObstacleShape,
    origin: DVec2,
    dir: DVec2,
    arc: BeamArc,
    config: &SonarConfig,
) -> Option<DVec2> {
    match *shape {
        ObstacleShape::Point { position, .. } => {
            let to = position - origin;
            let dist = to.length();
            if dist <= config.range
                && dist > 0.0
                && (arc.contains(bearing_deg(origin, position))
                    || dir.dot(to / dist) > config.beam_cos)
            {
                Some(position)
            } else {
                None
            }
        }
        _ => geometry::ray_cast(shape, origin, dir, config.range).map(|t| origin + dir * t),
    }
}

/// Refresh a nearby blip or spawn a new one.
fn record_blip(world: &mut World, hit: DVec2, config: &SonarConfig, events: &mut Vec<SimEvent>) {
    for (_, blip) in world.query_mut::<&mut SonarBlip>() {
        if blip.position.distance(hit) <= config.merge_tolerance {
            blip.remaining_secs = config.blip_lifetime_secs;
            return;
        }
    }

    world.spawn((SonarBlip {
        position: hit,
        remaining_secs: config.blip_lifetime_secs,
        lifetime_secs: config.blip_lifetime_secs,
    },));
    events.push(SimEvent::SonarContact { position: hit });
}
