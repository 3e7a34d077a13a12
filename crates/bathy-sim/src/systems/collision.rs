//! Hull-versus-obstacle contacts.
//!
//! Each tick the hull circle is tested against every obstacle entity. New
//! contacts damage the hull and are reported to the vessel, persisting ones
//! refresh its blocking normal, and contacts that vanished are reported as
//! ended.

use std::collections::{BTreeMap, BTreeSet};

use hecs::World;

use bathy_core::components::{Contact, Obstacle};
use bathy_core::events::SimEvent;
use bathy_core::types::DVec2;
use bathy_helm::{HullIntegrity, ObstacleQuery, VesselMotion};

use crate::geometry;

/// Obstacle lookup over the world, seen from the vessel's current position.
///
/// Obstacles the hull already overlaps don't count: the blocking normal
/// handles those, and counting them would pin the vessel in place.
pub struct ObstacleField<'w> {
    world: &'w World,
    from: DVec2,
}

impl<'w> ObstacleField<'w> {
    pub fn new(world: &'w World, from: DVec2) -> Self {
        Self { world, from }
    }
}

impl ObstacleQuery for ObstacleField<'_> {
    fn is_occupied(&self, position: DVec2, radius: f64) -> bool {
        self.world.query::<&Obstacle>().iter().any(|(_, obstacle)| {
            geometry::overlaps(&obstacle.shape, position, radius)
                && !geometry::overlaps(&obstacle.shape, self.from, radius)
        })
    }
}

/// Stable contact key for an obstacle entity.
pub fn contact_key(entity: hecs::Entity) -> u64 {
    entity.to_bits().get()
}

/// Detect contacts and deliver Enter/Stay/Exit notifications.
pub fn run(
    world: &World,
    vessel: &mut VesselMotion,
    hull: &mut HullIntegrity,
    touching: &mut BTreeSet<u64>,
    collision_damage: u32,
    now_secs: f64,
    events: &mut Vec<SimEvent>,
) {
    let center = vessel.position();
    let radius = vessel.tuning().hull_radius;
    let heading = vessel.state().heading;

    let current: BTreeMap<u64, DVec2> = world
        .query::<&Obstacle>()
        .iter()
        .filter_map(|(entity, obstacle)| {
            geometry::contact_normal(&obstacle.shape, center, radius, heading)
                .map(|normal| (contact_key(entity), normal))
        })
        .collect();

    let ended: Vec<u64> = touching
        .iter()
        .copied()
        .filter(|key| !current.contains_key(key))
        .collect();
    for key in ended {
        touching.remove(&key);
        vessel.on_collision(
            Contact {
                key,
                normal: DVec2::ZERO,
                ongoing: false,
            },
            events,
        );
    }

    for (&key, &normal) in &current {
        if touching.insert(key) {
            hull.take_damage(collision_damage, now_secs, events);
        }
        vessel.on_collision(
            Contact {
                key,
                normal,
                ongoing: true,
            },
            events,
        );
    }
}
