//! Cleanup system: ages sonar blips and removes the faded ones.

use hecs::{Entity, World};

use bathy_core::components::SonarBlip;

/// Decay every blip by `dt` and despawn those that ran out.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, dt: f64) {
    despawn_buffer.clear();

    for (entity, blip) in world.query_mut::<&mut SonarBlip>() {
        blip.remaining_secs -= dt;
        if blip.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Remove every blip, e.g. when the dive restarts.
pub fn clear_blips(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&SonarBlip>().into_iter().map(|(e, _)| e));
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
