//! Entity spawn factories for the dive site.
//!
//! Obstacles from the config are spawned as-is; scattered rocks are placed by
//! the seeded RNG, clear of the spawn point and of every photo target.

use hecs::World;
use log::{debug, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bathy_core::components::{Obstacle, ObstacleShape};
use bathy_core::config::DiveConfig;
use bathy_core::constants::*;
use bathy_core::enums::ObstacleKind;
use bathy_core::types::DVec2;

/// Placement attempts per requested rock before giving up.
const SCATTER_ATTEMPTS_PER_ROCK: u32 = 20;

/// Spawn every obstacle of the dive site.
pub fn setup_site(world: &mut World, config: &DiveConfig, rng: &mut ChaCha8Rng) {
    for obstacle in &config.obstacles {
        spawn_obstacle(world, obstacle.clone());
    }

    let placed = scatter_rocks(world, config, rng);
    debug!(
        "dive site ready: {} obstacles, {} scattered rocks",
        config.obstacles.len(),
        placed
    );
}

pub fn spawn_obstacle(world: &mut World, obstacle: Obstacle) -> hecs::Entity {
    world.spawn((obstacle,))
}

/// Place up to `config.scattered_rocks` point rocks. Returns how many fit.
pub fn scatter_rocks(world: &mut World, config: &DiveConfig, rng: &mut ChaCha8Rng) -> u32 {
    let wanted = config.scattered_rocks;
    let spawn = DVec2::ZERO;
    let targets: Vec<DVec2> = config
        .mission
        .targets
        .iter()
        .map(|t| DVec2::new(t.x, t.z))
        .collect();

    let max_attempts = wanted.saturating_mul(SCATTER_ATTEMPTS_PER_ROCK);
    let mut placed = 0;
    let mut attempts = 0;
    while placed < wanted && attempts < max_attempts {
        attempts += 1;

        let x: f64 = rng.gen_range(-SCATTER_EXTENT..SCATTER_EXTENT);
        let z: f64 = rng.gen_range(-SCATTER_EXTENT..SCATTER_EXTENT);
        let size: f64 = rng.gen_range(SCATTER_ROCK_SIZE.0..SCATTER_ROCK_SIZE.1);
        let position = DVec2::new(x, z);

        let clearance = SCATTER_CLEARANCE + size;
        if position.distance(spawn) < clearance
            || targets.iter().any(|t| position.distance(*t) < clearance)
        {
            continue;
        }

        placed += 1;
        spawn_obstacle(
            world,
            Obstacle {
                name: format!("Rock {}", placed),
                kind: ObstacleKind::Rock,
                shape: ObstacleShape::Point { position, size },
            },
        );
    }

    if placed < wanted {
        warn!("only {} of {} scattered rocks fit the site", placed, wanted);
    }
    placed
}
