//! Helm, camera and hull models for Bathy.
//!
//! Plain state machines over plain data: the vessel motion model, the photo
//! mission tracker and hull integrity. No ECS dependency and no clock of their
//! own; the caller supplies positions, contacts and `dt`, and collects the
//! events they raise.

pub mod hull;
pub mod mission;
pub mod vessel;

pub use bathy_core as core;
pub use hull::HullIntegrity;
pub use mission::MissionTracker;
pub use vessel::{CommandOutcome, ObstacleQuery, OpenWater, VesselMotion};

#[cfg(test)]
mod tests;
