//! Simulation engine for Bathy.
//!
//! Owns the hecs world of obstacles and sonar blips, drives the helm models
//! from `bathy-helm` at a fixed tick rate, and produces `DiveSnapshot`s for
//! the host.

pub mod chart;
pub mod engine;
pub mod geometry;
pub mod observer;
pub mod systems;
pub mod world_setup;

pub use bathy_core as core;
pub use engine::DiveEngine;
pub use observer::DiveObserver;
