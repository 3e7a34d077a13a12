//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

pub use glam::DVec2;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Starboard axis for a forward heading on the (x, z) plane.
///
/// With the default heading `(0, 1)` (+Z) this is `(1, 0)` (+X).
pub fn starboard(heading: DVec2) -> DVec2 {
    DVec2::new(heading.y, -heading.x)
}

/// Bearing of `to` seen from `from`, in degrees, measured from +X toward +Z
/// and wrapped to `[0, 360)`. Matches the sonar sweep angle convention.
pub fn bearing_deg(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees().rem_euclid(360.0)
}
