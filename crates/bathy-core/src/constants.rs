//! Simulation constants and tuning defaults.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Vessel ---

/// Default forward/backward acceleration (knots per second).
pub const VESSEL_ACCELERATION: f64 = 1.0;

/// Default top speed magnitude (knots).
pub const VESSEL_MAX_SPEED: f64 = 15.0;

/// Default brake ramp deceleration (knots per second).
pub const VESSEL_BRAKE_DECELERATION: f64 = 3.0;

/// Default lateral displacement rate while a Left/Right control is held.
pub const VESSEL_LATERAL_SPEED: f64 = 15.0;

/// Radius of the hull circle used for contacts and occupancy queries.
pub const VESSEL_HULL_RADIUS: f64 = 1.5;

/// A direction whose dot product with the blocking normal reaches this value
/// is heading into the obstacle.
pub const UNSAFE_DOT_THRESHOLD: f64 = 0.1;

/// Tolerance used when snapping the brake ramp onto its target.
pub const BRAKE_EPSILON: f64 = 1e-9;

// --- Mission ---

/// Wrong photos allowed before the mission is failed.
pub const MISSION_MAX_FAILS: u32 = 3;

/// Default capture tolerance around a photo target.
pub const TARGET_DEFAULT_RADIUS: f64 = 5.0;

/// Time the camera stays busy after the shutter fires (flash + settle).
pub const SHUTTER_COOLDOWN_SECS: f64 = 0.5;

// --- Hull ---

/// Hull integrity points.
pub const HULL_MAX_HEALTH: u32 = 3;

/// Minimum time between two accepted hits.
pub const HULL_DAMAGE_COOLDOWN_SECS: f64 = 1.0;

/// Damage dealt by one collision with an obstacle.
pub const HULL_COLLISION_DAMAGE: u32 = 1;

// --- Sonar ---

/// Sonar detection range (world units).
pub const SONAR_RANGE: f64 = 50.0;

/// Sweep rate in revolutions per second.
pub const SONAR_SCAN_SPEED: f64 = 1.0;

/// How long a blip stays on the scope after its last refresh.
pub const SONAR_BLIP_LIFETIME_SECS: f64 = 3.0;

/// Hits closer than this to an existing blip refresh it instead of spawning.
pub const SONAR_MERGE_TOLERANCE: f64 = 2.0;

/// Cosine of the beam half-angle for point contacts (about 5 degrees).
pub const SONAR_BEAM_COS: f64 = 0.996;

// --- Proximity ping ---

pub const PING_FAR_DISTANCE: f64 = 300.0;
pub const PING_NEAR_DISTANCE: f64 = 10.0;
pub const PING_INTERVAL_FAR: f64 = 2.0;
pub const PING_INTERVAL_NEAR: f64 = 0.25;
/// Lower bound on the ping interval.
pub const PING_MIN_INTERVAL: f64 = 0.08;
pub const PING_PITCH_FAR: f64 = 0.9;
pub const PING_PITCH_NEAR: f64 = 1.2;
/// Below this speed the pinger holds its last distance.
pub const PING_IDLE_SPEED: f64 = 0.05;
/// Distance smoothing rate (per second).
pub const PING_SMOOTH_SPEED: f64 = 2.5;

// --- Sea chart ---

pub const CHART_WIDTH: u32 = 10;
pub const CHART_HEIGHT: u32 = 10;
/// Spacing between chart cells (world units).
pub const CHART_STEP: f64 = 500.0;
/// World coordinates of cell (0, 0).
pub const CHART_ORIGIN: (f64, f64) = (-2500.0, -2500.0);

// --- World setup ---

/// Procedurally scattered rocks added to the configured obstacles.
pub const SCATTERED_ROCKS: u32 = 0;

/// Upper bound on `scattered_rocks` accepted by config validation.
pub const MAX_SCATTERED_ROCKS: u32 = 10_000;

/// Half-extent of the square the rocks are scattered in.
pub const SCATTER_EXTENT: f64 = 400.0;

/// Rocks keep at least this distance from the spawn point and from targets.
pub const SCATTER_CLEARANCE: f64 = 25.0;

/// Radius range of scattered rocks.
pub const SCATTER_ROCK_SIZE: (f64, f64) = (1.0, 4.0);
