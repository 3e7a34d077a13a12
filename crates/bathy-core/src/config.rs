//! Dive configuration, loaded from JSON.
//!
//! Every section falls back to the defaults in `constants`, so a config file
//! only needs to list what it changes (in practice: the photo targets).

use serde::{Deserialize, Serialize};

use crate::components::{Obstacle, ObstacleShape};
use crate::constants::*;
use crate::enums::StopMode;
use crate::error::ConfigError;
use crate::types::DVec2;

/// Vessel handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselTuning {
    pub acceleration: f64,
    pub max_speed: f64,
    pub brake_deceleration: f64,
    /// Lateral displacement rate per held Left/Right control.
    pub lateral_speed: f64,
    pub hull_radius: f64,
    /// What the stop lever does when engaged.
    pub stop_mode: StopMode,
}

impl Default for VesselTuning {
    fn default() -> Self {
        Self {
            acceleration: VESSEL_ACCELERATION,
            max_speed: VESSEL_MAX_SPEED,
            brake_deceleration: VESSEL_BRAKE_DECELERATION,
            lateral_speed: VESSEL_LATERAL_SPEED,
            hull_radius: VESSEL_HULL_RADIUS,
            stop_mode: StopMode::default(),
        }
    }
}

/// One photo target as written in the config. Ids follow list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub x: f64,
    pub z: f64,
    #[serde(default = "default_target_radius")]
    pub radius: f64,
}

fn default_target_radius() -> f64 {
    TARGET_DEFAULT_RADIUS
}

impl TargetSpec {
    pub fn new(x: f64, z: f64, radius: f64) -> Self {
        Self {
            name: None,
            x,
            z,
            radius,
        }
    }
}

/// Photo mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub max_fails: u32,
    pub targets: Vec<TargetSpec>,
    /// Camera busy time after each shot.
    pub shutter_cooldown_secs: f64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            max_fails: MISSION_MAX_FAILS,
            targets: Vec::new(),
            shutter_cooldown_secs: SHUTTER_COOLDOWN_SECS,
        }
    }
}

/// Hull integrity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullConfig {
    pub max_health: u32,
    pub damage_cooldown_secs: f64,
    pub collision_damage: u32,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            max_health: HULL_MAX_HEALTH,
            damage_cooldown_secs: HULL_DAMAGE_COOLDOWN_SECS,
            collision_damage: HULL_COLLISION_DAMAGE,
        }
    }
}

/// Sonar sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SonarConfig {
    pub range: f64,
    /// Revolutions per second.
    pub scan_speed: f64,
    pub blip_lifetime_secs: f64,
    pub merge_tolerance: f64,
    pub beam_cos: f64,
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self {
            range: SONAR_RANGE,
            scan_speed: SONAR_SCAN_SPEED,
            blip_lifetime_secs: SONAR_BLIP_LIFETIME_SECS,
            merge_tolerance: SONAR_MERGE_TOLERANCE,
            beam_cos: SONAR_BEAM_COS,
        }
    }
}

/// Proximity pinger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingConfig {
    pub far_distance: f64,
    pub near_distance: f64,
    pub interval_far: f64,
    pub interval_near: f64,
    pub min_interval: f64,
    pub pitch_far: f64,
    pub pitch_near: f64,
    pub idle_speed_threshold: f64,
    pub smooth_speed: f64,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            far_distance: PING_FAR_DISTANCE,
            near_distance: PING_NEAR_DISTANCE,
            interval_far: PING_INTERVAL_FAR,
            interval_near: PING_INTERVAL_NEAR,
            min_interval: PING_MIN_INTERVAL,
            pitch_far: PING_PITCH_FAR,
            pitch_near: PING_PITCH_NEAR,
            idle_speed_threshold: PING_IDLE_SPEED,
            smooth_speed: PING_SMOOTH_SPEED,
        }
    }
}

/// Sea chart grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub step: f64,
    pub origin: DVec2,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            step: CHART_STEP,
            origin: DVec2::new(CHART_ORIGIN.0, CHART_ORIGIN.1),
        }
    }
}

/// Everything needed to start a dive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiveConfig {
    /// RNG seed for determinism. Same seed = same dive.
    pub seed: u64,
    pub vessel: VesselTuning,
    pub mission: MissionConfig,
    pub hull: HullConfig,
    pub sonar: SonarConfig,
    pub ping: PingConfig,
    pub chart: ChartConfig,
    pub obstacles: Vec<Obstacle>,
    /// Extra rocks scattered around the spawn point by the seeded RNG.
    pub scattered_rocks: u32,
}

impl Default for DiveConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            vessel: VesselTuning::default(),
            mission: MissionConfig::default(),
            hull: HullConfig::default(),
            sonar: SonarConfig::default(),
            ping: PingConfig::default(),
            chart: ChartConfig::default(),
            obstacles: Vec::new(),
            scattered_rocks: SCATTERED_ROCKS,
        }
    }
}

impl DiveConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DiveConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric knob before a dive is built from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.vessel;
        positive("vessel.acceleration", v.acceleration)?;
        positive("vessel.max_speed", v.max_speed)?;
        positive("vessel.brake_deceleration", v.brake_deceleration)?;
        non_negative("vessel.lateral_speed", v.lateral_speed)?;
        non_negative("vessel.hull_radius", v.hull_radius)?;

        validate_targets(&self.mission.targets, self.mission.max_fails)?;
        non_negative(
            "mission.shutter_cooldown_secs",
            self.mission.shutter_cooldown_secs,
        )?;

        if self.hull.max_health == 0 {
            return Err(ConfigError::OutOfRange {
                field: "hull.max_health",
                value: 0.0,
            });
        }
        non_negative("hull.damage_cooldown_secs", self.hull.damage_cooldown_secs)?;

        let s = &self.sonar;
        positive("sonar.range", s.range)?;
        non_negative("sonar.scan_speed", s.scan_speed)?;
        positive("sonar.blip_lifetime_secs", s.blip_lifetime_secs)?;
        non_negative("sonar.merge_tolerance", s.merge_tolerance)?;
        if !(-1.0..=1.0).contains(&s.beam_cos) {
            return Err(ConfigError::OutOfRange {
                field: "sonar.beam_cos",
                value: s.beam_cos,
            });
        }

        let p = &self.ping;
        positive("ping.near_distance", p.near_distance)?;
        if !(p.far_distance > p.near_distance) {
            return Err(ConfigError::OutOfRange {
                field: "ping.far_distance",
                value: p.far_distance,
            });
        }
        positive("ping.min_interval", p.min_interval)?;
        positive("ping.interval_near", p.interval_near)?;
        positive("ping.interval_far", p.interval_far)?;

        positive("chart.step", self.chart.step)?;

        if self.scattered_rocks > MAX_SCATTERED_ROCKS {
            return Err(ConfigError::OutOfRange {
                field: "scattered_rocks",
                value: f64::from(self.scattered_rocks),
            });
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            if !obstacle_is_valid(&obstacle.shape) {
                return Err(ConfigError::InvalidObstacle { index });
            }
        }

        Ok(())
    }
}

/// Validate a target list and fail budget as the mission tracker loads them.
pub fn validate_targets(targets: &[TargetSpec], max_fails: u32) -> Result<(), ConfigError> {
    if max_fails == 0 {
        return Err(ConfigError::OutOfRange {
            field: "mission.max_fails",
            value: 0.0,
        });
    }
    if targets.is_empty() {
        return Err(ConfigError::NoTargets);
    }
    for (index, t) in targets.iter().enumerate() {
        if !t.x.is_finite() || !t.z.is_finite() || !(t.radius > 0.0) || !t.radius.is_finite() {
            return Err(ConfigError::InvalidTarget { index });
        }
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn obstacle_is_valid(shape: &ObstacleShape) -> bool {
    match *shape {
        ObstacleShape::Point { position, size } => {
            position.is_finite() && size.is_finite() && size >= 0.0
        }
        ObstacleShape::Line {
            start,
            end,
            thickness,
        } => start.is_finite() && end.is_finite() && thickness.is_finite() && thickness >= 0.0,
        ObstacleShape::Rectangle {
            center,
            dimensions,
            rotation_deg,
        } => {
            center.is_finite()
                && dimensions.is_finite()
                && dimensions.x > 0.0
                && dimensions.y > 0.0
                && rotation_deg.is_finite()
        }
    }
}
