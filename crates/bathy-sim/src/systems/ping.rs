//! Proximity pinger: a sonar-style beep that quickens and rises in pitch as
//! the vessel closes on the nearest open photo target.

use bathy_core::config::PingConfig;
use bathy_core::events::SimEvent;
use bathy_core::types::DVec2;
use bathy_helm::MissionTracker;

#[derive(Debug, Clone)]
pub struct ProximityPinger {
    smoothed_distance: f64,
    /// Last distance measured while moving; reused while idle.
    last_distance: f64,
    timer: f64,
    /// After a capture, report "far" until the vessel moves off or a new
    /// target becomes nearest.
    hold_far: bool,
    last_captured: Option<u32>,
}

impl ProximityPinger {
    pub fn new(config: &PingConfig) -> Self {
        Self {
            smoothed_distance: config.far_distance,
            last_distance: config.far_distance,
            timer: 0.0,
            hold_far: false,
            last_captured: None,
        }
    }

    /// Reset to the far reading after target `target_id` was photographed.
    pub fn on_capture(&mut self, target_id: u32, config: &PingConfig) {
        self.smoothed_distance = config.far_distance;
        self.last_distance = config.far_distance;
        self.timer = 0.0;
        self.hold_far = true;
        self.last_captured = Some(target_id);
    }

    pub fn smoothed_distance(&self) -> f64 {
        self.smoothed_distance
    }

    pub fn is_holding_far(&self) -> bool {
        self.hold_far
    }
}

/// Cue parameters for a smoothed distance: `(interval_secs, pitch)`.
pub fn cue(distance: f64, config: &PingConfig) -> (f64, f64) {
    let t = inverse_lerp(config.near_distance, config.far_distance, distance).clamp(0.0, 1.0);
    let interval = lerp(config.interval_near, config.interval_far, t).max(config.min_interval);
    let pitch = lerp(config.pitch_near, config.pitch_far, t);
    (interval, pitch)
}

/// Update the pinger and emit any pings that came due this tick.
pub fn run(
    pinger: &mut ProximityPinger,
    mission: &MissionTracker,
    position: DVec2,
    speed: f64,
    config: &PingConfig,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let Some((nearest_id, raw)) = mission.nearest_open_target(position) else {
        return;
    };

    let distance = if pinger.hold_far {
        let moved_off = raw > config.near_distance * 2.0;
        let new_target = pinger.last_captured != Some(nearest_id);
        if moved_off || new_target {
            pinger.hold_far = false;
        }
        config.far_distance
    } else if speed.abs() < config.idle_speed_threshold {
        pinger.last_distance
    } else {
        pinger.last_distance = raw;
        raw
    };

    if pinger.hold_far {
        pinger.smoothed_distance = config.far_distance;
    } else {
        let k = (dt * config.smooth_speed.max(0.01)).clamp(0.0, 1.0);
        pinger.smoothed_distance = lerp(pinger.smoothed_distance, distance, k);
    }

    let (interval, pitch) = cue(pinger.smoothed_distance, config);
    pinger.timer += dt;
    while pinger.timer >= interval {
        pinger.timer -= interval;
        events.push(SimEvent::ProximityPing {
            pitch,
            distance: pinger.smoothed_distance,
        });
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    if a == b {
        0.0
    } else {
        (v - a) / (b - a)
    }
}
