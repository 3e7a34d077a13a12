//! Photo mission tracker.
//!
//! Each shutter press is judged against the open (uncaptured) targets. A hit
//! captures exactly one target; a miss costs one attempt. The mission ends
//! `Won` when every target is captured or `Failed` when the miss budget runs
//! out, and from then on refuses further shots.

use log::{debug, info};

use bathy_core::components::MissionTarget;
use bathy_core::config::{validate_targets, TargetSpec};
use bathy_core::enums::{CaptureResult, MissionOutcome};
use bathy_core::error::{CaptureError, ConfigError};
use bathy_core::events::SimEvent;
use bathy_core::types::DVec2;

const UNNAMED_TARGET: &str = "Unknown Location";

#[derive(Debug, Clone)]
pub struct MissionTracker {
    targets: Vec<MissionTarget>,
    fail_count: u32,
    max_fails: u32,
    outcome: MissionOutcome,
}

impl MissionTracker {
    /// Build a tracker from configured targets. Ids follow list order.
    pub fn load(specs: &[TargetSpec], max_fails: u32) -> Result<Self, ConfigError> {
        validate_targets(specs, max_fails)?;

        let targets = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| MissionTarget {
                id: i as u32,
                name: spec
                    .name
                    .clone()
                    .unwrap_or_else(|| UNNAMED_TARGET.to_string()),
                coordinates: DVec2::new(spec.x, spec.z),
                radius: spec.radius,
                captured: false,
            })
            .collect();

        Ok(Self {
            targets,
            fail_count: 0,
            max_fails,
            outcome: MissionOutcome::InProgress,
        })
    }

    /// Judge one photo taken at `position`.
    ///
    /// Targets are tried in id order and the first open one in range wins.
    /// Captured targets are never re-matched, so a second photo of the same
    /// spot counts as a miss.
    pub fn attempt_capture(
        &mut self,
        position: DVec2,
        events: &mut Vec<SimEvent>,
    ) -> Result<CaptureResult, CaptureError> {
        if self.outcome.is_terminal() {
            return Err(CaptureError::AlreadyTerminal(self.outcome));
        }

        let hit = self
            .targets
            .iter_mut()
            .find(|t| !t.captured && position.distance(t.coordinates) <= t.radius);

        if let Some(target) = hit {
            target.captured = true;
            let id = target.id;
            info!("captured target {} ({})", id, target.name);
            events.push(SimEvent::TargetCaptured {
                target_id: id,
                coordinates: target.coordinates,
            });

            if self.targets.iter().all(|t| t.captured) {
                self.outcome = MissionOutcome::Won;
                info!("mission won");
                events.push(SimEvent::MissionWon);
            }
            return Ok(CaptureResult::Hit(id));
        }

        self.fail_count += 1;
        debug!(
            "photo missed at ({:.1}, {:.1}): {}/{}",
            position.x, position.y, self.fail_count, self.max_fails
        );
        events.push(SimEvent::PhotoMissed {
            fail_count: self.fail_count,
            max_fails: self.max_fails,
        });

        if self.fail_count >= self.max_fails {
            self.outcome = MissionOutcome::Failed;
            info!("mission failed after {} misses", self.fail_count);
            events.push(SimEvent::MissionFailed {
                fail_count: self.fail_count,
                max_fails: self.max_fails,
            });
        }

        Ok(CaptureResult::Miss)
    }

    /// Id and distance of the closest target not yet captured.
    pub fn nearest_open_target(&self, position: DVec2) -> Option<(u32, f64)> {
        self.targets
            .iter()
            .filter(|t| !t.captured)
            .map(|t| (t.id, position.distance(t.coordinates)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn target(&self, id: u32) -> Option<&MissionTarget> {
        self.targets.get(id as usize)
    }

    pub fn targets(&self) -> &[MissionTarget] {
        &self.targets
    }

    pub fn captured_count(&self) -> usize {
        self.targets.iter().filter(|t| t.captured).count()
    }

    pub fn fail_count(&self) -> u32 {
        self.fail_count
    }

    pub fn max_fails(&self) -> u32 {
        self.max_fails
    }

    pub fn outcome(&self) -> MissionOutcome {
        self.outcome
    }
}
