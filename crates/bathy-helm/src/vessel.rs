//! Vessel motion model.
//!
//! Forward/Backward accumulate a signed speed that `advance` integrates along
//! the heading. Left/Right displace the vessel directly, one command at a time.
//! Contacts reported through `on_collision` veto moves that would push further
//! into an obstacle; they never move the vessel themselves.

use std::collections::BTreeMap;

use log::debug;

use bathy_core::components::{BrakeRamp, Contact, VesselState};
use bathy_core::config::VesselTuning;
use bathy_core::constants::{BRAKE_EPSILON, UNSAFE_DOT_THRESHOLD};
use bathy_core::enums::{Direction, FeedbackSeverity, RejectReason};
use bathy_core::error::CommandError;
use bathy_core::events::SimEvent;
use bathy_core::types::{starboard, DVec2};

/// Static-obstacle lookup used to vet lateral moves.
pub trait ObstacleQuery {
    /// Whether a hull circle of `radius` centred on `position` overlaps an obstacle.
    fn is_occupied(&self, position: DVec2, radius: f64) -> bool;
}

/// An obstacle query over empty water.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenWater;

impl ObstacleQuery for OpenWater {
    fn is_occupied(&self, _position: DVec2, _radius: f64) -> bool {
        false
    }
}

/// What happened to a directional command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Rejected(RejectReason),
}

/// The vessel: kinematic state, handling, and active contacts.
#[derive(Debug, Clone)]
pub struct VesselMotion {
    state: VesselState,
    tuning: VesselTuning,
    /// Active contacts: key -> (last update sequence, normal).
    contacts: BTreeMap<u64, (u64, DVec2)>,
    contact_seq: u64,
}

impl VesselMotion {
    /// A vessel at rest at the origin, heading +Z.
    pub fn new(tuning: VesselTuning) -> Self {
        Self {
            state: VesselState::default(),
            tuning,
            contacts: BTreeMap::new(),
            contact_seq: 0,
        }
    }

    pub fn state(&self) -> &VesselState {
        &self.state
    }

    pub fn tuning(&self) -> &VesselTuning {
        &self.tuning
    }

    pub fn position(&self) -> DVec2 {
        self.state.position
    }

    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    pub fn is_braking(&self) -> bool {
        self.state.brake.is_some()
    }

    pub fn is_blocked(&self) -> bool {
        self.state.is_blocked
    }

    pub fn controls_locked(&self) -> bool {
        self.state.controls_locked
    }

    /// Number of obstacles currently touching the hull.
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Apply one directional helm command.
    ///
    /// Rejections are normal gameplay and come back as
    /// `CommandOutcome::Rejected`; the ones the player should feel also push a
    /// `BlockedFeedback` event. Only a bad `dt` is an error.
    pub fn apply_command(
        &mut self,
        direction: Direction,
        dt: f64,
        obstacles: &dyn ObstacleQuery,
        events: &mut Vec<SimEvent>,
    ) -> Result<CommandOutcome, CommandError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(CommandError::InvalidTimeStep(dt));
        }

        if self.state.controls_locked {
            return Ok(CommandOutcome::Rejected(RejectReason::Locked));
        }

        if self.is_braking() {
            if direction.is_lateral() {
                events.push(SimEvent::BlockedFeedback {
                    severity: FeedbackSeverity::Bump,
                });
            }
            debug!("{} ignored while braking", direction);
            return Ok(CommandOutcome::Rejected(RejectReason::Braking));
        }

        let outcome = match direction {
            Direction::Forward => {
                if self.heads_into_contact(self.state.heading) {
                    self.reject(RejectReason::Blocked, events)
                } else {
                    let speed = self.state.speed + self.tuning.acceleration * dt;
                    self.state.speed = speed.min(self.tuning.max_speed);
                    CommandOutcome::Applied
                }
            }
            Direction::Backward => {
                let speed = self.state.speed - self.tuning.acceleration * dt;
                self.state.speed = speed.max(-self.tuning.max_speed);
                CommandOutcome::Applied
            }
            Direction::Left | Direction::Right => {
                let side = starboard(self.state.heading);
                let lateral = if direction == Direction::Right {
                    side
                } else {
                    -side
                };
                let candidate = self.state.position + lateral * self.tuning.lateral_speed * dt;

                if self.heads_into_contact(lateral) {
                    self.reject(RejectReason::Blocked, events)
                } else if obstacles.is_occupied(candidate, self.tuning.hull_radius) {
                    self.reject(RejectReason::Occupied, events)
                } else {
                    self.state.position = candidate;
                    CommandOutcome::Applied
                }
            }
        };

        Ok(outcome)
    }

    /// Parse a raw control token and apply it.
    pub fn apply_token(
        &mut self,
        token: &str,
        dt: f64,
        obstacles: &dyn ObstacleQuery,
        events: &mut Vec<SimEvent>,
    ) -> Result<CommandOutcome, CommandError> {
        let direction: Direction = token.parse()?;
        self.apply_command(direction, dt, obstacles, events)
    }

    /// Integrate one step: run the brake ramp, then move along the heading.
    ///
    /// Obstacles are not consulted here; contacts arrive via `on_collision`.
    pub fn advance(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            debug!("advance ignored for dt {}", dt);
            return;
        }

        if let Some(ramp) = self.state.brake {
            let step = self.tuning.brake_deceleration * dt;
            let remaining = ramp.target - self.state.speed;
            if remaining.abs() <= step + BRAKE_EPSILON {
                self.state.speed = ramp.target;
                self.state.brake = None;
            } else {
                self.state.speed += step.copysign(remaining);
            }
        }

        self.state.position += self.state.heading * self.state.speed * dt;
    }

    /// Record a contact starting/continuing (`ongoing`) or ending.
    pub fn on_collision(&mut self, contact: Contact, events: &mut Vec<SimEvent>) {
        if !contact.ongoing {
            self.contacts.remove(&contact.key);
            let latest = self
                .contacts
                .values()
                .max_by_key(|(seq, _)| *seq)
                .map(|(_, normal)| *normal);
            match latest {
                Some(normal) => {
                    self.state.is_blocked = true;
                    self.state.blocking_normal = normal;
                }
                None => {
                    self.state.is_blocked = false;
                    self.state.blocking_normal = DVec2::ZERO;
                }
            }
            return;
        }

        self.contact_seq += 1;
        self.contacts
            .insert(contact.key, (self.contact_seq, contact.normal));
        self.state.is_blocked = true;
        self.state.blocking_normal = contact.normal;

        if self.state.speed != 0.0 {
            let motion = self.state.heading * self.state.speed.signum();
            if is_unsafe(motion, contact.normal) {
                debug!("contact {} stopped the vessel", contact.key);
                self.state.speed = 0.0;
                self.state.brake = None;
                events.push(SimEvent::BlockedFeedback {
                    severity: FeedbackSeverity::Impact,
                });
            }
        }
    }

    /// Kill all way at once, cancelling any brake ramp.
    pub fn emergency_stop(&mut self) {
        self.state.speed = 0.0;
        self.state.brake = None;
    }

    /// Start ramping speed down to zero.
    pub fn gradual_stop(&mut self) {
        self.state.brake = Some(BrakeRamp { target: 0.0 });
    }

    pub fn lock_controls(&mut self, locked: bool) {
        self.state.controls_locked = locked;
    }

    /// Point the bow along `heading` (normalized).
    pub fn set_heading(&mut self, heading: DVec2) -> Result<(), CommandError> {
        let unit = heading.normalize_or_zero();
        if unit == DVec2::ZERO || !unit.is_finite() {
            return Err(CommandError::DegenerateHeading);
        }
        self.state.heading = unit;
        Ok(())
    }

    /// Back to the spawn point: at rest, unblocked, unlocked.
    pub fn respawn(&mut self) {
        self.state = VesselState::default();
        self.contacts.clear();
    }

    fn heads_into_contact(&self, direction: DVec2) -> bool {
        self.state.is_blocked && is_unsafe(direction, self.state.blocking_normal)
    }

    fn reject(&self, reason: RejectReason, events: &mut Vec<SimEvent>) -> CommandOutcome {
        debug!("helm command rejected: {:?}", reason);
        events.push(SimEvent::BlockedFeedback {
            severity: FeedbackSeverity::Blocked,
        });
        CommandOutcome::Rejected(reason)
    }
}

/// Whether moving along `direction` pushes into a contact with `normal`.
pub fn is_unsafe(direction: DVec2, normal: DVec2) -> bool {
    direction.dot(normal) >= UNSAFE_DOT_THRESHOLD
}
