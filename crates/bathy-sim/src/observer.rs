//! Outbound event delivery.
//!
//! Observers are called synchronously at the end of every tick, once per
//! event, in emission order.

use std::sync::mpsc::Sender;

use log::debug;

use bathy_core::enums::FeedbackSeverity;
use bathy_core::events::SimEvent;
use bathy_core::types::DVec2;

/// Receives simulation events. Every method has an empty default, so an
/// observer overrides only what it cares about.
pub trait DiveObserver {
    fn on_blocked_feedback(&mut self, _severity: FeedbackSeverity) {}

    fn on_target_captured(&mut self, _target_id: u32, _coordinates: DVec2) {}

    fn on_mission_failed(&mut self, _fail_count: u32, _max_fails: u32) {}

    fn on_mission_won(&mut self) {}

    /// Called for every event, after the specific callback (if any).
    fn on_event(&mut self, _event: &SimEvent) {}
}

/// Route one event to the matching callback, then to `on_event`.
pub fn dispatch(observer: &mut dyn DiveObserver, event: &SimEvent) {
    match *event {
        SimEvent::BlockedFeedback { severity } => observer.on_blocked_feedback(severity),
        SimEvent::TargetCaptured {
            target_id,
            coordinates,
        } => observer.on_target_captured(target_id, coordinates),
        SimEvent::MissionFailed {
            fail_count,
            max_fails,
        } => observer.on_mission_failed(fail_count, max_fails),
        SimEvent::MissionWon => observer.on_mission_won(),
        _ => {}
    }
    observer.on_event(event);
}

/// Forwards every event down a channel, for hosts that consume them on
/// another thread.
impl DiveObserver for Sender<SimEvent> {
    fn on_event(&mut self, event: &SimEvent) {
        if self.send(event.clone()).is_err() {
            debug!("event receiver dropped");
        }
    }
}
