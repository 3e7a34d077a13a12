use bathy_core::components::Contact;
use bathy_core::config::{HullConfig, TargetSpec, VesselTuning};
use bathy_core::enums::{CaptureResult, Direction, FeedbackSeverity, MissionOutcome, RejectReason};
use bathy_core::error::{CaptureError, CommandError, ConfigError};
use bathy_core::events::SimEvent;
use bathy_core::types::DVec2;

use crate::hull::{DamageOutcome, HullIntegrity};
use crate::mission::MissionTracker;
use crate::vessel::{CommandOutcome, ObstacleQuery, OpenWater, VesselMotion};

const DT: f64 = 1.0 / 30.0;

fn vessel() -> VesselMotion {
    VesselMotion::new(VesselTuning::default())
}

fn press(v: &mut VesselMotion, d: Direction, events: &mut Vec<SimEvent>) -> CommandOutcome {
    v.apply_command(d, DT, &OpenWater, events).unwrap()
}

fn feedback(events: &[SimEvent]) -> Vec<FeedbackSeverity> {
    events
        .iter()
        .filter_map(|e| match e {
            SimEvent::BlockedFeedback { severity } => Some(*severity),
            _ => None,
        })
        .collect()
}

/// Everything at or beyond `wall_x` on the X axis is solid.
struct WallAt {
    wall_x: f64,
}

impl ObstacleQuery for WallAt {
    fn is_occupied(&self, position: DVec2, radius: f64) -> bool {
        position.x + radius >= self.wall_x
    }
}

// ---- Speed control ----

#[test]
fn test_forward_speed_clamped_to_max() {
    let mut v = vessel();
    let mut events = Vec::new();
    for _ in 0..2000 {
        press(&mut v, Direction::Forward, &mut events);
        assert!(v.speed() <= v.tuning().max_speed);
    }
    assert_eq!(v.speed(), v.tuning().max_speed);
}

#[test]
fn test_backward_speed_clamped_to_negative_max() {
    let mut v = vessel();
    let mut events = Vec::new();
    for _ in 0..2000 {
        press(&mut v, Direction::Backward, &mut events);
        assert!(v.speed() >= -v.tuning().max_speed);
    }
    assert_eq!(v.speed(), -v.tuning().max_speed);
}

#[test]
fn test_forward_accelerates_by_acceleration_times_dt() {
    let mut v = vessel();
    let mut events = Vec::new();
    press(&mut v, Direction::Forward, &mut events);
    assert!((v.speed() - v.tuning().acceleration * DT).abs() < 1e-12);
    assert!(events.is_empty());
}

#[test]
fn test_advance_moves_along_heading() {
    let mut v = vessel();
    let mut events = Vec::new();
    for _ in 0..30 {
        press(&mut v, Direction::Forward, &mut events);
    }
    let speed = v.speed();
    let before = v.position();
    v.advance(DT);
    let moved = v.position() - before;
    assert!(moved.x.abs() < 1e-12);
    assert!((moved.y - speed * DT).abs() < 1e-12);
}

#[test]
fn test_invalid_dt_is_an_error() {
    let mut v = vessel();
    let mut events = Vec::new();
    for dt in [0.0, -DT, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            v.apply_command(Direction::Forward, dt, &OpenWater, &mut events),
            Err(CommandError::InvalidTimeStep(_))
        ));
    }
    assert_eq!(v.speed(), 0.0);
}

#[test]
fn test_bad_token_is_invalid_direction() {
    let mut v = vessel();
    let mut events = Vec::new();
    let err = v
        .apply_token("Sideways", DT, &OpenWater, &mut events)
        .unwrap_err();
    assert_eq!(err, CommandError::InvalidDirection("Sideways".into()));
    assert_eq!(
        v.apply_token("Forward", DT, &OpenWater, &mut events),
        Ok(CommandOutcome::Applied)
    );
}

// ---- Stops ----

#[test]
fn test_emergency_stop_zeroes_speed() {
    let mut v = vessel();
    let mut events = Vec::new();
    for _ in 0..100 {
        press(&mut v, Direction::Forward, &mut events);
    }
    v.gradual_stop();
    v.emergency_stop();
    assert_eq!(v.speed(), 0.0);
    assert!(!v.is_braking());
}

#[test]
fn test_gradual_stop_reaches_zero_within_bound() {
    for initial in [15.0, 7.3, -9.9, 0.1] {
        let mut v = vessel();
        let mut events = Vec::new();
        let dir = if initial > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        while (v.speed() - initial).abs() > 1e-9 && v.speed().abs() < initial.abs() {
            press(&mut v, dir, &mut events);
        }
        let start = v.speed();
        let bound = (start.abs() / (v.tuning().brake_deceleration * DT)).ceil() as usize;

        v.gradual_stop();
        let mut ticks = 0;
        while v.speed() != 0.0 {
            v.advance(DT);
            ticks += 1;
            assert!(
                v.speed() * start >= 0.0,
                "speed overshot sign: {} from {}",
                v.speed(),
                start
            );
            assert!(ticks <= bound, "took more than {} ticks", bound);
        }
        assert!(!v.is_braking());
    }
}

#[test]
fn test_gradual_stop_is_monotonic() {
    let mut v = vessel();
    let mut events = Vec::new();
    for _ in 0..200 {
        press(&mut v, Direction::Forward, &mut events);
    }
    v.gradual_stop();
    let mut last = v.speed();
    while v.is_braking() {
        // Throttle input is ignored while the ramp runs.
        let outcome = press(&mut v, Direction::Forward, &mut events);
        assert_eq!(outcome, CommandOutcome::Rejected(RejectReason::Braking));
        v.advance(DT);
        assert!(v.speed() <= last);
        last = v.speed();
    }
    assert_eq!(v.speed(), 0.0);
    assert!(events.is_empty());
}

#[test]
fn test_lateral_while_braking_bumps() {
    let mut v = vessel();
    let mut events = Vec::new();
    press(&mut v, Direction::Forward, &mut events);
    v.gradual_stop();
    let before = v.position();
    let outcome = press(&mut v, Direction::Left, &mut events);
    assert_eq!(outcome, CommandOutcome::Rejected(RejectReason::Braking));
    assert_eq!(v.position(), before);
    assert_eq!(feedback(&events), vec![FeedbackSeverity::Bump]);
}

#[test]
fn test_locked_controls_reject_silently() {
    let mut v = vessel();
    let mut events = Vec::new();
    v.lock_controls(true);
    for d in Direction::ALL {
        assert_eq!(
            press(&mut v, d, &mut events),
            CommandOutcome::Rejected(RejectReason::Locked)
        );
    }
    assert!(events.is_empty());
    assert_eq!(v.speed(), 0.0);
    assert_eq!(v.position(), DVec2::ZERO);

    v.lock_controls(false);
    assert_eq!(press(&mut v, Direction::Forward, &mut events), CommandOutcome::Applied);
}

// ---- Lateral moves ----

#[test]
fn test_lateral_moves_along_starboard_axis() {
    let mut v = vessel();
    let mut events = Vec::new();
    press(&mut v, Direction::Right, &mut events);
    let step = v.tuning().lateral_speed * DT;
    assert!((v.position().x - step).abs() < 1e-12);
    press(&mut v, Direction::Left, &mut events);
    press(&mut v, Direction::Left, &mut events);
    assert!((v.position().x + step).abs() < 1e-12);
    assert_eq!(v.position().y, 0.0);
}

#[test]
fn test_lateral_into_occupied_space_is_rejected() {
    let mut v = vessel();
    let mut events = Vec::new();
    let wall = WallAt { wall_x: 2.0 };
    let outcome = v
        .apply_command(Direction::Right, DT, &wall, &mut events)
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Rejected(RejectReason::Occupied));
    assert_eq!(v.position(), DVec2::ZERO);
    assert_eq!(feedback(&events), vec![FeedbackSeverity::Blocked]);

    // Moving away is fine.
    let outcome = v
        .apply_command(Direction::Left, DT, &wall, &mut events)
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Applied);
}

// ---- Contacts ----

#[test]
fn test_blocking_normal_vetoes_forward_only_into_it() {
    let mut v = vessel();
    let mut events = Vec::new();
    v.on_collision(
        Contact {
            key: 1,
            normal: DVec2::new(0.0, 1.0),
            ongoing: true,
        },
        &mut events,
    );
    assert!(v.is_blocked());

    let outcome = press(&mut v, Direction::Forward, &mut events);
    assert_eq!(outcome, CommandOutcome::Rejected(RejectReason::Blocked));
    assert_eq!(v.speed(), 0.0);

    v.set_heading(DVec2::new(0.0, -1.0)).unwrap();
    let outcome = press(&mut v, Direction::Forward, &mut events);
    assert_eq!(outcome, CommandOutcome::Applied);
    assert!(v.speed() > 0.0);
}

#[test]
fn test_grazing_contact_does_not_block() {
    let mut v = vessel();
    let mut events = Vec::new();
    // dot(heading, normal) = 0.05, below the unsafe threshold.
    let normal = DVec2::new((1.0f64 - 0.05 * 0.05).sqrt(), 0.05);
    v.on_collision(
        Contact {
            key: 3,
            normal,
            ongoing: true,
        },
        &mut events,
    );
    assert_eq!(press(&mut v, Direction::Forward, &mut events), CommandOutcome::Applied);
}

#[test]
fn test_collision_while_moving_into_obstacle_stops_vessel() {
    let mut v = vessel();
    let mut events = Vec::new();
    for _ in 0..60 {
        press(&mut v, Direction::Forward, &mut events);
    }
    v.advance(DT);
    let before = v.position();

    v.on_collision(Contact::from_surface_normal(9, DVec2::new(0.0, -1.0), true), &mut events);
    assert_eq!(v.speed(), 0.0);
    assert_eq!(v.position(), before, "contacts never displace the vessel");
    assert_eq!(feedback(&events), vec![FeedbackSeverity::Impact]);

    // A continuing contact at rest adds no more feedback.
    v.on_collision(Contact::from_surface_normal(9, DVec2::new(0.0, -1.0), true), &mut events);
    assert_eq!(feedback(&events).len(), 1);
}

#[test]
fn test_reversing_away_from_contact_keeps_speed() {
    let mut v = vessel();
    let mut events = Vec::new();
    for _ in 0..30 {
        press(&mut v, Direction::Backward, &mut events);
    }
    let speed = v.speed();
    v.on_collision(
        Contact {
            key: 2,
            normal: DVec2::new(0.0, 1.0),
            ongoing: true,
        },
        &mut events,
    );
    assert_eq!(v.speed(), speed);
    assert!(events.is_empty());
}

#[test]
fn test_contact_exit_restores_remaining_contact() {
    let mut v = vessel();
    let mut events = Vec::new();
    let north = Contact {
        key: 1,
        normal: DVec2::new(0.0, 1.0),
        ongoing: true,
    };
    let east = Contact {
        key: 2,
        normal: DVec2::new(1.0, 0.0),
        ongoing: true,
    };
    v.on_collision(north, &mut events);
    v.on_collision(east, &mut events);
    assert_eq!(v.contact_count(), 2);
    assert_eq!(v.state().blocking_normal, east.normal);

    v.on_collision(Contact { ongoing: false, ..east }, &mut events);
    assert!(v.is_blocked());
    assert_eq!(v.state().blocking_normal, north.normal);

    v.on_collision(Contact { ongoing: false, ..north }, &mut events);
    assert!(!v.is_blocked());
    assert_eq!(v.state().blocking_normal, DVec2::ZERO);
    assert_eq!(press(&mut v, Direction::Forward, &mut events), CommandOutcome::Applied);
}

#[test]
fn test_right_blocked_by_side_contact() {
    let mut v = vessel();
    let mut events = Vec::new();
    v.on_collision(
        Contact {
            key: 5,
            normal: DVec2::X,
            ongoing: true,
        },
        &mut events,
    );
    assert_eq!(
        press(&mut v, Direction::Right, &mut events),
        CommandOutcome::Rejected(RejectReason::Blocked)
    );
    assert_eq!(press(&mut v, Direction::Left, &mut events), CommandOutcome::Applied);
}

#[test]
fn test_set_heading_rejects_zero_vector() {
    let mut v = vessel();
    assert_eq!(v.set_heading(DVec2::ZERO), Err(CommandError::DegenerateHeading));
    v.set_heading(DVec2::new(3.0, 0.0)).unwrap();
    assert_eq!(v.state().heading, DVec2::X);
}

#[test]
fn test_respawn_resets_everything() {
    let mut v = vessel();
    let mut events = Vec::new();
    press(&mut v, Direction::Right, &mut events);
    press(&mut v, Direction::Forward, &mut events);
    v.on_collision(
        Contact {
            key: 1,
            normal: DVec2::X,
            ongoing: true,
        },
        &mut events,
    );
    v.lock_controls(true);
    v.respawn();
    assert_eq!(v.position(), DVec2::ZERO);
    assert_eq!(v.speed(), 0.0);
    assert!(!v.is_blocked());
    assert!(!v.controls_locked());
    assert_eq!(v.contact_count(), 0);
}

// ---- Mission ----

fn single_target_mission() -> MissionTracker {
    MissionTracker::load(&[TargetSpec::new(10.0, 10.0, 5.0)], 3).unwrap()
}

#[test]
fn test_three_misses_fail_the_mission() {
    let mut m = single_target_mission();
    let mut events = Vec::new();
    for _ in 0..3 {
        assert_eq!(
            m.attempt_capture(DVec2::new(100.0, 100.0), &mut events),
            Ok(CaptureResult::Miss)
        );
    }
    assert_eq!(m.outcome(), MissionOutcome::Failed);
    assert_eq!(m.fail_count(), 3);
    assert_eq!(
        m.attempt_capture(DVec2::new(10.0, 10.0), &mut events),
        Err(CaptureError::AlreadyTerminal(MissionOutcome::Failed))
    );

    let failed: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, SimEvent::MissionFailed { .. }))
        .collect();
    assert_eq!(
        failed,
        vec![&SimEvent::MissionFailed {
            fail_count: 3,
            max_fails: 3
        }]
    );
}

#[test]
fn test_hit_before_fail_budget_wins() {
    let mut m = single_target_mission();
    let mut events = Vec::new();
    m.attempt_capture(DVec2::new(100.0, 100.0), &mut events)
        .unwrap();
    m.attempt_capture(DVec2::new(100.0, 100.0), &mut events)
        .unwrap();
    assert_eq!(
        m.attempt_capture(DVec2::new(12.0, 13.0), &mut events),
        Ok(CaptureResult::Hit(0))
    );
    assert_eq!(m.outcome(), MissionOutcome::Won);
    assert!(m.targets()[0].captured);
    assert_eq!(events.last(), Some(&SimEvent::MissionWon));
    assert_eq!(
        m.attempt_capture(DVec2::new(10.0, 10.0), &mut events),
        Err(CaptureError::AlreadyTerminal(MissionOutcome::Won))
    );
}

#[test]
fn test_capture_radius_is_inclusive() {
    let mut m = single_target_mission();
    let mut events = Vec::new();
    assert_eq!(
        m.attempt_capture(DVec2::new(15.0, 10.0), &mut events),
        Ok(CaptureResult::Hit(0))
    );
}

#[test]
fn test_repeat_capture_does_not_double_notify() {
    let specs = [TargetSpec::new(0.0, 0.0, 5.0), TargetSpec::new(100.0, 0.0, 5.0)];
    let mut m = MissionTracker::load(&specs, 3).unwrap();
    let mut events = Vec::new();

    assert_eq!(
        m.attempt_capture(DVec2::new(1.0, 1.0), &mut events),
        Ok(CaptureResult::Hit(0))
    );
    assert_eq!(
        m.attempt_capture(DVec2::new(1.0, 1.0), &mut events),
        Ok(CaptureResult::Miss)
    );
    assert!(m.targets()[0].captured);
    assert_eq!(m.captured_count(), 1);
    let captures = events
        .iter()
        .filter(|e| matches!(e, SimEvent::TargetCaptured { .. }))
        .count();
    assert_eq!(captures, 1);
}

#[test]
fn test_won_fires_once_in_any_order() {
    let specs = [
        TargetSpec::new(0.0, 0.0, 5.0),
        TargetSpec::new(50.0, 0.0, 5.0),
        TargetSpec::new(0.0, 50.0, 5.0),
    ];
    let orders = [[0usize, 1, 2], [2, 1, 0], [1, 2, 0]];
    for order in orders {
        let mut m = MissionTracker::load(&specs, 3).unwrap();
        let mut events = Vec::new();
        for &i in &order {
            let at = DVec2::new(specs[i].x, specs[i].z);
            assert_eq!(
                m.attempt_capture(at, &mut events),
                Ok(CaptureResult::Hit(i as u32))
            );
        }
        assert_eq!(m.outcome(), MissionOutcome::Won);
        let wins = events
            .iter()
            .filter(|e| matches!(e, SimEvent::MissionWon))
            .count();
        assert_eq!(wins, 1);
    }
}

#[test]
fn test_overlapping_targets_capture_lowest_id_first() {
    let specs = [TargetSpec::new(0.0, 0.0, 5.0), TargetSpec::new(2.0, 0.0, 5.0)];
    let mut m = MissionTracker::load(&specs, 3).unwrap();
    let mut events = Vec::new();
    let at = DVec2::new(1.0, 0.0);
    assert_eq!(m.attempt_capture(at, &mut events), Ok(CaptureResult::Hit(0)));
    assert_eq!(m.attempt_capture(at, &mut events), Ok(CaptureResult::Hit(1)));
    assert_eq!(m.outcome(), MissionOutcome::Won);
}

#[test]
fn test_load_assigns_ids_and_names() {
    let mut named = TargetSpec::new(3.0, 4.0, 2.0);
    named.name = Some("Wreck of the Aurora".into());
    let m = MissionTracker::load(&[TargetSpec::new(0.0, 0.0, 1.0), named], 2).unwrap();
    assert_eq!(m.targets()[0].id, 0);
    assert_eq!(m.targets()[0].name, "Unknown Location");
    assert_eq!(m.targets()[1].id, 1);
    assert_eq!(m.targets()[1].name, "Wreck of the Aurora");
    assert_eq!(m.targets()[1].coordinates, DVec2::new(3.0, 4.0));
    assert_eq!(m.max_fails(), 2);
}

#[test]
fn test_load_rejects_empty_or_bad_lists() {
    assert_eq!(
        MissionTracker::load(&[], 3).unwrap_err(),
        ConfigError::NoTargets
    );
    assert_eq!(
        MissionTracker::load(&[TargetSpec::new(0.0, 0.0, -1.0)], 3).unwrap_err(),
        ConfigError::InvalidTarget { index: 0 }
    );
}

#[test]
fn test_nearest_open_target_skips_captured() {
    let specs = [TargetSpec::new(0.0, 0.0, 5.0), TargetSpec::new(30.0, 0.0, 5.0)];
    let mut m = MissionTracker::load(&specs, 3).unwrap();
    let mut events = Vec::new();
    assert_eq!(m.nearest_open_target(DVec2::new(1.0, 0.0)).map(|t| t.0), Some(0));
    m.attempt_capture(DVec2::ZERO, &mut events).unwrap();
    let (id, dist) = m.nearest_open_target(DVec2::new(1.0, 0.0)).unwrap();
    assert_eq!(id, 1);
    assert!((dist - 29.0).abs() < 1e-12);
}

// ---- Hull ----

#[test]
fn test_hull_damage_respects_cooldown() {
    let mut hull = HullIntegrity::new(&HullConfig::default());
    let mut events = Vec::new();
    assert_eq!(
        hull.take_damage(1, 0.0, &mut events),
        DamageOutcome::Damaged { health: 2 }
    );
    assert_eq!(hull.take_damage(1, 0.5, &mut events), DamageOutcome::Ignored);
    assert_eq!(
        hull.take_damage(1, 1.0, &mut events),
        DamageOutcome::Damaged { health: 1 }
    );
    assert_eq!(hull.health(), 1);
}

#[test]
fn test_hull_destroyed_once() {
    let mut hull = HullIntegrity::new(&HullConfig::default());
    let mut events = Vec::new();
    assert_eq!(hull.take_damage(5, 0.0, &mut events), DamageOutcome::Destroyed);
    assert!(hull.is_destroyed());
    assert_eq!(hull.take_damage(1, 10.0, &mut events), DamageOutcome::Ignored);
    let destroyed = events
        .iter()
        .filter(|e| matches!(e, SimEvent::HullDestroyed))
        .count();
    assert_eq!(destroyed, 1);

    assert_eq!(hull.heal(2), 0);
    hull.reset();
    assert_eq!(hull.health(), hull.state().max_health);
    assert!(!hull.is_destroyed());
}

#[test]
fn test_hull_heal_caps_at_max() {
    let mut hull = HullIntegrity::new(&HullConfig::default());
    let mut events = Vec::new();
    hull.take_damage(2, 0.0, &mut events);
    assert_eq!(hull.heal(10), hull.state().max_health);
}
