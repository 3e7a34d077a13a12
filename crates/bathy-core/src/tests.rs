use crate::commands::PlayerCommand;
use crate::components::{Contact, ObstacleShape};
use crate::config::{validate_targets, DiveConfig, TargetSpec};
use crate::constants::*;
use crate::enums::*;
use crate::error::{CommandError, ConfigError};
use crate::events::SimEvent;
use crate::types::{bearing_deg, starboard, DVec2, SimTime};

// ---- Direction tokens ----

#[test]
fn test_direction_tokens_parse() {
    for d in Direction::ALL {
        let parsed: Direction = d.to_string().parse().unwrap();
        assert_eq!(parsed, d);
    }
}

#[test]
fn test_direction_bad_token_is_invalid_command() {
    let err = "Up".parse::<Direction>().unwrap_err();
    assert_eq!(err, CommandError::InvalidDirection("Up".into()));

    // Tokens are case-sensitive, as wired on the panel buttons.
    assert!("forward".parse::<Direction>().is_err());
}

#[test]
fn test_lateral_directions() {
    assert!(Direction::Left.is_lateral());
    assert!(Direction::Right.is_lateral());
    assert!(!Direction::Forward.is_lateral());
    assert!(!Direction::Backward.is_lateral());
}

// ---- Geometry helpers ----

#[test]
fn test_starboard_of_default_heading_is_plus_x() {
    assert_eq!(starboard(DVec2::Y), DVec2::X);
    assert_eq!(starboard(DVec2::X), DVec2::new(0.0, -1.0));
}

#[test]
fn test_bearing_convention() {
    let origin = DVec2::ZERO;
    assert!((bearing_deg(origin, DVec2::new(10.0, 0.0)) - 0.0).abs() < 1e-9);
    assert!((bearing_deg(origin, DVec2::new(0.0, 10.0)) - 90.0).abs() < 1e-9);
    assert!((bearing_deg(origin, DVec2::new(-10.0, 0.0)) - 180.0).abs() < 1e-9);
    assert!((bearing_deg(origin, DVec2::new(0.0, -10.0)) - 270.0).abs() < 1e-9);
}

#[test]
fn test_contact_from_surface_normal_flips() {
    let c = Contact::from_surface_normal(7, DVec2::new(0.0, -1.0), true);
    assert_eq!(c.key, 7);
    assert_eq!(c.normal, DVec2::new(0.0, 1.0));
    assert!(c.ongoing);
}

#[test]
fn test_sim_time_advance() {
    let mut t = SimTime::default();
    for _ in 0..TICK_RATE {
        t.advance();
    }
    assert_eq!(t.tick, TICK_RATE as u64);
    assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_mission_outcome_terminal() {
    assert!(!MissionOutcome::InProgress.is_terminal());
    assert!(MissionOutcome::Failed.is_terminal());
    assert!(MissionOutcome::Won.is_terminal());
}

// ---- Config ----

#[test]
fn test_minimal_config_fills_defaults() {
    let json = r#"{ "mission": { "targets": [ { "x": 10.0, "z": 10.0 } ] } }"#;
    let config = DiveConfig::from_json(json).unwrap();

    assert_eq!(config.mission.targets.len(), 1);
    assert_eq!(config.mission.targets[0].radius, TARGET_DEFAULT_RADIUS);
    assert_eq!(config.mission.max_fails, MISSION_MAX_FAILS);
    assert_eq!(config.vessel.max_speed, VESSEL_MAX_SPEED);
    assert_eq!(config.vessel.stop_mode, StopMode::Emergency);
    assert_eq!(config.hull.max_health, HULL_MAX_HEALTH);
    assert_eq!(config.seed, 42);
}

#[test]
fn test_config_without_targets_is_rejected() {
    let err = DiveConfig::from_json("{}").unwrap_err();
    assert_eq!(err, ConfigError::NoTargets);
}

#[test]
fn test_config_parse_error() {
    let err = DiveConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_rejects_bad_vessel_tuning() {
    let json = r#"{
        "vessel": { "max_speed": -1.0 },
        "mission": { "targets": [ { "x": 0.0, "z": 0.0 } ] }
    }"#;
    let err = DiveConfig::from_json(json).unwrap_err();
    assert_eq!(
        err,
        ConfigError::OutOfRange {
            field: "vessel.max_speed",
            value: -1.0
        }
    );
}

#[test]
fn test_config_caps_scattered_rocks() {
    let mut config = DiveConfig::default();
    config.mission.targets = vec![TargetSpec::new(0.0, 0.0, 5.0)];
    config.scattered_rocks = MAX_SCATTERED_ROCKS;
    assert!(config.validate().is_ok());

    config.scattered_rocks = 300_000_000;
    assert_eq!(
        config.validate(),
        Err(ConfigError::OutOfRange {
            field: "scattered_rocks",
            value: 300_000_000.0
        })
    );
}

#[test]
fn test_validate_targets() {
    let good = vec![TargetSpec::new(1.0, 2.0, 5.0)];
    assert!(validate_targets(&good, 3).is_ok());

    assert!(matches!(
        validate_targets(&good, 0),
        Err(ConfigError::OutOfRange {
            field: "mission.max_fails",
            ..
        })
    ));

    let bad_radius = vec![TargetSpec::new(1.0, 2.0, 5.0), TargetSpec::new(0.0, 0.0, 0.0)];
    assert_eq!(
        validate_targets(&bad_radius, 3),
        Err(ConfigError::InvalidTarget { index: 1 })
    );

    let nan = vec![TargetSpec::new(f64::NAN, 0.0, 1.0)];
    assert_eq!(
        validate_targets(&nan, 3),
        Err(ConfigError::InvalidTarget { index: 0 })
    );
}

#[test]
fn test_obstacle_json_shapes() {
    let json = r#"{
        "mission": { "targets": [ { "x": 0.0, "z": 0.0 } ] },
        "obstacles": [
            { "name": "North Wall", "shape": "Line", "start": [-50.0, 50.0], "end": [50.0, 50.0], "thickness": 1.0 },
            { "name": "Boulder", "kind": "Rock", "shape": "Point", "position": [5.0, 5.0], "size": 2.0 },
            { "name": "Hulk", "kind": "Wreck", "shape": "Rectangle", "center": [20.0, 0.0], "dimensions": [10.0, 4.0], "rotation_deg": 30.0 }
        ]
    }"#;
    let config = DiveConfig::from_json(json).unwrap();
    assert_eq!(config.obstacles.len(), 3);
    assert_eq!(config.obstacles[0].kind, ObstacleKind::Wall);
    assert!(matches!(config.obstacles[0].shape, ObstacleShape::Line { .. }));
    assert_eq!(config.obstacles[1].kind, ObstacleKind::Rock);
    match config.obstacles[2].shape {
        ObstacleShape::Rectangle { rotation_deg, .. } => assert_eq!(rotation_deg, 30.0),
        other => panic!("expected rectangle, got {:?}", other),
    }
}

#[test]
fn test_degenerate_obstacle_is_rejected() {
    let json = r#"{
        "mission": { "targets": [ { "x": 0.0, "z": 0.0 } ] },
        "obstacles": [
            { "name": "Flat", "shape": "Rectangle", "center": [0.0, 0.0], "dimensions": [0.0, 4.0] }
        ]
    }"#;
    assert_eq!(
        DiveConfig::from_json(json).unwrap_err(),
        ConfigError::InvalidObstacle { index: 0 }
    );
}

// ---- Wire format ----

#[test]
fn test_player_command_wire_format() {
    let cmd: PlayerCommand =
        serde_json::from_str(r#"{ "type": "PressControl", "direction": "Left" }"#).unwrap();
    assert_eq!(
        cmd,
        PlayerCommand::PressControl {
            direction: Direction::Left
        }
    );

    let bad = serde_json::from_str::<PlayerCommand>(
        r#"{ "type": "PressControl", "direction": "Sideways" }"#,
    );
    assert!(bad.is_err(), "unknown direction tokens must not deserialize");
}

#[test]
fn test_sim_event_is_tagged() {
    let json = serde_json::to_string(&SimEvent::MissionWon).unwrap();
    assert_eq!(json, r#"{"type":"MissionWon"}"#);

    let json = serde_json::to_string(&SimEvent::BlockedFeedback {
        severity: FeedbackSeverity::Bump,
    })
    .unwrap();
    assert!(json.contains(r#""severity":"Bump""#));
}
