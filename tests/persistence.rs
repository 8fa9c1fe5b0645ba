mod common;

use common::*;
use jetfdm::server::{Command, Response, Session};
use jetfdm::{FlightModel, FlightSnapshot, SimError, SimulationConfig};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_snapshot_json_is_bit_exact() {
    let mut model = cruise_model();
    fly(&mut model, &gear_up(0.55), 10.0);

    let json = model.get_serializable_state().to_json().unwrap();
    let reparsed = FlightSnapshot::from_json(&json).unwrap();
    assert_eq!(reparsed.to_json().unwrap(), json);
}

#[test]
fn test_restored_flight_continues_identically() {
    let input = gear_up(0.55);
    let mut original = cruise_model();
    fly(&mut original, &input, 10.0);

    let snapshot = FlightSnapshot::from_json(&original.get_serializable_state().to_json().unwrap())
        .unwrap();
    let mut restored = runway_model();
    restored.load_flight_state(&snapshot).unwrap();
    assert!(!restored.on_ground());
    assert_state_close(restored.state(), original.state(), 1e-12);

    fly(&mut original, &input, 5.0);
    fly(&mut restored, &input, 5.0);
    assert_state_close(restored.state(), original.state(), 1e-3);
    assert!((restored.sim_time() - original.sim_time()).abs() < 1e-9);
}

#[test]
fn test_snapshot_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flight.json");

    let mut model = runway_model();
    fly(&mut model, &Default::default(), 2.0);
    let snapshot = model.get_serializable_state();
    snapshot.save(&path).unwrap();

    let loaded = FlightSnapshot::load(&path).unwrap();
    assert!(loaded.saved_at.is_some());
    assert_eq!(
        FlightSnapshot {
            saved_at: None,
            ..loaded
        },
        snapshot
    );
}

#[test]
fn test_corrupt_snapshot_leaves_model_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{\"version\": 1, \"aircraft\": ").unwrap();
    assert!(matches!(FlightSnapshot::load(&path), Err(SimError::Json(_))));

    let mut model = runway_model();
    let before = model.get_serializable_state();
    let mut snapshot = before.clone();
    snapshot.state.fuel_mass = -5.0;
    assert!(model.load_flight_state(&snapshot).is_err());
    assert_eq!(model.get_serializable_state(), before);
}

#[test]
fn test_partial_yaml_config_builds_quad_jet() {
    let dir = tempdir().unwrap();
    let aircraft_path = dir.path().join("quad.yaml");
    fs::write(&aircraft_path, "name: Quad\nengine_count: 4\nmax_thrust: 150000.0\n").unwrap();

    let config_path = dir.path().join("sim.yaml");
    fs::write(
        &config_path,
        format!(
            "seed: 3\naircraft_file: {}\nenvironment:\n  wind_speed_mps: 4.0\n",
            aircraft_path.display()
        ),
    )
    .unwrap();

    let config = SimulationConfig::load(&config_path).unwrap();
    assert_eq!(config.seed, 3);
    assert_eq!(config.physics.substeps, 5);
    assert_eq!(config.environment.wind_speed_mps, 4.0);
    assert_eq!(config.environment.turbulence, 0.0);

    let mut model = FlightModel::from_config(&config).unwrap();
    assert_eq!(model.config().name, "Quad");
    assert_eq!(model.config().engine_count(), 4);
    assert_eq!(model.last_output().engines.len(), 4);

    let out = fly(&mut model, &Default::default(), 5.0);
    assert!(out.iter().all(|o| o.on_ground && !o.crashed));
}

#[test]
fn test_session_reports_protocol_errors() {
    let mut session = Session::new(SimulationConfig::default()).unwrap();

    let (response, close) = session.handle(Command::Load {
        path: "/nonexistent/flight.json".to_string(),
    });
    assert!(!close);
    assert!(matches!(response, Response::Error { .. }));

    let (response, _) = session.handle(Command::Initialize {
        config: serde_json::json!({"seed": "not a number"}),
    });
    assert!(matches!(response, Response::Error { .. }));
    assert_eq!(session.model().sim_time(), 0.0);
}
