use jetfdm::{
    AircraftConfig, ControlInput, EnvironmentConfig, FlightModel, InitialConditions,
    OutputState, PhysicsConfig,
};

/// Frame length every scenario flies at, matching a 20 Hz driver.
pub const FRAME_DT: f64 = 0.05;

pub const TEST_SEED: u64 = 42;

/// A320-class airliner parked on the runway, engines at idle.
pub fn runway_model() -> FlightModel {
    FlightModel::new(
        AircraftConfig::a320(),
        PhysicsConfig::default(),
        EnvironmentConfig::default(),
        TEST_SEED,
    )
}

/// Wings level at 3000 m and 130 m/s true airspeed, gear up, trimmed
/// thrust on both engines.
pub fn cruise_model() -> FlightModel {
    let mut model = runway_model();
    model.set_initial_conditions(InitialConditions::cruise(3000.0, 130.0, 0.47));
    model
}

/// Pilot input with the gear lever up.
pub fn gear_up(throttle: f64) -> ControlInput {
    ControlInput {
        gear: 0.0,
        ..ControlInput::default().with_throttle(throttle)
    }
}

/// Flies `seconds` of identical frames and returns every output.
pub fn fly(model: &mut FlightModel, input: &ControlInput, seconds: f64) -> Vec<OutputState> {
    let frames = (seconds / FRAME_DT).round() as usize;
    (0..frames).map(|_| model.update(input, FRAME_DT)).collect()
}
