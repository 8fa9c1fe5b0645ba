use approx::assert_relative_eq;
use jetfdm::components::RigidBodyState;
use jetfdm::OutputState;

/// Attitude stays a unit quaternion and nothing has gone non-finite.
#[track_caller]
pub fn assert_output_valid(model_state: &RigidBodyState, output: &OutputState) {
    let norm = model_state.attitude.quaternion().norm();
    assert!(
        (norm - 1.0).abs() < 1e-6,
        "attitude quaternion norm drifted to {}",
        norm
    );
    assert!(model_state.is_finite(), "state is not finite at t={}", output.sim_time);
    assert!(output.altitude_m.is_finite());
    assert!(output.indicated_airspeed.is_finite());
}

/// Total mass is exactly the sum of its parts.
#[track_caller]
pub fn assert_mass_consistent(state: &RigidBodyState) {
    assert_relative_eq!(
        state.mass(),
        state.empty_mass + state.fuel_mass + state.payload_mass,
        epsilon = 1e-9
    );
    assert!(state.fuel_mass >= 0.0);
}

/// Two rigid-body states agree to within `epsilon` in every component.
#[track_caller]
pub fn assert_state_close(actual: &RigidBodyState, expected: &RigidBodyState, epsilon: f64) {
    for (a, e) in actual.position.iter().zip(expected.position.iter()) {
        assert_relative_eq!(*a, *e, epsilon = epsilon);
    }
    for (a, e) in actual.velocity.iter().zip(expected.velocity.iter()) {
        assert_relative_eq!(*a, *e, epsilon = epsilon);
    }
    for (a, e) in actual
        .angular_velocity
        .iter()
        .zip(expected.angular_velocity.iter())
    {
        assert_relative_eq!(*a, *e, epsilon = epsilon);
    }
    let angle = (actual.attitude.inverse() * expected.attitude).angle();
    assert!(angle < epsilon, "attitude differs by {} rad", angle);
    assert_relative_eq!(actual.fuel_mass, expected.fuel_mass, epsilon = epsilon);
}
