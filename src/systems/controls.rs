use crate::components::{ControlAxis, ControlState, ControlTargets};
use crate::utils::{first_order_lag, slew_toward};

/// Primary surface and trim lag [s]
const SURFACE_TAU: f64 = 1.0 / 6.0;
const THROTTLE_TAU: f64 = 1.0 / 4.0;
const BRAKE_TAU: f64 = 1.0 / 5.0;
const SPEEDBRAKE_TAU: f64 = 1.0 / 3.0;
/// Full travel in 10 s.
const FLAP_RATE: f64 = 0.1;
/// Full travel in 5 s.
const GEAR_RATE: f64 = 0.2;

/// Drives the smoothed control state toward its targets. Jammed axes track
/// their stuck position instead of the command.
pub fn smooth_controls(state: &mut ControlState, targets: &ControlTargets, dt: f64) {
    let target = |axis: ControlAxis, commanded: f64| -> f64 {
        state
            .stuck
            .get(&axis)
            .and_then(|stuck| axis.clamp(*stuck))
            .unwrap_or(commanded)
    };
    let aileron = target(ControlAxis::Aileron, targets.aileron);
    let elevator = target(ControlAxis::Elevator, targets.elevator);
    let rudder = target(ControlAxis::Rudder, targets.rudder);
    let flaps = target(ControlAxis::Flaps, targets.flaps);
    let speedbrake = target(ControlAxis::Speedbrake, targets.speedbrake);

    state.aileron = first_order_lag(state.aileron, aileron, dt, SURFACE_TAU);
    state.elevator = first_order_lag(state.elevator, elevator, dt, SURFACE_TAU);
    state.rudder = first_order_lag(state.rudder, rudder, dt, SURFACE_TAU);
    if let Some(trim) = targets.trim {
        state.trim = first_order_lag(state.trim, trim, dt, SURFACE_TAU).clamp(-1.0, 1.0);
    }

    state.throttle.resize(targets.throttle.len(), 0.0);
    for (current, commanded) in state.throttle.iter_mut().zip(&targets.throttle) {
        *current = first_order_lag(*current, *commanded, dt, THROTTLE_TAU);
    }

    state.brakes = first_order_lag(state.brakes, targets.brakes, dt, BRAKE_TAU);
    state.speedbrake = first_order_lag(state.speedbrake, speedbrake, dt, SPEEDBRAKE_TAU);
    state.flaps = slew_toward(state.flaps, flaps, FLAP_RATE, dt);
    state.gear = slew_toward(state.gear, targets.gear, GEAR_RATE, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ControlInput;
    use approx::assert_relative_eq;

    #[test]
    fn test_surfaces_lag_never_jump() {
        let mut state = ControlState::new(2);
        let targets = ControlTargets::from_input(
            &ControlInput {
                elevator: 1.0,
                ..ControlInput::default().with_throttle(1.0)
            },
            2,
        );

        smooth_controls(&mut state, &targets, 0.05);
        assert!(state.elevator > 0.0 && state.elevator < 0.5);
        assert!(state.throttle[0] > 0.0 && state.throttle[0] < 0.5);

        for _ in 0..100 {
            smooth_controls(&mut state, &targets, 0.05);
        }
        assert_relative_eq!(state.elevator, 1.0, epsilon = 1e-6);
        assert_relative_eq!(state.throttle[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_flaps_and_gear_slew() {
        let mut state = ControlState::new(2);
        let targets = ControlTargets::from_input(
            &ControlInput {
                flaps: 1.0,
                gear: 0.0,
                ..Default::default()
            },
            2,
        );
        for _ in 0..20 {
            smooth_controls(&mut state, &targets, 0.1);
        }
        // 2 s of travel
        assert_relative_eq!(state.flaps, 0.2, epsilon = 1e-9);
        assert_relative_eq!(state.gear, 0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_stuck_axis_ignores_command() {
        let mut state = ControlState::new(2);
        state.stuck.insert(ControlAxis::Aileron, 0.4);
        let targets = ControlTargets::from_input(
            &ControlInput {
                aileron: -1.0,
                ..Default::default()
            },
            2,
        );
        for _ in 0..200 {
            smooth_controls(&mut state, &targets, 0.05);
        }
        assert_relative_eq!(state.aileron, 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_out_of_travel_jam_is_clamped() {
        let mut state = ControlState::new(2);
        state.stuck.insert(ControlAxis::Aileron, 5.0);
        state.stuck.insert(ControlAxis::Speedbrake, f64::NAN);
        let targets = ControlTargets::from_input(
            &ControlInput {
                speedbrake: 0.5,
                ..Default::default()
            },
            2,
        );
        for _ in 0..200 {
            smooth_controls(&mut state, &targets, 0.05);
        }
        assert_relative_eq!(state.aileron, 1.0, epsilon = 1e-6);
        assert!(state.aileron <= 1.0);
        assert_relative_eq!(state.speedbrake, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_trim_only_moves_when_commanded() {
        let mut state = ControlState::new(1);
        state.trim = 0.2;
        let mut targets = ControlTargets::from_input(&ControlInput::default(), 1);
        smooth_controls(&mut state, &targets, 0.05);
        assert_eq!(state.trim, 0.2);

        targets.trim = Some(-0.3);
        for _ in 0..100 {
            smooth_controls(&mut state, &targets, 0.05);
        }
        assert_relative_eq!(state.trim, -0.3, epsilon = 1e-6);
    }
}
