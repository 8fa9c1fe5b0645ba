use crate::components::{AutopilotMode, AutopilotState};
use crate::resources::RunwayGeometry;
use crate::utils::{deg_to_rad, wrap_pi};
use nalgebra::Vector3;

/// Altitude error to climb-rate gain [1/s]
const ALTITUDE_CAPTURE_GAIN: f64 = 0.1;
/// Climb rate ceiling while capturing an altitude [m/s]
const DEFAULT_VS_LIMIT: f64 = 8.0;
/// Heading error to bank gain.
const HEADING_TO_BANK_GAIN: f64 = 1.2;
const MAX_BANK_DEG: f64 = 25.0;
/// Localizer intercept angle per metre of cross-track error [deg/m]
const LOCALIZER_GAIN_DEG_PER_M: f64 = 0.1;
const MAX_INTERCEPT_DEG: f64 = 30.0;
/// Elevator demand above which trim starts to walk.
const AUTO_TRIM_THRESHOLD: f64 = 0.05;
/// Trim travel per second.
const AUTO_TRIM_RATE: f64 = 0.05;

/// Flight state the autopilot closes its loops on.
#[derive(Debug, Clone)]
pub struct AutopilotInputs<'a> {
    pub indicated_airspeed: f64,
    pub ground_speed: f64,
    pub altitude: f64,
    /// Positive up [m/s]
    pub vertical_speed: f64,
    pub roll: f64,
    pub pitch: f64,
    /// [rad]
    pub heading: f64,
    pub position_ned: Vector3<f64>,
    pub runway: Option<&'a RunwayGeometry>,
}

/// Absolute commands written into the control targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotOutput {
    pub throttle: f64,
    pub elevator: f64,
    pub aileron: f64,
}

fn needs_runway(mode: AutopilotMode) -> bool {
    matches!(mode, AutopilotMode::Ils | AutopilotMode::Approach)
}

/// Climb rate the outer loop should fly for the current mode.
pub fn vertical_speed_target(ap: &AutopilotState, inputs: &AutopilotInputs) -> f64 {
    let targets = &ap.targets;

    if let (AutopilotMode::Approach, Some(runway)) = (ap.mode, inputs.runway) {
        let glide_path = runway.glide_path_altitude(&inputs.position_ned);
        let descent = inputs.ground_speed * deg_to_rad(runway.glide_slope_deg).tan();
        return (-descent + ALTITUDE_CAPTURE_GAIN * (glide_path - inputs.altitude))
            .clamp(-DEFAULT_VS_LIMIT, DEFAULT_VS_LIMIT);
    }

    match targets.altitude_m {
        Some(altitude) => {
            let limit = if ap.mode == AutopilotMode::VerticalSpeed
                && targets.vertical_speed_mps.abs() > 0.1
            {
                targets.vertical_speed_mps.abs()
            } else {
                DEFAULT_VS_LIMIT
            };
            (ALTITUDE_CAPTURE_GAIN * (altitude - inputs.altitude)).clamp(-limit, limit)
        }
        None => targets.vertical_speed_mps,
    }
}

/// Bank angle the roll loop should hold [rad]; zero is wings level.
pub fn bank_target(ap: &AutopilotState, inputs: &AutopilotInputs) -> f64 {
    let desired_track = match (ap.mode, inputs.runway) {
        (AutopilotMode::Heading, _) => Some(deg_to_rad(ap.targets.heading_deg)),
        (AutopilotMode::Lnav, _) => Some(deg_to_rad(ap.targets.course_deg)),
        (mode, Some(runway)) if needs_runway(mode) => {
            let cross_track = runway.cross_track(&inputs.position_ned);
            let intercept = (-LOCALIZER_GAIN_DEG_PER_M * cross_track)
                .clamp(-MAX_INTERCEPT_DEG, MAX_INTERCEPT_DEG);
            Some(deg_to_rad(runway.heading_deg + intercept))
        }
        _ => None,
    };

    let max_bank = deg_to_rad(MAX_BANK_DEG);
    desired_track.map_or(0.0, |track| {
        (HEADING_TO_BANK_GAIN * wrap_pi(track - inputs.heading)).clamp(-max_bank, max_bank)
    })
}

/// One pass of the four cascaded loops.
pub fn run_autopilot(
    ap: &mut AutopilotState,
    inputs: &AutopilotInputs,
    dt: f64,
) -> AutopilotOutput {
    let vs_target = vertical_speed_target(ap, inputs);
    let bank = bank_target(ap, inputs);

    let throttle = ap
        .speed_pid
        .step(ap.targets.speed_mps - inputs.indicated_airspeed, dt);
    let pitch_target = ap
        .vertical_speed_pid
        .step(vs_target - inputs.vertical_speed, dt);
    let elevator = ap.pitch_pid.step(pitch_target - inputs.pitch, dt);
    let aileron = ap.roll_pid.step(bank - inputs.roll, dt);

    AutopilotOutput {
        throttle,
        elevator,
        aileron,
    }
}

/// Walks trim toward a sustained elevator demand.
pub fn auto_trim(trim: f64, elevator: f64, dt: f64) -> f64 {
    if elevator.abs() > AUTO_TRIM_THRESHOLD {
        (trim + AUTO_TRIM_RATE * dt * elevator.signum()).clamp(-1.0, 1.0)
    } else {
        trim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn level(altitude: f64) -> AutopilotInputs<'static> {
        AutopilotInputs {
            indicated_airspeed: 120.0,
            ground_speed: 130.0,
            altitude,
            vertical_speed: 0.0,
            roll: 0.0,
            pitch: 0.03,
            heading: 0.0,
            position_ned: Vector3::new(0.0, 0.0, -altitude),
            runway: None,
        }
    }

    #[test]
    fn test_altitude_capture_limits_climb() {
        let mut ap = AutopilotState::default();
        ap.targets.altitude_m = Some(3_500.0);
        assert_relative_eq!(vertical_speed_target(&ap, &level(3_000.0)), 8.0);
        assert_relative_eq!(vertical_speed_target(&ap, &level(3_480.0)), 2.0, epsilon = 1e-9);

        ap.targets.vertical_speed_mps = 5.0;
        assert_relative_eq!(vertical_speed_target(&ap, &level(3_000.0)), 5.0);

        ap.targets.altitude_m = None;
        ap.targets.vertical_speed_mps = -3.0;
        assert_relative_eq!(vertical_speed_target(&ap, &level(3_000.0)), -3.0);
    }

    #[test]
    fn test_heading_mode_banks_toward_target() {
        let mut ap = AutopilotState {
            mode: AutopilotMode::Heading,
            ..Default::default()
        };
        ap.targets.heading_deg = 90.0;
        let bank = bank_target(&ap, &level(3_000.0));
        assert_relative_eq!(bank, deg_to_rad(25.0));

        // wraps the short way round
        ap.targets.heading_deg = 350.0;
        assert!(bank_target(&ap, &level(3_000.0)) < 0.0);

        let out = run_autopilot(&mut ap, &level(3_000.0), 0.05);
        assert!(out.aileron < 0.0);
    }

    #[test]
    fn test_localizer_steers_back_to_centreline() {
        let runway = RunwayGeometry::default();
        let ap = AutopilotState {
            mode: AutopilotMode::Ils,
            ..Default::default()
        };
        let mut inputs = level(500.0);
        inputs.runway = Some(&runway);
        // 5 km out, 100 m east of a northbound centreline
        inputs.position_ned = Vector3::new(-5_000.0, 100.0, -500.0);
        assert!(bank_target(&ap, &inputs) < 0.0);

        inputs.position_ned.y = 0.0;
        assert_relative_eq!(bank_target(&ap, &inputs), 0.0);
    }

    #[test]
    fn test_approach_descends_on_glide_path() {
        let runway = RunwayGeometry::default();
        let ap = AutopilotState {
            mode: AutopilotMode::Approach,
            ..Default::default()
        };
        let mut inputs = level(0.0);
        inputs.runway = Some(&runway);
        inputs.position_ned = Vector3::new(-2_700.0, 0.0, 0.0);
        inputs.altitude = runway.glide_path_altitude(&inputs.position_ned);
        let expected = -130.0 * deg_to_rad(3.0).tan();
        assert_relative_eq!(vertical_speed_target(&ap, &inputs), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_approach_without_runway_holds_wings_level() {
        let ap = AutopilotState {
            mode: AutopilotMode::Approach,
            ..Default::default()
        };
        let mut inputs = level(1_000.0);
        inputs.heading = 1.0;
        assert_eq!(bank_target(&ap, &inputs), 0.0);
    }

    #[test]
    fn test_auto_trim_walks_slowly() {
        assert_relative_eq!(auto_trim(0.0, -0.3, 1.0), -0.05);
        assert_eq!(auto_trim(0.1, 0.02, 1.0), 0.1);
        assert_eq!(auto_trim(0.99, 1.0, 1.0), 1.0);
    }

    #[test]
    fn test_speed_loop_commands_throttle() {
        let mut ap = AutopilotState::default();
        ap.targets.speed_mps = 140.0;
        let out = run_autopilot(&mut ap, &level(3_000.0), 0.05);
        assert!(out.throttle > 0.0 && out.throttle <= 1.0);

        ap.reset_integrators();
        ap.targets.speed_mps = 100.0;
        let out = run_autopilot(&mut ap, &level(3_000.0), 0.05);
        assert_eq!(out.throttle, 0.0);
    }
}
