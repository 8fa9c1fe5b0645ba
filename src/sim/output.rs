use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{
    AirData, AutopilotMode, AutopilotState, AutopilotTargets, ControlState, CrashReport,
    EnginePhase, EngineState, PropulsionState, RigidBodyState,
};
use crate::utils::{rad_to_deg, MS_TO_KNOTS};

/// Cockpit view of one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    pub n1: f64,
    pub n2: f64,
    pub thrust_n: f64,
    pub fuel_flow_kg_s: f64,
    pub egt_c: f64,
    pub phase: EnginePhase,
    pub failed: bool,
    pub reverse: bool,
}

impl From<&EngineState> for EngineOutput {
    fn from(engine: &EngineState) -> Self {
        Self {
            n1: engine.n1,
            n2: engine.n2,
            thrust_n: engine.thrust,
            fuel_flow_kg_s: engine.fuel_flow,
            egt_c: engine.egt,
            phase: engine.phase,
            failed: engine.failed,
            reverse: engine.reverse,
        }
    }
}

/// Actuator positions after smoothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlsOutput {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
    pub trim: f64,
    pub throttle: Vec<f64>,
    pub flaps: f64,
    pub gear: f64,
    pub brakes: f64,
    pub speedbrake: f64,
}

impl From<&ControlState> for ControlsOutput {
    fn from(controls: &ControlState) -> Self {
        Self {
            aileron: controls.aileron,
            elevator: controls.elevator,
            rudder: controls.rudder,
            trim: controls.trim,
            throttle: controls.throttle.clone(),
            flaps: controls.flaps,
            gear: controls.gear,
            brakes: controls.brakes,
            speedbrake: controls.speedbrake,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutopilotStatus {
    pub engaged: bool,
    pub mode: AutopilotMode,
    pub targets: AutopilotTargets,
}

impl From<&AutopilotState> for AutopilotStatus {
    fn from(ap: &AutopilotState) -> Self {
        Self {
            engaged: ap.engaged,
            mode: ap.mode,
            targets: ap.targets.clone(),
        }
    }
}

/// Everything a display or driver needs after one frame. Angles in degrees,
/// speeds in m/s unless the field name says otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputState {
    pub sim_time: f64,

    /// NED position relative to the local origin [m]
    pub position_ned: Vector3<f64>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    pub height_agl_m: f64,

    pub roll_deg: f64,
    pub pitch_deg: f64,
    /// True heading, 0..360
    pub heading_deg: f64,
    /// Body rates p, q, r [deg/s]
    pub body_rates_deg_s: Vector3<f64>,

    pub true_airspeed: f64,
    pub indicated_airspeed: f64,
    pub true_airspeed_kt: f64,
    pub indicated_airspeed_kt: f64,
    pub mach: f64,
    pub ground_speed: f64,
    /// Positive up
    pub vertical_speed: f64,
    pub alpha_deg: f64,
    pub beta_deg: f64,

    pub on_ground: bool,
    pub engines: Vec<EngineOutput>,
    /// Net thrust of all engines, negative in reverse [N]
    pub total_thrust_n: f64,
    pub fuel_kg: f64,
    pub total_mass_kg: f64,
    pub controls: ControlsOutput,
    pub autopilot: AutopilotStatus,

    pub crashed: bool,
    pub crash: Option<CrashReport>,
}

/// Borrowed pieces of the flight model an output frame is built from.
pub(crate) struct OutputSources<'a> {
    pub sim_time: f64,
    pub state: &'a RigidBodyState,
    pub air_data: &'a AirData,
    pub ground_elevation: f64,
    pub on_ground: bool,
    pub propulsion: &'a PropulsionState,
    pub controls: &'a ControlState,
    pub autopilot: &'a AutopilotState,
    pub crash: Option<&'a CrashReport>,
}

impl OutputState {
    pub(crate) fn capture(src: OutputSources<'_>) -> Self {
        let state = src.state;
        let (roll, pitch, yaw) = state.euler_angles();
        let air = src.air_data;

        Self {
            sim_time: src.sim_time,
            position_ned: state.position,
            latitude_deg: rad_to_deg(state.latitude),
            longitude_deg: rad_to_deg(state.longitude),
            altitude_m: state.altitude(),
            height_agl_m: state.altitude() - src.ground_elevation,
            roll_deg: rad_to_deg(roll),
            pitch_deg: rad_to_deg(pitch),
            heading_deg: rad_to_deg(yaw).rem_euclid(360.0),
            body_rates_deg_s: state.angular_velocity.map(rad_to_deg),
            true_airspeed: air.true_airspeed,
            indicated_airspeed: air.indicated_airspeed,
            true_airspeed_kt: air.true_airspeed * MS_TO_KNOTS,
            indicated_airspeed_kt: air.indicated_airspeed * MS_TO_KNOTS,
            mach: air.mach,
            ground_speed: state.ground_speed(),
            vertical_speed: state.vertical_speed(),
            alpha_deg: rad_to_deg(air.alpha),
            beta_deg: rad_to_deg(air.beta),
            on_ground: src.on_ground,
            engines: src.propulsion.engines.iter().map(EngineOutput::from).collect(),
            total_thrust_n: src.propulsion.total_thrust(),
            fuel_kg: state.fuel_mass,
            total_mass_kg: state.mass(),
            controls: ControlsOutput::from(src.controls),
            autopilot: AutopilotStatus::from(src.autopilot),
            crashed: src.crash.is_some(),
            crash: src.crash.cloned(),
        }
    }
}
