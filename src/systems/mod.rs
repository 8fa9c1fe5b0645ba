pub mod aerodynamics;
pub mod autopilot;
pub mod controls;
pub mod failures;
pub mod ground;
pub mod physics;
pub mod propulsion;
pub mod termination;

pub use aerodynamics::{apply_aero_forces, calculate_air_data, AeroCoefficients, AeroContext};
pub use autopilot::{auto_trim, run_autopilot, AutopilotInputs, AutopilotOutput};
pub use controls::smooth_controls;
pub use failures::{apply_failure_effect, FailureTargets};
pub use ground::{
    apply_ground_forces, calculate_gear_contacts, GearCommand, GroundReaction, GroundSurface,
};
pub use physics::{add_gravity, calculate_net_forces, integrate_substep};
pub use propulsion::{apply_thrust_forces, settle_engine, update_engine, EngineConditions};
pub use termination::check_crash;
