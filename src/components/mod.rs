pub mod aircraft;
pub mod autopilot;
pub mod gear;
pub mod physics;
pub mod propulsion;
pub mod spatial;
pub mod termination;

pub use aircraft::{
    AirData, AircraftAeroCoefficients, AircraftConfig, AircraftGeometry, ConfigError,
    ControlAxis, ControlInput, ControlState, ControlTargets, EngineConfig, EngineSpec,
    GearConfig, GearLeg, IncrementTable, InitialConditions, MassModel, PropulsionConfig,
    RawAircraftConfig,
};
pub use aircraft::controls::{SurfaceDeflections, SurfaceEffectiveness};
pub use autopilot::{AutopilotMode, AutopilotState, AutopilotTargets, Pid};
pub use gear::{GearId, GroundContactPoint};
pub use physics::{Force, ForceCategory, Moment, PhysicsComponent, ReferenceFrame};
pub use propulsion::{EnginePhase, EngineState, PropulsionState};
pub use spatial::RigidBodyState;
pub use termination::{CrashReason, CrashReport};
