mod aero_coef;
mod aircraft;
mod gear;
mod geometry;
mod loader;
mod mass;
mod propulsion;
mod start;

pub use aero_coef::{
    AircraftAeroCoefficients, DragCoefficients, IncrementTable, LiftCoefficients,
    PitchCoefficients, RollCoefficients, SideForceCoefficients, StallModel, YawCoefficients,
};
pub use aircraft::AircraftConfig;
pub use gear::{GearConfig, GearLeg};
pub use geometry::AircraftGeometry;
pub use loader::{ConfigError, RawAircraftConfig, RawGearLeg};
pub use mass::MassModel;
pub use propulsion::{EngineConfig, EngineSpec, PropulsionConfig};
pub use start::InitialConditions;
