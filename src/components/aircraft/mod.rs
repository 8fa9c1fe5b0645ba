pub mod air_data;
pub mod config;
pub mod controls;

pub use air_data::AirData;
pub use config::{
    AircraftAeroCoefficients, AircraftConfig, AircraftGeometry, ConfigError, EngineConfig,
    EngineSpec, GearConfig, GearLeg, IncrementTable, InitialConditions, MassModel,
    PropulsionConfig, RawAircraftConfig,
};
pub use controls::{ControlAxis, ControlInput, ControlState, ControlTargets};
