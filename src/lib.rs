pub mod collaborators;
pub mod components;
pub mod resources;
pub mod server;
pub mod sim;
pub mod systems;
pub mod utils;

pub use collaborators::{
    FailureEffect, FailureHandler, NoFailures, ScheduledFailures, SystemsContext, SystemsLogic,
    SystemsState,
};
pub use components::{
    AircraftConfig, AutopilotMode, AutopilotTargets, ControlInput, CrashReason, InitialConditions,
};
pub use resources::{EnvironmentConfig, PhysicsConfig, RunwayGeometry, SimulationConfig};
pub use sim::{FlightModel, FlightSnapshot, OutputState};
pub use utils::{SimError, SimResult};
