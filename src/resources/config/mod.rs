pub mod environment;
pub mod physics;
pub mod simulation;

pub use environment::{EnvironmentConfig, EnvironmentConfigBuilder, Precipitation, SurfaceType};
pub use physics::{PhysicsConfig, PhysicsConfigBuilder};
pub use simulation::SimulationConfig;
