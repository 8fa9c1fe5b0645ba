pub mod config;
pub mod environment;
pub mod runway;

pub use config::{
    EnvironmentConfig, EnvironmentConfigBuilder, PhysicsConfig, PhysicsConfigBuilder,
    Precipitation, SimulationConfig, SurfaceType,
};
pub use environment::{AtmosphereSample, EnvironmentResource};
pub use runway::RunwayGeometry;
