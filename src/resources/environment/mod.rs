pub mod atmosphere;
pub mod environment;
pub mod wind;

pub use atmosphere::AtmosphereSample;
pub use environment::EnvironmentResource;
