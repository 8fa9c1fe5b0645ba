pub mod model;
pub mod output;
pub mod snapshot;

pub use model::FlightModel;
pub use output::{AutopilotStatus, ControlsOutput, EngineOutput, OutputState};
pub use snapshot::{FlightSnapshot, SNAPSHOT_VERSION};
