use serde::{Deserialize, Serialize};

use crate::components::{AutopilotMode, AutopilotTargets, ControlInput, InitialConditions};
use crate::resources::RunwayGeometry;
use crate::sim::OutputState;

/// Frame time used when a step command omits `dt` [s]
pub const DEFAULT_STEP_DT: f64 = 0.05;

/// One newline-delimited JSON command from the client.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Rebuild the model from a simulation configuration.
    Initialize { config: serde_json::Value },
    /// Advance one frame.
    Step {
        #[serde(default)]
        controls: ControlInput,
        dt: Option<f64>,
    },
    /// Respawn at the current initial conditions, optionally with a new seed.
    Reset { seed: Option<u64> },
    ColdStart,
    InitialConditions { conditions: InitialConditions },
    Autopilot {
        engaged: bool,
        #[serde(default)]
        targets: AutopilotTargets,
        mode: Option<AutopilotMode>,
    },
    Runway { runway: RunwayGeometry },
    /// Partial environment update; absent fields keep their value.
    Environment { config: serde_json::Value },
    Save { path: String },
    Load { path: String },
    Close,
}

/// Reply to a command, one JSON line each.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ready {
        aircraft: String,
        engines: usize,
        seed: u64,
    },
    Output {
        output: Box<OutputState>,
        terminated: bool,
    },
    Ok {
        message: String,
    },
    Error {
        message: String,
    },
}

impl Response {
    pub fn ok(message: impl Into<String>) -> Self {
        Response::Ok {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn output(output: OutputState) -> Self {
        Response::Output {
            terminated: output.crashed,
            output: Box::new(output),
        }
    }
}
