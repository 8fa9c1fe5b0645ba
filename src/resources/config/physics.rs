use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::{SimError, SimResult, DEFAULT_SUBSTEPS, GRAVITY, MAX_FRAME_DT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed integration sub-steps per frame.
    pub substeps: u32,
    /// Frame time above this is clamped [s]
    pub max_frame_dt: f64,
    /// Gravitational acceleration [m/s^2]
    pub gravity: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            substeps: DEFAULT_SUBSTEPS,
            max_frame_dt: MAX_FRAME_DT,
            gravity: GRAVITY,
        }
    }
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfigBuilder {
    pub substeps: Option<u32>,
    pub max_frame_dt: Option<f64>,
    pub gravity: Option<f64>,
}

impl PhysicsConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn substeps(mut self, substeps: u32) -> Self {
        self.substeps = Some(substeps);
        self
    }

    pub fn max_frame_dt(mut self, dt: f64) -> Self {
        self.max_frame_dt = Some(dt);
        self
    }

    pub fn gravity(mut self, gravity: f64) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn from_json(value: &Value) -> SimResult<Self> {
        let mut builder = Self::new();

        if let Some(substeps) = value.get("substeps").and_then(|v| v.as_u64()) {
            builder = builder.substeps(substeps as u32);
        }
        if let Some(dt) = value.get("max_frame_dt").and_then(|v| v.as_f64()) {
            builder = builder.max_frame_dt(dt);
        }
        if let Some(gravity) = value.get("gravity").and_then(|v| v.as_f64()) {
            builder = builder.gravity(gravity);
        }

        Ok(builder)
    }

    pub fn build(self) -> SimResult<PhysicsConfig> {
        let mut config = PhysicsConfig::default();

        if let Some(substeps) = self.substeps {
            if substeps == 0 {
                return Err(SimError::InvalidConfig(
                    "substeps must be at least 1".to_string(),
                ));
            }
            config.substeps = substeps;
        }
        if let Some(dt) = self.max_frame_dt {
            if !(dt.is_finite() && dt > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "max_frame_dt must be positive, got {}",
                    dt
                )));
            }
            config.max_frame_dt = dt;
        }
        if let Some(gravity) = self.gravity {
            config.gravity = gravity;
        }

        Ok(config)
    }
}
