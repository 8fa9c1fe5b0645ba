use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::collaborators::SystemsState;
use crate::components::{
    AutopilotState, ControlAxis, ControlState, CrashReport, PropulsionState, RigidBodyState,
};
use crate::resources::{EnvironmentConfig, RunwayGeometry};
use crate::utils::{SimError, SimResult};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Complete restorable flight state.
///
/// Re-serializing a loaded snapshot reproduces the same JSON byte for byte.
/// The turbulence stream is not captured; a restored model continues with
/// a freshly seeded one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSnapshot {
    pub version: u32,
    pub aircraft: String,
    pub sim_time: f64,
    pub state: RigidBodyState,
    pub propulsion: PropulsionState,
    pub controls: ControlState,
    pub autopilot: AutopilotState,
    pub runway: Option<RunwayGeometry>,
    pub systems: SystemsState,
    pub environment: EnvironmentConfig,
    pub fuel_leak_rate: f64,
    pub on_ground: bool,
    pub crash: Option<CrashReport>,
    /// Set when written to disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl FlightSnapshot {
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SimError::Snapshot(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }

    /// Writes pretty JSON, stamping `saved_at`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SimResult<()> {
        let stamped = Self {
            saved_at: Some(Utc::now()),
            ..self.clone()
        };
        fs::write(path.as_ref(), serde_json::to_string_pretty(&stamped)?)?;
        info!(path = %path.as_ref().display(), sim_time = self.sim_time, "flight state saved");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let snapshot = Self::from_json(&contents)?;
        info!(path = %path.as_ref().display(), sim_time = snapshot.sim_time, "flight state loaded");
        Ok(snapshot)
    }

    /// Structural checks run before a snapshot replaces live state.
    pub fn validate(&self, engine_count: usize) -> SimResult<()> {
        if self.propulsion.engines.len() != engine_count {
            return Err(SimError::Snapshot(format!(
                "snapshot has {} engines, aircraft has {}",
                self.propulsion.engines.len(),
                engine_count
            )));
        }
        if self.controls.throttle.len() != engine_count {
            return Err(SimError::Snapshot(format!(
                "snapshot has {} throttles, aircraft has {} engines",
                self.controls.throttle.len(),
                engine_count
            )));
        }
        let norm = self.state.attitude.quaternion().norm();
        if (norm - 1.0).abs() > 1e-6 {
            return Err(SimError::Snapshot(format!(
                "attitude quaternion not normalized (|q| = {})",
                norm
            )));
        }
        if !self.state.is_finite() || !self.sim_time.is_finite() {
            return Err(SimError::Snapshot("non-finite state".to_string()));
        }
        if !(self.state.fuel_mass >= 0.0) {
            return Err(SimError::Snapshot(format!(
                "negative fuel mass {}",
                self.state.fuel_mass
            )));
        }
        self.validate_controls()
    }

    fn validate_controls(&self) -> SimResult<()> {
        let controls = &self.controls;
        let out_of_travel = |name: &str, value: f64| {
            SimError::Snapshot(format!("{} position {} outside its travel", name, value))
        };
        for axis in [
            ControlAxis::Aileron,
            ControlAxis::Elevator,
            ControlAxis::Rudder,
            ControlAxis::Flaps,
            ControlAxis::Speedbrake,
        ] {
            let position = controls.position(axis);
            if !axis.contains(position) {
                return Err(out_of_travel(&format!("{:?}", axis), position));
            }
        }
        for (axis, stuck) in &controls.stuck {
            if !axis.contains(*stuck) {
                return Err(out_of_travel(&format!("stuck {:?}", axis), *stuck));
            }
        }
        let unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        let signed = |v: f64| v.is_finite() && (-1.0..=1.0).contains(&v);
        if !signed(controls.trim) {
            return Err(out_of_travel("trim", controls.trim));
        }
        if !unit(controls.gear) {
            return Err(out_of_travel("gear", controls.gear));
        }
        if !unit(controls.brakes) {
            return Err(out_of_travel("brakes", controls.brakes));
        }
        if let Some(throttle) = controls.throttle.iter().find(|t| !signed(**t)) {
            return Err(out_of_travel("throttle", *throttle));
        }
        Ok(())
    }
}
