use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::ISA_SEA_LEVEL_DENSITY;

/// Represents air data for the aircraft, computed once per sub-step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirData {
    /// True airspeed of the aircraft (m/s).
    pub true_airspeed: f64,
    /// Equivalent (indicated) airspeed, `TAS * sqrt(sigma)` (m/s).
    pub indicated_airspeed: f64,
    /// Mach number.
    pub mach: f64,
    /// Angle of attack (α) in radians.
    pub alpha: f64,
    /// Sideslip angle (β) in radians.
    pub beta: f64,
    /// Dynamic pressure acting on the aircraft (Pa).
    pub dynamic_pressure: f64,
    /// Air density (kg/m³).
    pub density: f64,
    /// Air-relative velocity in the body frame (m/s).
    pub relative_velocity: Vector3<f64>,
    /// Wind velocity in the body frame (m/s).
    pub wind_velocity: Vector3<f64>,
}

impl Default for AirData {
    /// Provides a default state for zero airspeed and no wind.
    fn default() -> Self {
        Self {
            true_airspeed: 0.0,
            indicated_airspeed: 0.0,
            mach: 0.0,
            alpha: 0.0,
            beta: 0.0,
            dynamic_pressure: 0.0,
            density: ISA_SEA_LEVEL_DENSITY,
            relative_velocity: Vector3::zeros(),
            wind_velocity: Vector3::zeros(),
        }
    }
}
