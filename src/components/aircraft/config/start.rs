use serde::{Deserialize, Serialize};

/// Where and how the aircraft is placed by `set_initial_conditions`/`reset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    /// North/East offset from the local origin (m).
    pub north_m: f64,
    pub east_m: f64,
    /// Altitude above mean sea level (m). Ignored when `on_ground`.
    pub altitude_m: f64,
    /// Geodetic position of the local origin (deg).
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// True heading (deg).
    pub heading_deg: f64,
    /// True airspeed (m/s). Ignored when `on_ground`.
    pub airspeed_mps: f64,
    /// Spawn resting on the gear at the ground elevation.
    pub on_ground: bool,
    /// Fuel and payload overrides (kg); the aircraft defaults apply when absent.
    pub fuel_kg: Option<f64>,
    pub payload_kg: Option<f64>,
    /// Throttle applied to every engine at spawn.
    pub throttle: f64,
    pub flaps: f64,
    /// Spawn with running engines (idle on the ground, `throttle` in flight).
    pub engines_running: bool,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self::on_runway()
    }
}

impl InitialConditions {
    /// Parked on the runway, engines at idle.
    pub fn on_runway() -> Self {
        Self {
            north_m: 0.0,
            east_m: 0.0,
            altitude_m: 0.0,
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            heading_deg: 0.0,
            airspeed_mps: 0.0,
            on_ground: true,
            fuel_kg: None,
            payload_kg: None,
            throttle: 0.0,
            flaps: 0.0,
            engines_running: true,
        }
    }

    /// Wings-level cruise at the given altitude and true airspeed, gear up.
    pub fn cruise(altitude_m: f64, airspeed_mps: f64, throttle: f64) -> Self {
        Self {
            altitude_m,
            airspeed_mps,
            on_ground: false,
            throttle,
            ..Self::on_runway()
        }
    }

    pub fn with_heading(mut self, heading_deg: f64) -> Self {
        self.heading_deg = heading_deg;
        self
    }

    pub fn with_fuel(mut self, fuel_kg: f64) -> Self {
        self.fuel_kg = Some(fuel_kg);
        self
    }

    pub fn with_flaps(mut self, flaps: f64) -> Self {
        self.flaps = flaps;
        self
    }
}
