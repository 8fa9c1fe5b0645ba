use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::GearId;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Invalid aircraft configuration: {0}")]
    ValidationError(String),
}

/// Flat, file-facing aircraft description. Every parameter is optional;
/// anything left out falls back to the A320-class defaults.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAircraftConfig {
    /// Aircraft identification
    pub name: Option<String>,

    /// Geometry
    pub wing_area: Option<f64>,
    pub wing_span: Option<f64>,
    pub mac: Option<f64>,

    /// Mass properties
    pub empty_mass: Option<f64>,
    pub payload: Option<f64>,
    pub fuel_capacity: Option<f64>,
    pub fuel: Option<f64>,
    pub ixx: Option<f64>,
    pub iyy: Option<f64>,
    pub izz: Option<f64>,

    /// Lift
    pub c_L_0: Option<f64>,
    pub c_L_alpha: Option<f64>,
    pub c_L_deltae: Option<f64>,

    /// Drag
    pub c_D_0: Option<f64>,
    pub oswald_efficiency: Option<f64>,
    pub c_D_gear: Option<f64>,

    /// Side force
    pub c_Y_beta: Option<f64>,
    pub c_Y_deltar: Option<f64>,

    /// Pitch
    pub c_m_0: Option<f64>,
    pub c_m_alpha: Option<f64>,
    pub c_m_q: Option<f64>,
    pub c_m_deltae: Option<f64>,
    pub c_m_flaps: Option<f64>,

    /// Roll
    pub c_l_beta: Option<f64>,
    pub c_l_p: Option<f64>,
    pub c_l_deltaa: Option<f64>,
    pub c_l_deltar: Option<f64>,

    /// Yaw
    pub c_n_beta: Option<f64>,
    pub c_n_r: Option<f64>,
    pub c_n_deltar: Option<f64>,
    pub c_n_deltaa: Option<f64>,

    /// Stall onset (deg)
    pub alpha_stall_deg: Option<f64>,

    /// Increment tables as `[position, dCL, dCD]` rows
    pub flap_table: Option<Vec<[f64; 3]>>,
    pub speedbrake_table: Option<Vec<[f64; 3]>>,

    /// Propulsion
    pub engine_count: Option<usize>,
    pub max_thrust: Option<f64>,
    pub engine_positions: Option<Vec<[f64; 3]>>,

    /// Landing gear
    pub gear: Option<Vec<RawGearLeg>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGearLeg {
    pub id: GearId,
    pub position: [f64; 3],
    pub stiffness: f64,
    pub damping: f64,
    #[serde(default)]
    pub braked: bool,
    #[serde(default)]
    pub steerable: bool,
}

impl RawAircraftConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }
}
