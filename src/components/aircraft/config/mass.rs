use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Mass and diagonal inertia properties of the airframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassModel {
    /// Operating empty mass (kg).
    pub empty_mass: f64,
    /// Payload carried when no override is given (kg).
    pub default_payload: f64,
    /// Usable fuel capacity (kg).
    pub fuel_capacity: f64,
    /// Fuel loaded when no override is given (kg).
    pub default_fuel: f64,
    /// Principal moments of inertia about the body x/y/z axes (kg·m²).
    pub ixx: f64,
    pub iyy: f64,
    pub izz: f64,
}

impl MassModel {
    pub fn new(
        empty_mass: f64,
        default_payload: f64,
        fuel_capacity: f64,
        default_fuel: f64,
        ixx: f64,
        iyy: f64,
        izz: f64,
    ) -> Self {
        Self {
            empty_mass,
            default_payload,
            fuel_capacity,
            default_fuel: default_fuel.clamp(0.0, fuel_capacity),
            ixx,
            iyy,
            izz,
        }
    }

    /// Diagonal of the inertia tensor.
    pub fn inertia_diagonal(&self) -> Vector3<f64> {
        Vector3::new(self.ixx, self.iyy, self.izz)
    }

    pub fn a320() -> Self {
        Self::new(42_000.0, 10_000.0, 18_700.0, 10_000.0, 1.3e6, 3.5e6, 4.7e6)
    }
}
