use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GearId {
    Nose,
    MainLeft,
    MainRight,
}

impl GearId {
    pub fn is_main(self) -> bool {
        matches!(self, GearId::MainLeft | GearId::MainRight)
    }
}

/// Contact solution for one leg, rebuilt every sub-step and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundContactPoint {
    pub gear: GearId,
    /// Penetration below the ground plane [m], positive when compressed.
    pub depth: f64,
    /// NED velocity of the contact point [m/s]
    pub velocity: Vector3<f64>,
    /// Upward normal load magnitude [N]
    pub normal_force: f64,
    /// Tyre friction force in NED [N]
    pub friction_force: Vector3<f64>,
    /// Total reaction in body axes [N]
    pub force_body: Vector3<f64>,
    /// Moment of the reaction about the CG, body axes [N·m]
    pub moment_body: Vector3<f64>,
}

impl GroundContactPoint {
    pub fn in_contact(&self) -> bool {
        self.depth > 0.0
    }
}
