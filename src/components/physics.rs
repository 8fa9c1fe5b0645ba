use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Per-sub-step force and moment accumulator.
///
/// Generators push `Force`/`Moment` entries; the force calculator resolves
/// them into `net_force`/`net_moment` in the body frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsComponent {
    pub mass: f64,
    /// Principal moments of inertia (Ixx, Iyy, Izz).
    pub inertia: Vector3<f64>,
    pub net_force: Vector3<f64>,
    pub net_moment: Vector3<f64>,
    pub forces: Vec<Force>,
    pub moments: Vec<Moment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Force {
    pub vector: Vector3<f64>,
    /// Application point relative to the CG, body frame. `None` acts at the CG.
    pub point: Option<Vector3<f64>>,
    pub frame: ReferenceFrame,
    pub category: ForceCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Moment {
    pub vector: Vector3<f64>,
    pub frame: ReferenceFrame,
    pub category: ForceCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReferenceFrame {
    Body,
    /// Local NED.
    Inertial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceCategory {
    Aerodynamic,
    Propulsive,
    Gravitational,
    Ground,
    /// Steering actuator and rotation pivot assists.
    GroundHandling,
}

impl PhysicsComponent {
    pub fn new(mass: f64, inertia: Vector3<f64>) -> Self {
        Self {
            mass,
            inertia,
            net_force: Vector3::zeros(),
            net_moment: Vector3::zeros(),
            forces: Vec::new(),
            moments: Vec::new(),
        }
    }

    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    pub fn add_moment(&mut self, moment: Moment) {
        self.moments.push(moment);
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
        self.moments.clear();
        self.net_force = Vector3::zeros();
        self.net_moment = Vector3::zeros();
    }
}
