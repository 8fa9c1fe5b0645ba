use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::GearId;

/// A single spring-damper leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearLeg {
    pub id: GearId,
    /// Wheel contact point relative to the CG, body frame (m).
    pub position: Vector3<f64>,
    /// Spring stiffness (N/m).
    pub stiffness: f64,
    /// Damping (N·s/m).
    pub damping: f64,
    pub braked: bool,
    pub steerable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GearConfig {
    pub legs: Vec<GearLeg>,
    /// Rolling friction coefficient on a dry paved surface.
    pub rolling_friction: f64,
    /// Longitudinal friction coefficient with full brakes on a dry paved surface.
    pub braking_friction: f64,
    /// Lateral (tyre side-slip) friction coefficient.
    pub lateral_friction: f64,
    /// Below this slip speed friction scales linearly with slip (m/s).
    pub stiction_speed: f64,
    /// Nose wheel deflection at full rudder (deg).
    pub max_steering_deg: f64,
    /// Per-leg normal force ceiling, in multiples of aircraft weight.
    pub max_load_factor: f64,
    /// Gear position at and above which the legs are down-locked.
    pub down_lock_threshold: f64,
}

impl GearConfig {
    pub fn leg(&self, id: GearId) -> Option<&GearLeg> {
        self.legs.iter().find(|leg| leg.id == id)
    }

    /// Midpoint of the main-gear contact points, used as the rotation pivot.
    pub fn main_gear_midpoint(&self) -> Option<Vector3<f64>> {
        let mains: Vec<&GearLeg> = self.legs.iter().filter(|l| l.id.is_main()).collect();
        if mains.is_empty() {
            return None;
        }
        let sum = mains
            .iter()
            .fold(Vector3::zeros(), |acc, leg| acc + leg.position);
        Some(sum / mains.len() as f64)
    }

    pub fn a320() -> Self {
        Self {
            legs: vec![
                GearLeg {
                    id: GearId::Nose,
                    position: Vector3::new(12.0, 0.0, 3.0),
                    stiffness: 3.4e5,
                    damping: 6.0e4,
                    braked: false,
                    steerable: true,
                },
                GearLeg {
                    id: GearId::MainLeft,
                    position: Vector3::new(-1.5, -3.8, 3.0),
                    stiffness: 1.35e6,
                    damping: 2.5e5,
                    braked: true,
                    steerable: false,
                },
                GearLeg {
                    id: GearId::MainRight,
                    position: Vector3::new(-1.5, 3.8, 3.0),
                    stiffness: 1.35e6,
                    damping: 2.5e5,
                    braked: true,
                    steerable: false,
                },
            ],
            rolling_friction: 0.015,
            braking_friction: 0.55,
            lateral_friction: 0.7,
            stiction_speed: 0.5,
            max_steering_deg: 6.0,
            max_load_factor: 4.0,
            down_lock_threshold: 0.99,
        }
    }
}

impl Default for GearConfig {
    fn default() -> Self {
        Self::a320()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_main_gear_midpoint() {
        let gear = GearConfig::a320();
        let mid = gear.main_gear_midpoint().unwrap();
        assert_relative_eq!(mid.x, -1.5);
        assert_relative_eq!(mid.y, 0.0);
        assert_relative_eq!(mid.z, 3.0);
        assert!(gear.leg(GearId::Nose).unwrap().steerable);
    }
}
