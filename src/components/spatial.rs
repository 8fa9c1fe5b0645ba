use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::EARTH_RADIUS;

/// Rigid-body state of the airframe.
///
/// Position is NED relative to the local origin (z positive down), velocity
/// and angular rate are body-frame (FRD), attitude rotates body to NED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyState {
    /// Position in the local NED frame [m]
    pub position: Vector3<f64>,

    /// Geodetic latitude [rad]
    pub latitude: f64,

    /// Geodetic longitude [rad]
    pub longitude: f64,

    /// Linear velocity in body frame [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from body to NED frame)
    pub attitude: UnitQuaternion<f64>,

    /// Angular velocity in body frame [rad/s]
    pub angular_velocity: Vector3<f64>,

    pub empty_mass: f64,
    pub fuel_mass: f64,
    pub payload_mass: f64,
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            latitude: 0.0,
            longitude: 0.0,
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
            empty_mass: 0.0,
            fuel_mass: 0.0,
            payload_mass: 0.0,
        }
    }
}

impl RigidBodyState {
    /// Total mass [kg]
    pub fn mass(&self) -> f64 {
        self.empty_mass + self.fuel_mass + self.payload_mass
    }

    /// Altitude above mean sea level [m]
    pub fn altitude(&self) -> f64 {
        -self.position.z
    }

    pub fn velocity_ned(&self) -> Vector3<f64> {
        self.attitude * self.velocity
    }

    pub fn ground_speed(&self) -> f64 {
        let v = self.velocity_ned();
        v.x.hypot(v.y)
    }

    /// Climb rate, positive up [m/s]
    pub fn vertical_speed(&self) -> f64 {
        -self.velocity_ned().z
    }

    /// (roll, pitch, yaw) [rad]
    pub fn euler_angles(&self) -> (f64, f64, f64) {
        self.attitude.euler_angles()
    }

    /// Body-frame point expressed in NED.
    pub fn point_ned(&self, body_point: &Vector3<f64>) -> Vector3<f64> {
        self.position + self.attitude * body_point
    }

    /// NED velocity of a body-fixed point, including rotation.
    pub fn point_velocity_ned(&self, body_point: &Vector3<f64>) -> Vector3<f64> {
        self.attitude * (self.velocity + self.angular_velocity.cross(body_point))
    }

    /// Advance latitude/longitude by a NED displacement on a spherical earth.
    pub fn advance_geodetic(&mut self, displacement_ned: &Vector3<f64>) {
        self.latitude += displacement_ned.x / EARTH_RADIUS;
        let cos_lat = self.latitude.cos().abs().max(1e-6);
        self.longitude += displacement_ned.y / (EARTH_RADIUS * cos_lat);
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
            && self.angular_velocity.iter().all(|v| v.is_finite())
            && self.attitude.coords.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_mass_is_sum_of_parts() {
        let state = RigidBodyState {
            empty_mass: 42_000.0,
            fuel_mass: 8_000.0,
            payload_mass: 10_000.0,
            ..Default::default()
        };
        assert_relative_eq!(state.mass(), 60_000.0);
    }

    #[test]
    fn test_body_velocity_rotates_into_ned() {
        // heading east, flying forward
        let state = RigidBodyState {
            velocity: Vector3::new(100.0, 0.0, 0.0),
            attitude: UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_2),
            ..Default::default()
        };
        let v = state.velocity_ned();
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(v.y, 100.0, epsilon = 1e-9);
        assert_relative_eq!(state.ground_speed(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_advance_geodetic() {
        let mut state = RigidBodyState::default();
        state.advance_geodetic(&Vector3::new(EARTH_RADIUS * 0.01, 0.0, 0.0));
        assert_relative_eq!(state.latitude, 0.01, epsilon = 1e-12);
        assert_relative_eq!(state.longitude, 0.0);
    }
}
