use nalgebra::{UnitQuaternion, Vector3};
use rand_chacha::ChaCha8Rng;

use super::{atmosphere::AtmosphereSample, wind};
use crate::resources::config::EnvironmentConfig;
use crate::utils::RngManager;

/// Environment the aircraft flies through: atmosphere, wind, ground surface.
/// Owns the turbulence random stream.
#[derive(Debug, Clone)]
pub struct EnvironmentResource {
    config: EnvironmentConfig,
    wind_ned: Vector3<f64>,
    rng: ChaCha8Rng,
}

impl EnvironmentResource {
    pub fn new(config: EnvironmentConfig, rng_manager: &RngManager) -> Self {
        Self {
            wind_ned: wind::wind_ned(config.wind_speed_mps, config.wind_direction_deg),
            config,
            rng: rng_manager.get_rng("turbulence"),
        }
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Swap conditions, keeping the turbulence stream where it is.
    pub fn set_config(&mut self, config: EnvironmentConfig) {
        self.wind_ned = wind::wind_ned(config.wind_speed_mps, config.wind_direction_deg);
        self.config = config;
    }

    pub fn reseed(&mut self, rng_manager: &RngManager) {
        self.rng = rng_manager.get_rng("turbulence");
    }

    pub fn atmosphere(&self, altitude_m: f64) -> AtmosphereSample {
        AtmosphereSample::isa(altitude_m, self.config.isa_deviation_k)
    }

    pub fn wind_ned(&self) -> Vector3<f64> {
        self.wind_ned
    }

    /// Body-frame mean wind, no gust.
    pub fn mean_wind_body(&self, attitude: &UnitQuaternion<f64>) -> Vector3<f64> {
        wind::wind_body(&self.wind_ned, attitude)
    }

    /// Body-frame wind including a fresh gust sample.
    pub fn sample_wind_body(&mut self, attitude: &UnitQuaternion<f64>) -> Vector3<f64> {
        wind::wind_body(&self.wind_ned, attitude)
            + wind::gust(&mut self.rng, self.config.turbulence)
    }

    pub fn ground_elevation(&self) -> f64 {
        self.config.ground_elevation_m
    }

    /// Combined (rolling, braking, lateral) friction multipliers for surface and weather.
    pub fn friction_factors(&self) -> (f64, f64, f64) {
        let (rolling, braking, lateral) = self.config.surface.friction_factors();
        let wet = self.config.precipitation.friction_factor();
        (rolling, braking * wet, lateral * wet)
    }
}
