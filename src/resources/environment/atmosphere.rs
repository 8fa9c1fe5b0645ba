use serde::{Deserialize, Serialize};

use crate::utils::{
    AIR_GAMMA, AIR_GAS_CONSTANT, GRAVITY, ISA_LAPSE_RATE, ISA_SEA_LEVEL_DENSITY,
    ISA_SEA_LEVEL_PRESSURE, ISA_SEA_LEVEL_TEMP, ISA_TROPOPAUSE_TEMP, KELVIN_OFFSET,
};

/// Altitude at which the standard lapse rate reaches the tropopause temperature [m]
pub const TROPOPAUSE_ALTITUDE: f64 = (ISA_TROPOPAUSE_TEMP - ISA_SEA_LEVEL_TEMP) / ISA_LAPSE_RATE;

/// Air properties at one altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereSample {
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub density: f64,
    pub speed_of_sound: f64,
}

impl AtmosphereSample {
    /// International Standard Atmosphere at `altitude_m`, shifted by `isa_deviation_k`.
    ///
    /// The deviation changes temperature (and therefore density and speed of
    /// sound) but leaves the pressure profile on the standard curve.
    pub fn isa(altitude_m: f64, isa_deviation_k: f64) -> Self {
        let standard_temp =
            (ISA_SEA_LEVEL_TEMP + ISA_LAPSE_RATE * altitude_m).max(ISA_TROPOPAUSE_TEMP);

        let exponent = -GRAVITY / (ISA_LAPSE_RATE * AIR_GAS_CONSTANT);
        let pressure_pa = if altitude_m <= TROPOPAUSE_ALTITUDE {
            ISA_SEA_LEVEL_PRESSURE * (standard_temp / ISA_SEA_LEVEL_TEMP).powf(exponent)
        } else {
            let tropopause_pressure =
                ISA_SEA_LEVEL_PRESSURE * (ISA_TROPOPAUSE_TEMP / ISA_SEA_LEVEL_TEMP).powf(exponent);
            tropopause_pressure
                * (-GRAVITY * (altitude_m - TROPOPAUSE_ALTITUDE)
                    / (AIR_GAS_CONSTANT * ISA_TROPOPAUSE_TEMP))
                    .exp()
        };

        // keep the gas law sane for absurd deviations
        let temperature_k = (standard_temp + isa_deviation_k).max(1.0);

        Self {
            temperature_k,
            pressure_pa,
            density: pressure_pa / (AIR_GAS_CONSTANT * temperature_k),
            speed_of_sound: (AIR_GAMMA * AIR_GAS_CONSTANT * temperature_k).sqrt(),
        }
    }

    /// sigma = rho / rho0
    pub fn density_ratio(&self) -> f64 {
        self.density / ISA_SEA_LEVEL_DENSITY
    }

    /// delta = p / p0
    pub fn pressure_ratio(&self) -> f64 {
        self.pressure_pa / ISA_SEA_LEVEL_PRESSURE
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_k - KELVIN_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sea_level_reference_values() {
        let sl = AtmosphereSample::isa(0.0, 0.0);
        assert_relative_eq!(sl.temperature_k, 288.15);
        assert_relative_eq!(sl.pressure_pa, 101_325.0);
        assert_relative_eq!(sl.density, 1.225, epsilon = 1e-3);
        assert_relative_eq!(sl.speed_of_sound, 340.29, epsilon = 0.05);
        assert_relative_eq!(sl.temperature_c(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_standard_altitudes() {
        let a = AtmosphereSample::isa(5_000.0, 0.0);
        assert_relative_eq!(a.temperature_k, 255.65, epsilon = 1e-9);
        assert_relative_eq!(a.pressure_pa, 54_020.0, epsilon = 30.0);
        assert_relative_eq!(a.density, 0.7361, epsilon = 1e-3);

        let tropo = AtmosphereSample::isa(11_000.0, 0.0);
        assert_relative_eq!(tropo.temperature_k, 216.65, epsilon = 1e-9);
        assert_relative_eq!(tropo.pressure_pa, 22_632.0, epsilon = 20.0);
    }

    #[test]
    fn test_stratosphere_is_isothermal_and_decaying() {
        let low = AtmosphereSample::isa(12_000.0, 0.0);
        let high = AtmosphereSample::isa(15_000.0, 0.0);
        assert_eq!(low.temperature_k, ISA_TROPOPAUSE_TEMP);
        assert_eq!(high.temperature_k, ISA_TROPOPAUSE_TEMP);
        assert!(high.pressure_pa < low.pressure_pa);
        assert_relative_eq!(low.pressure_pa, 19_330.0, epsilon = 20.0);
    }

    #[test]
    fn test_isa_deviation_thins_the_air() {
        let std = AtmosphereSample::isa(1_000.0, 0.0);
        let hot = AtmosphereSample::isa(1_000.0, 20.0);
        assert_relative_eq!(hot.temperature_k - std.temperature_k, 20.0, epsilon = 1e-9);
        assert_eq!(hot.pressure_pa, std.pressure_pa);
        assert!(hot.density_ratio() < std.density_ratio());
        assert!(hot.speed_of_sound > std.speed_of_sound);
    }

    #[test]
    fn test_ratios_monotonic_with_altitude() {
        let mut prev = AtmosphereSample::isa(0.0, 0.0);
        for h in (500..=20_000).step_by(500) {
            let s = AtmosphereSample::isa(h as f64, 0.0);
            assert!(s.density_ratio() < prev.density_ratio());
            assert!(s.pressure_ratio() < prev.pressure_ratio());
            prev = s;
        }
    }
}
