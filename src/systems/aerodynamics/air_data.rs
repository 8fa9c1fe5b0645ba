use nalgebra::Vector3;

use crate::components::AirData;
use crate::resources::AtmosphereSample;
use crate::utils::MIN_AERO_AIRSPEED;

/// Air data from body velocity, body-frame wind and the local atmosphere.
///
/// Angle of attack and sideslip are forced to zero below `MIN_AERO_AIRSPEED`
/// where the relative wind direction is meaningless.
pub fn calculate_air_data(
    velocity_body: &Vector3<f64>,
    wind_body: &Vector3<f64>,
    atmosphere: &AtmosphereSample,
) -> AirData {
    let relative_velocity = velocity_body - wind_body;
    let airspeed = relative_velocity.norm();

    let (alpha, beta) = if airspeed > MIN_AERO_AIRSPEED {
        (
            relative_velocity.z.atan2(relative_velocity.x),
            (relative_velocity.y / airspeed).clamp(-1.0, 1.0).asin(),
        )
    } else {
        (0.0, 0.0)
    };

    let density = atmosphere.density;
    AirData {
        true_airspeed: airspeed,
        indicated_airspeed: airspeed * atmosphere.density_ratio().sqrt(),
        mach: airspeed / atmosphere.speed_of_sound,
        alpha,
        beta,
        dynamic_pressure: 0.5 * density * airspeed * airspeed,
        density,
        relative_velocity,
        wind_velocity: *wind_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_of_attack_and_sideslip() {
        let atm = AtmosphereSample::isa(0.0, 0.0);
        let v = Vector3::new(100.0, 10.0, 5.0);
        let air = calculate_air_data(&v, &Vector3::zeros(), &atm);

        assert_relative_eq!(air.alpha, (5.0_f64).atan2(100.0), epsilon = 1e-12);
        assert_relative_eq!(air.beta, (10.0 / v.norm()).asin(), epsilon = 1e-12);
        assert_relative_eq!(air.dynamic_pressure, 0.5 * atm.density * v.norm_squared());
    }

    #[test]
    fn test_headwind_raises_airspeed() {
        let atm = AtmosphereSample::isa(0.0, 0.0);
        let v = Vector3::new(50.0, 0.0, 0.0);
        let air = calculate_air_data(&v, &Vector3::new(-10.0, 0.0, 0.0), &atm);
        assert_relative_eq!(air.true_airspeed, 60.0);
    }

    #[test]
    fn test_angles_suppressed_at_low_speed() {
        let atm = AtmosphereSample::isa(0.0, 0.0);
        let air = calculate_air_data(&Vector3::new(1.0, 0.0, 3.0), &Vector3::zeros(), &atm);
        assert_eq!(air.alpha, 0.0);
        assert_eq!(air.beta, 0.0);
    }

    #[test]
    fn test_indicated_airspeed_and_mach_at_altitude() {
        let atm = AtmosphereSample::isa(3000.0, 0.0);
        let air = calculate_air_data(&Vector3::new(130.0, 0.0, 0.0), &Vector3::zeros(), &atm);
        assert_relative_eq!(air.indicated_airspeed, 112.0, epsilon = 0.5);
        assert_relative_eq!(air.mach, 130.0 / atm.speed_of_sound);
        assert!(air.indicated_airspeed < air.true_airspeed);
    }
}
