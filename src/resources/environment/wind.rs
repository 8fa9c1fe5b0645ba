use nalgebra::{UnitQuaternion, Vector3};
use rand::Rng;

/// Peak gust per axis at turbulence intensity 1 [m/s]
pub const GUST_SCALE: f64 = 3.0;

/// Mean wind as a NED velocity. `from_deg` is the meteorological direction
/// the wind blows from, so a northerly pushes the aircraft south.
pub fn wind_ned(speed_mps: f64, from_deg: f64) -> Vector3<f64> {
    let from = from_deg.to_radians();
    Vector3::new(-speed_mps * from.cos(), -speed_mps * from.sin(), 0.0)
}

/// Uniform per-axis gust, `turbulence * GUST_SCALE * U(-1, 1)`.
pub fn gust<R: Rng>(rng: &mut R, turbulence: f64) -> Vector3<f64> {
    if turbulence <= 0.0 {
        return Vector3::zeros();
    }
    let amplitude = turbulence * GUST_SCALE;
    Vector3::new(
        amplitude * rng.gen_range(-1.0..=1.0),
        amplitude * rng.gen_range(-1.0..=1.0),
        amplitude * rng.gen_range(-1.0..=1.0),
    )
}

/// Mean wind rotated into the body frame.
pub fn wind_body(wind_ned: &Vector3<f64>, attitude: &UnitQuaternion<f64>) -> Vector3<f64> {
    attitude.inverse() * wind_ned
}
