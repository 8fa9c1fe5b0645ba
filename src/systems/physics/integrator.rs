use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::components::{PhysicsComponent, RigidBodyState};

/// Advances the rigid body by one sub-step `h` with semi-implicit Euler.
///
/// Velocities are updated from the net body force and moment first, then
/// position and attitude move with the new velocities. The quaternion is
/// renormalized every step.
pub fn integrate_substep(physics: &PhysicsComponent, state: &mut RigidBodyState, h: f64) {
    let mass = physics.mass;
    let inertia = physics.inertia;

    // v̇ = F/m − ω×v
    let acceleration = physics.net_force / mass - state.angular_velocity.cross(&state.velocity);
    state.velocity += acceleration * h;

    state.angular_velocity +=
        angular_acceleration(&physics.net_moment, &inertia, &state.angular_velocity) * h;

    let displacement = state.attitude * state.velocity * h;
    state.position += displacement;
    state.advance_geodetic(&displacement);

    state.attitude = integrate_attitude(&state.attitude, &state.angular_velocity, h);
}

/// Euler's equations for a diagonal inertia tensor.
fn angular_acceleration(
    moment: &Vector3<f64>,
    inertia: &Vector3<f64>,
    omega: &Vector3<f64>,
) -> Vector3<f64> {
    let (ixx, iyy, izz) = (inertia.x, inertia.y, inertia.z);
    let (p, q, r) = (omega.x, omega.y, omega.z);
    Vector3::new(
        (moment.x - (izz - iyy) * q * r) / ixx,
        (moment.y - (ixx - izz) * r * p) / iyy,
        (moment.z - (iyy - ixx) * p * q) / izz,
    )
}

/// q ← normalize(q + ½ q ⊗ (0, ω) h)
fn integrate_attitude(
    attitude: &UnitQuaternion<f64>,
    omega: &Vector3<f64>,
    h: f64,
) -> UnitQuaternion<f64> {
    let q = attitude.into_inner();
    let q_dot = q * Quaternion::new(0.0, omega.x, omega.y, omega.z) * 0.5;
    UnitQuaternion::new_normalize(q + q_dot * h)
}
