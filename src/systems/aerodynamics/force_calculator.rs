use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::components::{
    AirData, AircraftAeroCoefficients, AircraftGeometry, Force, ForceCategory, Moment,
    PhysicsComponent, ReferenceFrame, SurfaceDeflections,
};
use crate::utils::{MAX_MACH_CORRECTION, RATE_NORMALIZATION_EPSILON};

/// Height over which roll and yaw aero moments fade in near the ground [m]
const MOMENT_FADE_HEIGHT: f64 = 10.0;
/// Remaining roll/yaw authority while a wheel is on the ground.
const MIN_GROUND_MOMENT_FADE: f64 = 0.2;
/// Lower bound of the Torenbeek ground-effect factor.
const MIN_GROUND_EFFECT: f64 = 0.1;

/// Everything the aerodynamic model needs from the current sub-step.
#[derive(Debug, Clone)]
pub struct AeroContext<'a> {
    pub air_data: &'a AirData,
    /// Body rates (p, q, r) [rad/s]
    pub angular_velocity: Vector3<f64>,
    pub surfaces: &'a SurfaceDeflections,
    /// Height of the CG above the ground [m]
    pub height_agl: f64,
    pub on_ground: bool,
}

/// Non-dimensional force and moment coefficients in the usual stability sense.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AeroCoefficients {
    pub c_l: f64,
    pub c_d: f64,
    pub c_y: f64,
    /// Rolling moment coefficient.
    pub c_roll: f64,
    pub c_m: f64,
    pub c_n: f64,
}

/// Torenbeek induced-drag factor `(16h/b)² / (1 + (16h/b)²)`, floored at 0.1.
pub fn ground_effect_factor(height_agl: f64, wing_span: f64) -> f64 {
    let x = (16.0 * height_agl.max(0.0) / wing_span).powi(2);
    (x / (1.0 + x)).max(MIN_GROUND_EFFECT)
}

/// Scale on roll and yaw aero moments close to the ground.
pub fn ground_moment_fade(height_agl: f64, on_ground: bool) -> f64 {
    let fade = (height_agl / MOMENT_FADE_HEIGHT).clamp(0.0, 1.0);
    if on_ground {
        fade.max(MIN_GROUND_MOMENT_FADE)
    } else {
        fade
    }
}

/// Prandtl-Glauert lift-slope correction, Mach clamped to keep it bounded.
pub fn prandtl_glauert(mach: f64) -> f64 {
    let m = mach.clamp(0.0, MAX_MACH_CORRECTION);
    1.0 / (1.0 - m * m).sqrt()
}

pub fn calculate_coefficients(
    geometry: &AircraftGeometry,
    coeffs: &AircraftAeroCoefficients,
    ctx: &AeroContext,
) -> AeroCoefficients {
    let air = ctx.air_data;
    let alpha = air.alpha;
    let beta = air.beta;
    let s = ctx.surfaces;

    let v_denom = 2.0 * (air.true_airspeed + RATE_NORMALIZATION_EPSILON);
    let p_hat = ctx.angular_velocity.x * geometry.wing_span / v_denom;
    let q_hat = ctx.angular_velocity.y * geometry.mac / v_denom;
    let r_hat = ctx.angular_velocity.z * geometry.wing_span / v_denom;

    let (flap_cl, flap_cd) = coeffs.flaps.lookup(s.flaps);
    let (sb_cl, sb_cd) = coeffs.speedbrake.lookup(s.speedbrake);

    let mut c_l = coeffs.lift.c_l_0
        + coeffs.lift.c_l_alpha * prandtl_glauert(air.mach) * alpha
        + flap_cl
        + sb_cl
        + coeffs.lift.c_l_deltae * s.elevator;

    let alpha_stall = coeffs.stall.alpha_stall_deg.to_radians();
    if alpha.abs() > alpha_stall {
        let excess = alpha.abs() - alpha_stall;
        let loss =
            coeffs.stall.max_lift_loss * (excess * coeffs.stall.loss_rate).min(FRAC_PI_2).sin();
        c_l -= loss.copysign(alpha);
    }

    let k = 1.0 / (PI * geometry.aspect_ratio * coeffs.drag.oswald_efficiency);
    let c_d = coeffs.drag.c_d_0
        + flap_cd
        + sb_cd
        + coeffs.drag.c_d_gear * s.gear
        + k * c_l * c_l * ground_effect_factor(ctx.height_agl, geometry.wing_span);

    let c_y = coeffs.side_force.c_y_beta * beta + coeffs.side_force.c_y_deltar * s.rudder;

    let c_roll = coeffs.roll.c_l_beta * beta
        + coeffs.roll.c_l_p * p_hat
        + coeffs.roll.c_l_deltaa * s.aileron
        + coeffs.roll.c_l_deltar * s.rudder
        + coeffs.roll.c_l_r_lift_factor * c_l * r_hat;

    let c_m = coeffs.pitch.c_m_0
        + coeffs.pitch.c_m_alpha * alpha
        + coeffs.pitch.c_m_q * q_hat
        + coeffs.pitch.c_m_deltae * s.elevator
        + coeffs.pitch.c_m_flaps * s.flaps;

    let c_n = coeffs.yaw.c_n_beta * beta
        + coeffs.yaw.c_n_r * r_hat
        + coeffs.yaw.c_n_deltar * s.rudder
        + coeffs.yaw.c_n_deltaa * s.aileron;

    AeroCoefficients {
        c_l,
        c_d,
        c_y,
        c_roll,
        c_m,
        c_n,
    }
}

/// Aerodynamic force and moment in the BODY frame.
///
/// Lift and drag are rotated from wind to body axes through α; roll and yaw
/// moments fade out close to the ground.
pub fn calculate_aerodynamic_forces_moments(
    geometry: &AircraftGeometry,
    coeffs: &AircraftAeroCoefficients,
    ctx: &AeroContext,
) -> (Vector3<f64>, Vector3<f64>, AeroCoefficients) {
    let c = calculate_coefficients(geometry, coeffs, ctx);
    let qs = ctx.air_data.dynamic_pressure * geometry.wing_area;

    let lift = qs * c.c_l;
    let drag = qs * c.c_d;
    let side = qs * c.c_y;
    let (sin_a, cos_a) = ctx.air_data.alpha.sin_cos();

    let forces_body = Vector3::new(
        -drag * cos_a + lift * sin_a,
        side,
        -drag * sin_a - lift * cos_a,
    );

    let fade = ground_moment_fade(ctx.height_agl, ctx.on_ground);
    let moments_body = Vector3::new(
        qs * geometry.wing_span * c.c_roll * fade,
        qs * geometry.mac * c.c_m,
        qs * geometry.wing_span * c.c_n * fade,
    );

    (forces_body, moments_body, c)
}

/// Computes the aero loads and pushes them onto the accumulator.
pub fn apply_aero_forces(
    physics: &mut PhysicsComponent,
    geometry: &AircraftGeometry,
    coeffs: &AircraftAeroCoefficients,
    ctx: &AeroContext,
) -> AeroCoefficients {
    let (forces_body, moments_body, c) =
        calculate_aerodynamic_forces_moments(geometry, coeffs, ctx);

    physics.add_force(Force {
        vector: forces_body,
        point: None,
        frame: ReferenceFrame::Body,
        category: ForceCategory::Aerodynamic,
    });
    physics.add_moment(Moment {
        vector: moments_body,
        frame: ReferenceFrame::Body,
        category: ForceCategory::Aerodynamic,
    });
    c
}
