use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{
    Force, ForceCategory, GearConfig, GearId, GearLeg, GroundContactPoint, Moment,
    PhysicsComponent, ReferenceFrame, RigidBodyState,
};

/// Nose-wheel steering actuator: yaw torque and side force per kg of mass at full rudder.
const STEERING_YAW_PER_KG: f64 = 2.0;
const STEERING_SIDE_PER_KG: f64 = 0.3;
/// Ground speed over which the steering actuator fades in [m/s]
const STEERING_FADE_SPEED: f64 = 5.0;
/// Vertical damping applied at the main-gear midpoint while the nose is unloaded [1/s]
const PIVOT_DAMPING: f64 = 2.0;

/// What the gear sees of the cockpit this sub-step.
#[derive(Debug, Clone, Copy)]
pub struct GearCommand {
    /// Gear fully extended and locked.
    pub down_locked: bool,
    pub brakes: f64,
    /// Steering input [-1, 1], positive nose right.
    pub steering: f64,
}

/// Ground under the aircraft.
#[derive(Debug, Clone, Copy)]
pub struct GroundSurface {
    /// Ground height MSL [m]
    pub elevation: f64,
    /// (rolling, braking, lateral) friction multipliers.
    pub friction_factors: (f64, f64, f64),
}

/// Result of the contact pass for one sub-step.
#[derive(Debug, Clone, Default)]
pub struct GroundReaction {
    pub contacts: Vec<GroundContactPoint>,
    pub on_ground: bool,
}

impl GroundReaction {
    pub fn load(&self, gear: GearId) -> f64 {
        self.contacts
            .iter()
            .find(|c| c.gear == gear)
            .map_or(0.0, |c| c.normal_force)
    }

    pub fn mains_loaded(&self) -> bool {
        self.contacts
            .iter()
            .any(|c| c.gear.is_main() && c.normal_force > 0.0)
    }
}

/// Linear below the stiction speed, saturated at ±1 above it.
fn friction_saturation(slip: f64, stiction_speed: f64) -> f64 {
    if slip.abs() < stiction_speed {
        slip / stiction_speed
    } else {
        slip.signum()
    }
}

/// Heading of the airframe projected onto the ground plane, in NED.
fn ground_forward_axis(attitude: &UnitQuaternion<f64>) -> Vector3<f64> {
    let fwd = attitude * Vector3::x();
    let horizontal = Vector3::new(fwd.x, fwd.y, 0.0);
    let n = horizontal.norm();
    if n > 1e-6 {
        horizontal / n
    } else {
        Vector3::x()
    }
}

fn solve_leg(
    leg: &GearLeg,
    state: &RigidBodyState,
    config: &GearConfig,
    command: &GearCommand,
    surface: &GroundSurface,
    gravity: f64,
) -> GroundContactPoint {
    let point = state.point_ned(&leg.position);
    let depth = point.z + surface.elevation;
    let velocity = state.point_velocity_ned(&leg.position);

    if depth <= 0.0 {
        return GroundContactPoint {
            gear: leg.id,
            depth,
            velocity,
            normal_force: 0.0,
            friction_force: Vector3::zeros(),
            force_body: Vector3::zeros(),
            moment_body: Vector3::zeros(),
        };
    }

    // never pulls the wheel down
    let max_load = config.max_load_factor * state.mass() * gravity;
    let normal_force = (leg.stiffness * depth + leg.damping * velocity.z).clamp(0.0, max_load);

    let mut fwd = ground_forward_axis(&state.attitude);
    if leg.steerable {
        let angle = (command.steering * config.max_steering_deg).to_radians();
        let (s, c) = angle.sin_cos();
        fwd = Vector3::new(fwd.x * c - fwd.y * s, fwd.x * s + fwd.y * c, 0.0);
    }
    let lateral = Vector3::new(-fwd.y, fwd.x, 0.0);

    let (rolling_factor, braking_factor, lateral_factor) = surface.friction_factors;
    let rolling = config.rolling_friction * rolling_factor;
    let mu_long = if leg.braked {
        rolling + command.brakes * (config.braking_friction * braking_factor - rolling).max(0.0)
    } else {
        rolling
    };
    let mu_lat = config.lateral_friction * lateral_factor;

    let slip_long = velocity.dot(&fwd);
    let slip_lat = velocity.dot(&lateral);
    let friction_force = fwd
        * (-mu_long * normal_force * friction_saturation(slip_long, config.stiction_speed))
        + lateral * (-mu_lat * normal_force * friction_saturation(slip_lat, config.stiction_speed));

    let total_ned = Vector3::new(0.0, 0.0, -normal_force) + friction_force;
    let force_body = state.attitude.inverse() * total_ned;

    GroundContactPoint {
        gear: leg.id,
        depth,
        velocity,
        normal_force,
        friction_force,
        force_body,
        moment_body: leg.position.cross(&force_body),
    }
}

/// Solves every leg against the ground plane. Retracted or unlocked gear
/// produces no contacts.
pub fn calculate_gear_contacts(
    state: &RigidBodyState,
    config: &GearConfig,
    command: &GearCommand,
    surface: &GroundSurface,
    gravity: f64,
) -> GroundReaction {
    if !command.down_locked {
        return GroundReaction::default();
    }

    let contacts: Vec<GroundContactPoint> = config
        .legs
        .iter()
        .map(|leg| solve_leg(leg, state, config, command, surface, gravity))
        .collect();
    let on_ground = contacts.iter().any(GroundContactPoint::in_contact);

    GroundReaction {
        contacts,
        on_ground,
    }
}

/// Pushes tyre reactions plus the steering actuator and rotation pivot
/// assist onto the accumulator.
pub fn apply_ground_forces(
    physics: &mut PhysicsComponent,
    reaction: &GroundReaction,
    state: &RigidBodyState,
    config: &GearConfig,
    command: &GearCommand,
    gravity: f64,
) {
    if !reaction.on_ground {
        return;
    }

    for (contact, leg) in reaction.contacts.iter().zip(&config.legs) {
        if contact.in_contact() {
            physics.add_force(Force {
                vector: contact.force_body,
                point: Some(leg.position),
                frame: ReferenceFrame::Body,
                category: ForceCategory::Ground,
            });
        }
    }

    let mass = state.mass();
    let fade = (state.ground_speed() / STEERING_FADE_SPEED).min(1.0);
    physics.add_moment(Moment {
        vector: Vector3::new(0.0, 0.0, command.steering * STEERING_YAW_PER_KG * mass * fade),
        frame: ReferenceFrame::Body,
        category: ForceCategory::GroundHandling,
    });
    physics.add_force(Force {
        vector: Vector3::new(0.0, command.steering * STEERING_SIDE_PER_KG * mass * fade, 0.0),
        point: None,
        frame: ReferenceFrame::Body,
        category: ForceCategory::GroundHandling,
    });

    if reaction.load(GearId::Nose) <= 0.0 && reaction.mains_loaded() {
        if let Some(midpoint) = config.main_gear_midpoint() {
            let sink = state.point_velocity_ned(&midpoint).z;
            let weight = mass * gravity;
            let vertical = (-PIVOT_DAMPING * mass * sink).clamp(-weight, weight);
            physics.add_force(Force {
                vector: Vector3::new(0.0, 0.0, vertical),
                point: Some(midpoint),
                frame: ReferenceFrame::Inertial,
                category: ForceCategory::GroundHandling,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::GRAVITY;
    use approx::assert_relative_eq;

    fn paved() -> GroundSurface {
        GroundSurface {
            elevation: 0.0,
            friction_factors: (1.0, 1.0, 1.0),
        }
    }

    fn gear_down() -> GearCommand {
        GearCommand {
            down_locked: true,
            brakes: 0.0,
            steering: 0.0,
        }
    }

    fn parked(height: f64) -> RigidBodyState {
        RigidBodyState {
            position: Vector3::new(0.0, 0.0, -height),
            empty_mass: 42_000.0,
            fuel_mass: 8_000.0,
            payload_mass: 10_000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_spring_force_and_no_pull() {
        let config = GearConfig::a320();
        // legs at z = +3 body, CG 2.95 m up: 5 cm compression
        let state = parked(2.95);
        let reaction = calculate_gear_contacts(&state, &config, &gear_down(), &paved(), GRAVITY);
        assert!(reaction.on_ground);
        assert_relative_eq!(reaction.load(GearId::Nose), 3.4e5 * 0.05, epsilon = 1e-6);
        assert_relative_eq!(reaction.load(GearId::MainLeft), 1.35e6 * 0.05, epsilon = 1e-6);

        // rebounding fast: damper would pull, clamped to zero
        let mut rising = parked(2.95);
        rising.velocity = Vector3::new(0.0, 0.0, -2.0);
        let reaction = calculate_gear_contacts(&rising, &config, &gear_down(), &paved(), GRAVITY);
        assert!(reaction.contacts.iter().all(|c| c.normal_force == 0.0));

        let airborne = parked(10.0);
        let reaction = calculate_gear_contacts(&airborne, &config, &gear_down(), &paved(), GRAVITY);
        assert!(!reaction.on_ground);
    }

    #[test]
    fn test_load_clamped_per_leg() {
        let config = GearConfig::a320();
        let mut state = parked(2.0);
        state.velocity = Vector3::new(0.0, 0.0, 20.0);
        let reaction = calculate_gear_contacts(&state, &config, &gear_down(), &paved(), GRAVITY);
        let limit = config.max_load_factor * state.mass() * GRAVITY;
        assert!(reaction.contacts.iter().all(|c| c.normal_force <= limit));
        assert_relative_eq!(reaction.load(GearId::MainRight), limit);
    }

    #[test]
    fn test_retracted_gear_has_no_contacts() {
        let config = GearConfig::a320();
        let command = GearCommand {
            down_locked: false,
            ..gear_down()
        };
        let reaction = calculate_gear_contacts(&parked(2.9), &config, &command, &paved(), GRAVITY);
        assert!(reaction.contacts.is_empty());
        assert!(!reaction.on_ground);
    }

    #[test]
    fn test_brakes_and_wet_runway() {
        let config = GearConfig::a320();
        let mut state = parked(2.95);
        state.velocity = Vector3::new(30.0, 0.0, 0.0);

        let rolling = calculate_gear_contacts(&state, &config, &gear_down(), &paved(), GRAVITY);
        let braked_cmd = GearCommand {
            brakes: 1.0,
            ..gear_down()
        };
        let braking = calculate_gear_contacts(&state, &config, &braked_cmd, &paved(), GRAVITY);
        let wet = GroundSurface {
            friction_factors: (1.0, 0.7, 0.7),
            ..paved()
        };
        let braking_wet = calculate_gear_contacts(&state, &config, &braked_cmd, &wet, GRAVITY);

        let decel = |r: &GroundReaction| -> f64 {
            r.contacts.iter().map(|c| c.friction_force.x).sum()
        };
        assert!(decel(&rolling) < 0.0);
        assert!(decel(&braking) < decel(&rolling) * 10.0);
        assert!(decel(&braking) < decel(&braking_wet));

        let main = braking.contacts.iter().find(|c| c.gear == GearId::MainLeft).unwrap();
        assert_relative_eq!(main.friction_force.x, -0.55 * main.normal_force, epsilon = 1e-6);
    }

    #[test]
    fn test_stiction_regime_is_linear() {
        let config = GearConfig::a320();
        let mut state = parked(2.95);
        state.velocity = Vector3::new(0.0, 0.1, 0.0);
        let reaction = calculate_gear_contacts(&state, &config, &gear_down(), &paved(), GRAVITY);
        let main = reaction.contacts.iter().find(|c| c.gear == GearId::MainLeft).unwrap();
        assert_relative_eq!(
            main.friction_force.y,
            -0.7 * main.normal_force * 0.1 / 0.5,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_nose_wheel_steering_turns_friction_axes() {
        let config = GearConfig::a320();
        let mut sliding = parked(2.95);
        sliding.velocity = Vector3::new(0.0, 2.0, 0.0);
        let nose = |command: &GearCommand| {
            calculate_gear_contacts(&sliding, &config, command, &paved(), GRAVITY)
                .contacts
                .into_iter()
                .find(|c| c.gear == GearId::Nose)
                .unwrap()
        };

        let straight = nose(&gear_down());
        assert_relative_eq!(straight.friction_force.x, 0.0, epsilon = 1e-9);

        let steered = nose(&GearCommand {
            steering: 1.0,
            ..gear_down()
        });
        let angle = config.max_steering_deg.to_radians();
        let wheel = Vector3::new(angle.cos(), angle.sin(), 0.0);
        let across = Vector3::new(-angle.sin(), angle.cos(), 0.0);
        let n = steered.normal_force;
        let rolling = -config.rolling_friction * n * (2.0 * angle.sin() / config.stiction_speed);
        let side = -config.lateral_friction * n;

        assert_relative_eq!(steered.friction_force.dot(&wheel), rolling, epsilon = 1e-6);
        assert_relative_eq!(steered.friction_force.dot(&across), side, epsilon = 1e-6);
        assert_relative_eq!(
            steered.friction_force.x,
            angle.cos() * rolling - angle.sin() * side,
            epsilon = 1e-6
        );
        assert!(steered.friction_force.x > 0.0);
    }

    #[test]
    fn test_steering_actuator_fades_in() {
        let config = GearConfig::a320();
        let command = GearCommand {
            steering: 1.0,
            ..gear_down()
        };

        let mut slow = parked(2.95);
        slow.velocity = Vector3::new(2.5, 0.0, 0.0);
        let mut physics = PhysicsComponent::new(slow.mass(), Vector3::new(1.0, 1.0, 1.0));
        let reaction = calculate_gear_contacts(&slow, &config, &command, &paved(), GRAVITY);
        apply_ground_forces(&mut physics, &reaction, &slow, &config, &command, GRAVITY);

        let yaw: f64 = physics
            .moments
            .iter()
            .filter(|m| m.category == ForceCategory::GroundHandling)
            .map(|m| m.vector.z)
            .sum();
        assert_relative_eq!(yaw, 2.0 * slow.mass() * 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_pivot_assist_on_main_gear_only() {
        let config = GearConfig::a320();
        // nose high: nose wheel clear, mains compressed and sinking
        let mut state = parked(2.95);
        state.attitude = UnitQuaternion::from_euler_angles(0.0, 8.0_f64.to_radians(), 0.0);
        state.position.z = -2.5;
        state.velocity = state.attitude.inverse() * Vector3::new(70.0, 0.0, 0.5);

        let reaction = calculate_gear_contacts(&state, &config, &gear_down(), &paved(), GRAVITY);
        assert_eq!(reaction.load(GearId::Nose), 0.0);
        assert!(reaction.mains_loaded());

        let mut physics = PhysicsComponent::new(state.mass(), Vector3::new(1.0, 1.0, 1.0));
        apply_ground_forces(&mut physics, &reaction, &state, &config, &gear_down(), GRAVITY);
        let pivot = physics
            .forces
            .iter()
            .find(|f| {
                f.category == ForceCategory::GroundHandling && f.frame == ReferenceFrame::Inertial
            })
            .expect("pivot assist");
        assert!(pivot.vector.z < 0.0, "assist pushes up against the sink");
        assert!(pivot.vector.z.abs() <= state.mass() * GRAVITY);
    }
}
