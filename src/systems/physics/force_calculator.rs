use nalgebra::Vector3;

use crate::components::{Force, ForceCategory, PhysicsComponent, ReferenceFrame, RigidBodyState};

/// Adds the weight of the aircraft, expressed in the NED frame.
pub fn add_gravity(physics: &mut PhysicsComponent, gravity: f64) {
    let weight = Vector3::new(0.0, 0.0, physics.mass * gravity);
    physics.add_force(Force {
        vector: weight,
        point: None,
        frame: ReferenceFrame::Inertial,
        category: ForceCategory::Gravitational,
    });
}

/// Resolves every accumulated force and moment into body-frame
/// `net_force` / `net_moment` about the CG.
pub fn calculate_net_forces(physics: &mut PhysicsComponent, state: &RigidBodyState) {
    let to_body = state.attitude.inverse();
    let mut net_force = Vector3::zeros();
    let mut net_moment = Vector3::zeros();

    for force in &physics.forces {
        let force_body = match force.frame {
            ReferenceFrame::Body => force.vector,
            ReferenceFrame::Inertial => to_body * force.vector,
        };
        net_force += force_body;

        if let Some(point) = force.point {
            net_moment += point.cross(&force_body);
        }
    }

    for moment in &physics.moments {
        net_moment += match moment.frame {
            ReferenceFrame::Body => moment.vector,
            ReferenceFrame::Inertial => to_body * moment.vector,
        };
    }

    physics.net_force = net_force;
    physics.net_moment = net_moment;
}
