pub mod force_calculator;
pub mod integrator;

pub use force_calculator::{add_gravity, calculate_net_forces};
pub use integrator::integrate_substep;
