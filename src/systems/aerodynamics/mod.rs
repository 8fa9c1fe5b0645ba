pub mod air_data;
pub mod force_calculator;

pub use air_data::calculate_air_data;
pub use force_calculator::{
    apply_aero_forces, calculate_aerodynamic_forces_moments, calculate_coefficients,
    ground_effect_factor, ground_moment_fade, AeroCoefficients, AeroContext,
};
