mod assertions;
mod fixtures;

pub use assertions::{assert_mass_consistent, assert_output_valid, assert_state_close};
pub use fixtures::*;
