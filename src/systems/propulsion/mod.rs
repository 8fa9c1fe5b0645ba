pub mod powerplant;

pub use powerplant::{
    apply_thrust_forces, calculate_thrust, settle_engine, thrust_factor, update_engine,
    EngineConditions,
};
