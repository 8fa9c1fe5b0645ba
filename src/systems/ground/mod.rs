pub mod contact;

pub use contact::{
    apply_ground_forces, calculate_gear_contacts, GearCommand, GroundReaction, GroundSurface,
};
