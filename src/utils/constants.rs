pub const GRAVITY: f64 = 9.80665; // m/s^2
pub const AIR_GAS_CONSTANT: f64 = 287.05287; // J/(kg·K)
pub const AIR_GAMMA: f64 = 1.4;
pub const ISA_SEA_LEVEL_TEMP: f64 = 288.15; // K
pub const ISA_SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa
pub const ISA_SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const ISA_LAPSE_RATE: f64 = -0.0065; // K/m
pub const ISA_TROPOPAUSE_TEMP: f64 = 216.65; // K
pub const EARTH_RADIUS: f64 = 6_371_000.0; // m

// Unit conversions
pub const MS_TO_KNOTS: f64 = 1.943_844;
pub const KELVIN_OFFSET: f64 = 273.15;

// Frame timing
pub const MAX_FRAME_DT: f64 = 0.25; // s
pub const DEFAULT_SUBSTEPS: u32 = 5;

// Aerodynamic guards
pub const MIN_AERO_AIRSPEED: f64 = 5.0; // m/s, alpha/beta forced to zero below
pub const RATE_NORMALIZATION_EPSILON: f64 = 0.1; // m/s
pub const MAX_MACH_CORRECTION: f64 = 0.85;

/// Upper bound on engine count accepted by the aircraft builder.
pub const MAX_ENGINES: usize = 4;
