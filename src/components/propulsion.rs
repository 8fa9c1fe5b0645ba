use rand::Rng;
use serde::{Deserialize, Serialize};

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    Off,
    /// Turned by the air starter, not yet lit.
    Starting,
    Running,
}

/// Live state of one turbofan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Fan speed [%]
    pub n1: f64,
    /// Core speed [%]
    pub n2: f64,
    /// Thrust along body x [N], negative in reverse
    pub thrust: f64,
    /// Fuel flow [kg/s]
    pub fuel_flow: f64,
    /// Exhaust gas temperature [°C]
    pub egt: f64,
    pub phase: EnginePhase,
    pub failed: bool,
    /// Throttle magnitude currently commanded [0, 1]
    pub throttle: f64,
    pub reverse: bool,
    /// Externally injected EGT bias [°C]
    pub egt_offset: f64,
    /// Per-instance spool-rate multiplier, fixed at construction
    pub responsiveness: f64,
}

impl EngineState {
    /// Spool-rate variance between otherwise identical engines.
    pub const RESPONSIVENESS_RANGE: (f64, f64) = (0.95, 1.05);

    /// A cold engine at the given ambient temperature.
    pub fn new(responsiveness: f64, ambient_c: f64) -> Self {
        Self {
            n1: 0.0,
            n2: 0.0,
            thrust: 0.0,
            fuel_flow: 0.0,
            egt: ambient_c,
            phase: EnginePhase::Off,
            failed: false,
            throttle: 0.0,
            reverse: false,
            egt_offset: 0.0,
            responsiveness,
        }
    }

    pub fn with_random_responsiveness<R: Rng>(rng: &mut R, ambient_c: f64) -> Self {
        let (lo, hi) = Self::RESPONSIVENESS_RANGE;
        Self::new(rng.gen_range(lo..=hi), ambient_c)
    }

    pub fn is_running(&self) -> bool {
        self.phase == EnginePhase::Running && !self.failed
    }
}

/// Every engine on the airframe, indexed by engine ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropulsionState {
    pub engines: Vec<EngineState>,
}

impl PropulsionState {
    pub fn new<R: Rng>(engine_count: usize, rng: &mut R, ambient_c: f64) -> Self {
        Self {
            engines: (0..engine_count)
                .map(|_| EngineState::with_random_responsiveness(rng, ambient_c))
                .collect(),
        }
    }

    pub fn total_fuel_flow(&self) -> f64 {
        self.engines.iter().map(|e| e.fuel_flow).sum()
    }

    pub fn total_thrust(&self) -> f64 {
        self.engines.iter().map(|e| e.thrust).sum()
    }

    pub fn get_mut(&mut self, engine: usize) -> Option<&mut EngineState> {
        self.engines.get_mut(engine)
    }
}
