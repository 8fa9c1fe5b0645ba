use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-survivable events that end the flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CrashReason {
    /// Touched down faster than the gear can absorb [m/s sink]
    HardLanding { sink_rate: f64 },
    /// Bank angle on the ground large enough to drag a wingtip [deg]
    WingStrike { roll_deg: f64 },
    /// Fuselage reached the ground [m CG height]
    FuselageStrike { height_agl: f64 },
    /// State left the finite domain.
    NumericalFault,
}

impl fmt::Display for CrashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrashReason::HardLanding { sink_rate } => {
                write!(f, "Hard landing: sink rate {:.1} m/s", sink_rate)
            }
            CrashReason::WingStrike { roll_deg } => {
                write!(f, "Wing strike: bank {:.1} deg on the ground", roll_deg)
            }
            CrashReason::FuselageStrike { height_agl } => {
                write!(f, "Fuselage strike: CG {:.2} m above ground", height_agl)
            }
            CrashReason::NumericalFault => write!(f, "Simulation diverged"),
        }
    }
}

/// Terminal crash record. Once set the flight model stops advancing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashReport {
    pub reason: CrashReason,
    /// Human-readable form of `reason`.
    pub message: String,
    pub sim_time: f64,
}

impl CrashReport {
    pub fn new(reason: CrashReason, sim_time: f64) -> Self {
        Self {
            message: reason.to_string(),
            reason,
            sim_time,
        }
    }
}
