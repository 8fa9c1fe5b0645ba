use tracing::{info, warn};

use crate::collaborators::{FailureEffect, SystemsState};
use crate::components::{ControlState, PropulsionState};

/// Mutable parts of the flight model a failure effect can reach.
pub struct FailureTargets<'a> {
    pub propulsion: &'a mut PropulsionState,
    pub controls: &'a mut ControlState,
    pub systems: &'a mut SystemsState,
    /// Extra fuel drain on top of engine burn [kg/s]
    pub fuel_leak_rate: &'a mut f64,
}

/// Single dispatcher for every failure effect. Returns `false` when the
/// effect names an engine or circuit the aircraft does not have.
pub fn apply_failure_effect(effect: &FailureEffect, targets: FailureTargets<'_>) -> bool {
    let FailureTargets {
        propulsion,
        controls,
        systems,
        fuel_leak_rate,
    } = targets;

    let applied = match effect {
        FailureEffect::EngineFailure { engine } => propulsion
            .get_mut(*engine)
            .map(|e| e.failed = true)
            .is_some(),
        FailureEffect::EngineRestore { engine } => propulsion
            .get_mut(*engine)
            .map(|e| e.failed = false)
            .is_some(),
        FailureEffect::EgtOffset { engine, offset_c } => propulsion
            .get_mut(*engine)
            .map(|e| e.egt_offset = *offset_c)
            .is_some(),
        FailureEffect::StuckControl { axis, position } => {
            let current = controls.position(*axis);
            let at = position
                .and_then(|p| (*axis).clamp(p))
                .or_else(|| (*axis).clamp(current))
                .unwrap_or(0.0);
            controls.stuck.insert(*axis, at);
            true
        }
        FailureEffect::ReleaseControl { axis } => {
            controls.stuck.remove(axis);
            true
        }
        FailureEffect::HydraulicLoss { system } => systems
            .hydraulic_failed
            .get_mut(*system)
            .map(|f| *f = true)
            .is_some(),
        FailureEffect::GeneratorLoss { engine } => systems
            .generator_failed
            .get_mut(*engine)
            .map(|f| *f = true)
            .is_some(),
        FailureEffect::FuelLeak { rate_kg_s } => {
            *fuel_leak_rate = rate_kg_s.max(0.0);
            true
        }
    };

    if applied {
        info!(?effect, "failure effect applied");
    } else {
        warn!(?effect, "failure effect ignored: no such engine or system");
    }
    applied
}
