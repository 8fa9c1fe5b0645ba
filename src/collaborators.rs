//! Seams to the aircraft systems that live outside the flight model.
//!
//! The flight model asks a [`SystemsLogic`] for hydraulic, pneumatic,
//! electrical and fuel availability each frame, and a [`FailureHandler`] for
//! failure effects to inject. Both have simple defaults so the model runs
//! standalone.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::{ControlAxis, SurfaceEffectiveness};
use crate::sim::OutputState;

/// Pump output pressure when the driving engine turns fast enough [psi]
pub const NOMINAL_HYDRAULIC_PSI: f64 = 3000.0;
/// Core speed needed to drive an engine pump [% N2]
pub const PUMP_MIN_N2: f64 = 40.0;
/// Core speed needed to keep a generator online [% N2]
pub const GENERATOR_MIN_N2: f64 = 50.0;
/// Bleed duct pressure delivered to an open starter valve by the APU [psi]
pub const APU_DUCT_PSI: f64 = 35.0;

/// Read-only view of the airframe handed to the systems logic.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemsContext {
    pub engine_n2: Vec<f64>,
    pub engine_running: Vec<bool>,
    pub fuel_mass: f64,
    pub on_ground: bool,
}

/// Availability flags and pressures the flight model consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemsState {
    /// One hydraulic circuit per engine-driven pump [psi]
    pub hydraulic_pressure_psi: Vec<f64>,
    pub hydraulic_failed: Vec<bool>,
    /// Bleed pressure at each engine's starter [psi]
    pub duct_pressure_psi: Vec<f64>,
    pub starter_valve_open: Vec<bool>,
    pub apu_bleed: bool,
    pub fuel_available: Vec<bool>,
    pub ignition: bool,
    pub generator_online: Vec<bool>,
    pub generator_failed: Vec<bool>,
}

impl SystemsState {
    pub fn new(engine_count: usize) -> Self {
        Self {
            hydraulic_pressure_psi: vec![NOMINAL_HYDRAULIC_PSI; engine_count],
            hydraulic_failed: vec![false; engine_count],
            duct_pressure_psi: vec![0.0; engine_count],
            starter_valve_open: vec![false; engine_count],
            apu_bleed: false,
            fuel_available: vec![true; engine_count],
            ignition: true,
            generator_online: vec![true; engine_count],
            generator_failed: vec![false; engine_count],
        }
    }

    /// Surface authority from the best remaining hydraulic circuit.
    pub fn surface_effectiveness(&self) -> SurfaceEffectiveness {
        let best = self
            .hydraulic_pressure_psi
            .iter()
            .copied()
            .fold(0.0_f64, f64::max);
        let authority = (best / NOMINAL_HYDRAULIC_PSI).clamp(0.0, 1.0);
        SurfaceEffectiveness {
            aileron: authority,
            elevator: authority,
            rudder: authority,
        }
    }

    pub fn fuel_available_for(&self, engine: usize) -> bool {
        self.fuel_available.get(engine).copied().unwrap_or(false)
    }

    pub fn duct_pressure_for(&self, engine: usize) -> f64 {
        self.duct_pressure_psi.get(engine).copied().unwrap_or(0.0)
    }
}

/// Overhead systems bookkeeping.
pub trait SystemsLogic {
    fn update(&mut self, context: &SystemsContext, state: &mut SystemsState, dt: f64);
}

/// Engine-driven pumps and generators, APU bleed to open starter valves,
/// fuel available while the tanks are not empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSystemsLogic;

impl SystemsLogic for DefaultSystemsLogic {
    fn update(&mut self, context: &SystemsContext, state: &mut SystemsState, _dt: f64) {
        for (i, n2) in context.engine_n2.iter().enumerate() {
            if let Some(pressure) = state.hydraulic_pressure_psi.get_mut(i) {
                let failed = state.hydraulic_failed.get(i).copied().unwrap_or(false);
                *pressure = if *n2 > PUMP_MIN_N2 && !failed {
                    NOMINAL_HYDRAULIC_PSI
                } else {
                    0.0
                };
            }
            if let Some(online) = state.generator_online.get_mut(i) {
                let failed = state.generator_failed.get(i).copied().unwrap_or(false);
                *online = *n2 > GENERATOR_MIN_N2 && !failed;
            }
        }

        for (duct, open) in state
            .duct_pressure_psi
            .iter_mut()
            .zip(&state.starter_valve_open)
        {
            *duct = if state.apu_bleed && *open {
                APU_DUCT_PSI
            } else {
                0.0
            };
        }

        let has_fuel = context.fuel_mass > 0.0;
        for available in state.fuel_available.iter_mut() {
            *available = has_fuel;
        }
    }
}

/// Failure effects the flight model knows how to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FailureEffect {
    EngineFailure { engine: usize },
    EngineRestore { engine: usize },
    EgtOffset { engine: usize, offset_c: f64 },
    /// Jams a surface; `None` freezes it where it is.
    StuckControl { axis: ControlAxis, position: Option<f64> },
    ReleaseControl { axis: ControlAxis },
    HydraulicLoss { system: usize },
    GeneratorLoss { engine: usize },
    FuelLeak { rate_kg_s: f64 },
}

/// Decides which failures to inject, given last frame's output.
pub trait FailureHandler {
    fn evaluate(&mut self, output: &OutputState, dt: f64) -> Vec<FailureEffect>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoFailures;

impl FailureHandler for NoFailures {
    fn evaluate(&mut self, _output: &OutputState, _dt: f64) -> Vec<FailureEffect> {
        Vec::new()
    }
}

/// Fires each effect once when simulation time passes its trigger.
#[derive(Debug, Clone, Default)]
pub struct ScheduledFailures {
    pending: Vec<(f64, FailureEffect)>,
}

impl ScheduledFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, sim_time: f64, effect: FailureEffect) -> Self {
        self.pending.push((sim_time, effect));
        self
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FailureHandler for ScheduledFailures {
    fn evaluate(&mut self, output: &OutputState, _dt: f64) -> Vec<FailureEffect> {
        let now = output.sim_time;
        let (due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(t, _)| *t <= now);
        self.pending = pending;
        due.into_iter()
            .map(|(t, effect)| {
                info!(trigger = t, sim_time = now, ?effect, "scheduled failure fired");
                effect
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context(n2: Vec<f64>, fuel: f64) -> SystemsContext {
        SystemsContext {
            engine_running: n2.iter().map(|n| *n > 50.0).collect(),
            engine_n2: n2,
            fuel_mass: fuel,
            on_ground: true,
        }
    }

    #[test]
    fn test_pumps_follow_engines() {
        let mut logic = DefaultSystemsLogic;
        let mut state = SystemsState::new(2);
        logic.update(&context(vec![60.0, 0.0], 5_000.0), &mut state, 0.05);

        assert_eq!(state.hydraulic_pressure_psi, vec![3000.0, 0.0]);
        assert_eq!(state.generator_online, vec![true, false]);
        assert_eq!(state.surface_effectiveness().elevator, 1.0);

        state.hydraulic_failed[0] = true;
        logic.update(&context(vec![60.0, 0.0], 5_000.0), &mut state, 0.05);
        assert_eq!(state.surface_effectiveness().aileron, 0.0);
    }

    #[test]
    fn test_apu_bleed_feeds_open_starters() {
        let mut logic = DefaultSystemsLogic;
        let mut state = SystemsState::new(2);
        state.apu_bleed = true;
        state.starter_valve_open[1] = true;
        logic.update(&context(vec![0.0, 0.0], 5_000.0), &mut state, 0.05);
        assert_eq!(state.duct_pressure_psi, vec![0.0, APU_DUCT_PSI]);
    }

    #[test]
    fn test_empty_tanks_cut_fuel() {
        let mut logic = DefaultSystemsLogic;
        let mut state = SystemsState::new(2);
        logic.update(&context(vec![60.0, 60.0], 0.0), &mut state, 0.05);
        assert!(!state.fuel_available_for(0));
        assert!(!state.fuel_available_for(7));
    }

    #[test]
    fn test_scheduled_failures_fire_once() {
        let mut handler = ScheduledFailures::new()
            .at(1.0, FailureEffect::EngineFailure { engine: 0 })
            .at(5.0, FailureEffect::FuelLeak { rate_kg_s: 1.0 });

        let mut output = OutputState::default();
        output.sim_time = 0.5;
        assert!(handler.evaluate(&output, 0.05).is_empty());

        output.sim_time = 1.0;
        assert_eq!(
            handler.evaluate(&output, 0.05),
            vec![FailureEffect::EngineFailure { engine: 0 }]
        );
        assert!(handler.evaluate(&output, 0.05).is_empty());
        assert_eq!(handler.pending(), 1);
    }

    #[test]
    fn test_failure_effect_json_is_tagged() {
        let effect: FailureEffect = serde_json::from_str(
            r#"{"type":"StuckControl","axis":"Elevator","position":0.2}"#,
        )
        .unwrap();
        assert_eq!(
            effect,
            FailureEffect::StuckControl {
                axis: ControlAxis::Elevator,
                position: Some(0.2)
            }
        );
    }
}
