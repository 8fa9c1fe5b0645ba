use tracing::{debug, info};

use crate::components::{
    EngineConfig, EnginePhase, EngineSpec, EngineState, Force, ForceCategory, PhysicsComponent,
    PropulsionState, ReferenceFrame,
};
use crate::utils::first_order_lag;
use nalgebra::Vector3;

/// Run-down time constants for a failed engine [s]
const FAILED_N2_TAU: f64 = 1.5;
const FAILED_N1_TAU: f64 = 0.6;
const FAILED_FUEL_FLOW_TAU: f64 = 0.5;
/// Spool speeds snap to zero below this [%]
const SPOOL_SNAP: f64 = 1.0;
const FUEL_FLOW_SNAP: f64 = 1e-3;

/// Ambient and systems conditions seen by one engine for one sub-step.
#[derive(Debug, Clone, Copy)]
pub struct EngineConditions {
    /// rho / rho0
    pub density_ratio: f64,
    pub mach: f64,
    /// Outside air temperature [°C]
    pub oat_c: f64,
    pub fuel_available: bool,
    pub ignition: bool,
    /// Bleed duct pressure at the starter [psi]
    pub duct_pressure_psi: f64,
}

/// Fraction of static thrust produced at a given N1, `ramp^2.5`.
pub fn thrust_factor(spec: &EngineSpec, n1: f64) -> f64 {
    let ramp = ((n1 - spec.min_n1) / (100.0 - spec.min_n1)).clamp(0.0, 1.0);
    ramp.powf(2.5)
}

/// Steady-state N1 for a given N2.
fn n1_for(n2: f64) -> f64 {
    n2 * n2 / 100.0
}

/// Advances one engine by `dt`: phase transitions, spool lags, thrust, fuel
/// flow and EGT. `engine.throttle` and `engine.reverse` must already hold
/// this frame's command.
pub fn update_engine(
    engine: &mut EngineState,
    spec: &EngineSpec,
    conditions: &EngineConditions,
    dt: f64,
) {
    if engine.failed {
        run_down_failed(engine, dt);
    } else {
        update_phase(engine, spec, conditions);
        let (target_n2, tau) = n2_target(engine, spec, conditions);
        engine.n2 = first_order_lag(engine.n2, target_n2, dt, tau);
        engine.n1 = first_order_lag(
            engine.n1,
            n1_for(engine.n2),
            dt,
            spec.n1_tau / engine.responsiveness,
        );
    }

    engine.thrust = calculate_thrust(engine, spec, conditions);

    if !engine.failed {
        let target_flow = if engine.phase == EnginePhase::Running {
            spec.idle_fuel_flow + spec.tsfc * engine.thrust.abs()
        } else {
            0.0
        };
        engine.fuel_flow = first_order_lag(engine.fuel_flow, target_flow, dt, spec.fuel_flow_tau);
    }

    let target_egt = if engine.phase == EnginePhase::Running {
        conditions.oat_c
            + spec.egt_idle_rise
            + spec.egt_per_n2 * (engine.n2 - spec.idle_n2)
            + engine.egt_offset
    } else {
        conditions.oat_c + engine.egt_offset
    };
    engine.egt = first_order_lag(engine.egt, target_egt, dt, spec.egt_tau);
}

fn run_down_failed(engine: &mut EngineState, dt: f64) {
    engine.n2 = first_order_lag(engine.n2, 0.0, dt, FAILED_N2_TAU);
    engine.n1 = first_order_lag(engine.n1, n1_for(engine.n2), dt, FAILED_N1_TAU);
    if engine.n2 < SPOOL_SNAP {
        engine.n2 = 0.0;
    }
    if engine.n1 < SPOOL_SNAP {
        engine.n1 = 0.0;
    }
    engine.fuel_flow = first_order_lag(engine.fuel_flow, 0.0, dt, FAILED_FUEL_FLOW_TAU);
    if engine.fuel_flow < FUEL_FLOW_SNAP {
        engine.fuel_flow = 0.0;
    }
    engine.phase = EnginePhase::Off;
}

fn update_phase(engine: &mut EngineState, spec: &EngineSpec, conditions: &EngineConditions) {
    let starter_turning = conditions.duct_pressure_psi >= spec.starter_min_duct_psi;

    if engine.phase == EnginePhase::Running && !conditions.fuel_available {
        info!(n2 = engine.n2, "engine flamed out: fuel starvation");
        engine.phase = EnginePhase::Off;
    }
    if engine.phase == EnginePhase::Off && starter_turning {
        debug!("starter engaged");
        engine.phase = EnginePhase::Starting;
    }
    if engine.phase == EnginePhase::Starting
        && engine.n2 > spec.lightoff_n2
        && conditions.fuel_available
        && conditions.ignition
    {
        info!(n2 = engine.n2, "engine light-off");
        engine.phase = EnginePhase::Running;
    }
}

/// N2 target and time constant for the current phase and command.
fn n2_target(engine: &EngineState, spec: &EngineSpec, conditions: &EngineConditions) -> (f64, f64) {
    match engine.phase {
        EnginePhase::Running => {
            let target = if engine.reverse {
                spec.idle_n2 + engine.throttle.abs() * (spec.reverse_max_n2 - spec.idle_n2)
            } else {
                spec.idle_n2 + engine.throttle.clamp(0.0, 1.0) * (spec.max_n2 - spec.idle_n2)
            };
            let tau = if target > engine.n2 {
                spec.spool_up_tau
            } else {
                spec.spool_down_tau
            };
            (target, tau / engine.responsiveness)
        }
        EnginePhase::Starting => {
            let target = if conditions.duct_pressure_psi >= spec.starter_min_duct_psi {
                spec.starter_n2
            } else {
                0.0
            };
            (target, spec.starter_tau / engine.responsiveness)
        }
        EnginePhase::Off => (0.0, spec.shutdown_tau),
    }
}

/// Thrust along body x [N], negative in reverse.
pub fn calculate_thrust(
    engine: &EngineState,
    spec: &EngineSpec,
    conditions: &EngineConditions,
) -> f64 {
    let lapse = conditions.density_ratio.max(0.0).powf(0.7) * (1.0 - 0.2 * conditions.mach);
    let forward = thrust_factor(spec, engine.n1) * lapse;

    let fraction = if engine.reverse && !engine.failed {
        let reverse_ceiling = thrust_factor(spec, n1_for(spec.reverse_max_n2));
        if reverse_ceiling > 0.0 {
            -forward * spec.max_reverse_fraction / reverse_ceiling
        } else {
            0.0
        }
    } else {
        forward
    };
    spec.max_thrust * fraction
}

/// Puts a running engine straight into steady state at `throttle`, used when
/// spawning with engines already turning.
pub fn settle_engine(
    engine: &mut EngineState,
    spec: &EngineSpec,
    throttle: f64,
    conditions: &EngineConditions,
) {
    engine.failed = false;
    engine.reverse = false;
    engine.phase = EnginePhase::Running;
    engine.throttle = throttle.clamp(0.0, 1.0);
    engine.n2 = spec.idle_n2 + engine.throttle * (spec.max_n2 - spec.idle_n2);
    engine.n1 = n1_for(engine.n2);
    engine.thrust = calculate_thrust(engine, spec, conditions);
    engine.fuel_flow = spec.idle_fuel_flow + spec.tsfc * engine.thrust.abs();
    engine.egt = conditions.oat_c
        + spec.egt_idle_rise
        + spec.egt_per_n2 * (engine.n2 - spec.idle_n2)
        + engine.egt_offset;
}

/// Pushes each engine's thrust, acting at its mount point, onto the accumulator.
pub fn apply_thrust_forces(
    physics: &mut PhysicsComponent,
    propulsion: &PropulsionState,
    engines: &[EngineConfig],
) {
    for (state, config) in propulsion.engines.iter().zip(engines) {
        physics.add_force(Force {
            vector: Vector3::new(state.thrust, 0.0, 0.0),
            point: Some(config.position),
            frame: ReferenceFrame::Body,
            category: ForceCategory::Propulsive,
        });
    }
}
