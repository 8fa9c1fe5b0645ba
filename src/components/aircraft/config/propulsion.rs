use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Turbofan performance and spool-dynamics parameters shared by every engine
/// on the airframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSpec {
    /// Static sea-level thrust at 100% N1 (N).
    pub max_thrust: f64,
    /// Core speed at idle (% N2).
    pub idle_n2: f64,
    /// Core speed at full forward throttle (% N2).
    pub max_n2: f64,
    /// Core speed ceiling in reverse (% N2).
    pub reverse_max_n2: f64,
    /// Fan speed below which thrust is zero (% N1).
    pub min_n1: f64,
    /// Reverse thrust at the reverse ceiling, as a fraction of max thrust.
    pub max_reverse_fraction: f64,
    /// N2 time constants (s), before the responsiveness multiplier.
    pub spool_up_tau: f64,
    pub spool_down_tau: f64,
    pub starter_tau: f64,
    pub shutdown_tau: f64,
    /// N1 lag behind its N2-derived target (s).
    pub n1_tau: f64,
    /// N2 reached by starter motoring alone (%).
    pub starter_n2: f64,
    /// Duct pressure needed to turn the starter (psi).
    pub starter_min_duct_psi: f64,
    /// N2 above which fuel and ignition light the engine (%).
    pub lightoff_n2: f64,
    /// Thrust-specific fuel consumption (kg/s per N).
    pub tsfc: f64,
    /// Fuel flow floor while burning (kg/s).
    pub idle_fuel_flow: f64,
    pub fuel_flow_tau: f64,
    /// EGT above OAT at idle (°C).
    pub egt_idle_rise: f64,
    /// EGT rise per % N2 above idle (°C).
    pub egt_per_n2: f64,
    pub egt_tau: f64,
}

impl EngineSpec {
    /// CFM56-class numbers.
    pub fn cfm56() -> Self {
        Self {
            max_thrust: 120_000.0,
            idle_n2: 60.0,
            max_n2: 100.0,
            reverse_max_n2: 85.0,
            min_n1: 20.0,
            max_reverse_fraction: 0.35,
            spool_up_tau: 2.5,
            spool_down_tau: 1.8,
            starter_tau: 6.0,
            shutdown_tau: 3.0,
            n1_tau: 0.8,
            starter_n2: 25.0,
            starter_min_duct_psi: 20.0,
            lightoff_n2: 15.0,
            tsfc: 1.7e-5,
            idle_fuel_flow: 0.1,
            fuel_flow_tau: 1.0,
            egt_idle_rise: 400.0,
            egt_per_n2: 7.5,
            egt_tau: 3.0,
        }
    }
}

impl Default for EngineSpec {
    fn default() -> Self {
        Self::cfm56()
    }
}

/// One installed engine: its spec and where its thrust acts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub spec: EngineSpec,
    /// Thrust application point relative to the CG, body frame (m).
    pub position: Vector3<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropulsionConfig {
    pub engines: Vec<EngineConfig>,
}

impl PropulsionConfig {
    /// Engines slung under the wing, laid out from the span.
    ///
    /// Inboard pairs sit at 32% of the semi-span, outboard pairs at 60%;
    /// an odd engine goes on the centreline.
    pub fn default_layout(spec: &EngineSpec, count: usize, wing_span: f64) -> Self {
        let semi_span = wing_span / 2.0;
        let lateral: Vec<f64> = match count {
            0 => Vec::new(),
            1 => vec![0.0],
            2 => vec![-0.32 * semi_span, 0.32 * semi_span],
            3 => vec![-0.32 * semi_span, 0.0, 0.32 * semi_span],
            _ => vec![
                -0.6 * semi_span,
                -0.32 * semi_span,
                0.32 * semi_span,
                0.6 * semi_span,
            ],
        };

        Self {
            engines: lateral
                .into_iter()
                .map(|y| EngineConfig {
                    spec: spec.clone(),
                    position: Vector3::new(1.0, y, 1.0),
                })
                .collect(),
        }
    }

    pub fn engine_count(&self) -> usize {
        self.engines.len()
    }

    pub fn a320() -> Self {
        Self::default_layout(&EngineSpec::cfm56(), 2, 35.8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_layout_is_symmetric() {
        let twin = PropulsionConfig::default_layout(&EngineSpec::cfm56(), 2, 35.8);
        assert_eq!(twin.engine_count(), 2);
        assert_relative_eq!(twin.engines[0].position.y, -twin.engines[1].position.y);
        assert_relative_eq!(twin.engines[1].position.y, 0.32 * 17.9);

        let quad = PropulsionConfig::default_layout(&EngineSpec::cfm56(), 4, 60.0);
        let sum: f64 = quad.engines.iter().map(|e| e.position.y).sum();
        assert_relative_eq!(sum, 0.0, epsilon = 1e-12);

        let single = PropulsionConfig::default_layout(&EngineSpec::cfm56(), 1, 10.0);
        assert_eq!(single.engines[0].position.y, 0.0);
    }
}
