use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw pilot (or driver) command for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlInput {
    /// Roll command [-1, 1], positive right wing down.
    pub aileron: f64,
    /// Pitch command [-1, 1], positive nose down.
    pub elevator: f64,
    /// Yaw command [-1, 1], positive nose right.
    pub rudder: f64,
    /// Direct trim setting [-1, 1]; leaves trim untouched when absent.
    pub trim: Option<f64>,
    /// Per-engine throttle [-1, 1], negative selects reverse on the ground.
    /// Engines past the end of the list reuse the last entry.
    pub throttle: Vec<f64>,
    pub flaps: f64,
    /// Gear lever, 1 = down.
    pub gear: f64,
    pub brakes: f64,
    pub speedbrake: f64,
}

impl Default for ControlInput {
    fn default() -> Self {
        Self {
            aileron: 0.0,
            elevator: 0.0,
            rudder: 0.0,
            trim: None,
            throttle: Vec::new(),
            flaps: 0.0,
            gear: 1.0,
            brakes: 0.0,
            speedbrake: 0.0,
        }
    }
}

impl ControlInput {
    pub fn throttle_for(&self, engine: usize) -> f64 {
        self.throttle
            .get(engine)
            .or_else(|| self.throttle.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Same throttle on every engine.
    pub fn with_throttle(mut self, throttle: f64) -> Self {
        self.throttle = vec![throttle];
        self
    }

    pub fn with_flaps(mut self, flaps: f64) -> Self {
        self.flaps = flaps;
        self
    }
}

/// Surfaces that can be jammed by a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ControlAxis {
    Aileron,
    Elevator,
    Rudder,
    Flaps,
    Speedbrake,
}

impl ControlAxis {
    /// Travel limits of the surface.
    pub fn range(self) -> (f64, f64) {
        match self {
            ControlAxis::Aileron | ControlAxis::Elevator | ControlAxis::Rudder => (-1.0, 1.0),
            ControlAxis::Flaps | ControlAxis::Speedbrake => (0.0, 1.0),
        }
    }

    pub fn contains(self, position: f64) -> bool {
        let (lo, hi) = self.range();
        position.is_finite() && (lo..=hi).contains(&position)
    }

    /// Clamps `position` into travel; `None` for a non-finite position.
    pub fn clamp(self, position: f64) -> Option<f64> {
        let (lo, hi) = self.range();
        position.is_finite().then(|| position.clamp(lo, hi))
    }
}

/// Clamped per-axis targets the smoothed state is driven toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlTargets {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
    /// New trim setting, if the input carried one.
    pub trim: Option<f64>,
    pub throttle: Vec<f64>,
    pub flaps: f64,
    pub gear: f64,
    pub brakes: f64,
    pub speedbrake: f64,
}

impl ControlTargets {
    pub fn from_input(input: &ControlInput, engine_count: usize) -> Self {
        Self {
            aileron: finite_clamp(input.aileron, -1.0, 1.0),
            elevator: finite_clamp(input.elevator, -1.0, 1.0),
            rudder: finite_clamp(input.rudder, -1.0, 1.0),
            trim: input.trim.map(|t| finite_clamp(t, -1.0, 1.0)),
            throttle: (0..engine_count)
                .map(|i| finite_clamp(input.throttle_for(i), -1.0, 1.0))
                .collect(),
            flaps: finite_clamp(input.flaps, 0.0, 1.0),
            gear: finite_clamp(input.gear, 0.0, 1.0),
            brakes: finite_clamp(input.brakes, 0.0, 1.0),
            speedbrake: finite_clamp(input.speedbrake, 0.0, 1.0),
        }
    }
}

fn finite_clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        0.0_f64.clamp(min, max)
    }
}

/// Hydraulic authority available to each powered surface, 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceEffectiveness {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
}

impl Default for SurfaceEffectiveness {
    fn default() -> Self {
        Self {
            aileron: 1.0,
            elevator: 1.0,
            rudder: 1.0,
        }
    }
}

/// Deflections as the aerodynamic model sees them: effectiveness applied and
/// trim folded into the elevator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceDeflections {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
    pub flaps: f64,
    pub speedbrake: f64,
    pub gear: f64,
}

/// Smoothed actuator positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
    pub trim: f64,
    pub throttle: Vec<f64>,
    pub flaps: f64,
    pub gear: f64,
    pub brakes: f64,
    pub speedbrake: f64,
    /// Jammed surfaces and the position they are held at.
    pub stuck: BTreeMap<ControlAxis, f64>,
    pub effectiveness: SurfaceEffectiveness,
}

impl ControlState {
    pub fn new(engine_count: usize) -> Self {
        Self {
            aileron: 0.0,
            elevator: 0.0,
            rudder: 0.0,
            trim: 0.0,
            throttle: vec![0.0; engine_count],
            flaps: 0.0,
            gear: 1.0,
            brakes: 0.0,
            speedbrake: 0.0,
            stuck: BTreeMap::new(),
            effectiveness: SurfaceEffectiveness::default(),
        }
    }

    pub fn position(&self, axis: ControlAxis) -> f64 {
        match axis {
            ControlAxis::Aileron => self.aileron,
            ControlAxis::Elevator => self.elevator,
            ControlAxis::Rudder => self.rudder,
            ControlAxis::Flaps => self.flaps,
            ControlAxis::Speedbrake => self.speedbrake,
        }
    }

    pub fn gear_down_locked(&self, threshold: f64) -> bool {
        self.gear >= threshold
    }

    pub fn effective_surfaces(&self) -> SurfaceDeflections {
        let e = &self.effectiveness;
        SurfaceDeflections {
            aileron: self.aileron * e.aileron,
            elevator: (self.elevator * e.elevator + self.trim).clamp(-1.0, 1.0),
            rudder: self.rudder * e.rudder,
            flaps: self.flaps,
            speedbrake: self.speedbrake,
            gear: self.gear,
        }
    }
}
