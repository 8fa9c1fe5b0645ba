use serde::{Deserialize, Serialize};

use crate::utils::interpolate_table;

/// Linearised stability derivatives plus the high-lift and speedbrake
/// increment tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftAeroCoefficients {
    pub drag: DragCoefficients,
    pub lift: LiftCoefficients,
    pub side_force: SideForceCoefficients,
    pub roll: RollCoefficients,
    pub pitch: PitchCoefficients,
    pub yaw: YawCoefficients,
    pub stall: StallModel,
    /// Flap position -> (ΔCL, ΔCD).
    pub flaps: IncrementTable,
    /// Speedbrake position -> (ΔCL, ΔCD).
    pub speedbrake: IncrementTable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DragCoefficients {
    /// Parasite drag coefficient.
    pub c_d_0: f64,
    /// Oswald span efficiency used for the induced drag factor.
    pub oswald_efficiency: f64,
    /// Drag increment with the gear fully extended.
    pub c_d_gear: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LiftCoefficients {
    /// Lift coefficient at zero angle of attack.
    pub c_l_0: f64,
    /// Lift curve slope (per rad), before Mach correction.
    pub c_l_alpha: f64,
    /// Lift due to elevator (and trim) deflection.
    pub c_l_deltae: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SideForceCoefficients {
    pub c_y_beta: f64,
    pub c_y_deltar: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RollCoefficients {
    /// Dihedral effect.
    pub c_l_beta: f64,
    /// Roll damping.
    pub c_l_p: f64,
    pub c_l_deltaa: f64,
    pub c_l_deltar: f64,
    /// Yaw-rate differential lift, applied as `factor * CL * r̂`.
    pub c_l_r_lift_factor: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PitchCoefficients {
    pub c_m_0: f64,
    pub c_m_alpha: f64,
    /// Pitch damping.
    pub c_m_q: f64,
    pub c_m_deltae: f64,
    /// Nose-down pitching moment per unit flap extension.
    pub c_m_flaps: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YawCoefficients {
    /// Weathercock stability.
    pub c_n_beta: f64,
    /// Yaw damping.
    pub c_n_r: f64,
    pub c_n_deltar: f64,
    /// Adverse yaw from aileron.
    pub c_n_deltaa: f64,
}

/// Sinusoidal lift loss past the stall angle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StallModel {
    /// Angle of attack where lift loss begins (deg).
    pub alpha_stall_deg: f64,
    /// Peak CL removed once fully stalled.
    pub max_lift_loss: f64,
    /// How fast the loss develops per radian past the stall angle.
    pub loss_rate: f64,
}

/// Piecewise-linear `position -> (ΔCL, ΔCD)` table, positions in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementTable(pub Vec<(f64, f64, f64)>);

impl IncrementTable {
    /// Returns `(ΔCL, ΔCD)` for a surface position.
    pub fn lookup(&self, position: f64) -> (f64, f64) {
        interpolate_table(&self.0, position)
    }

    /// Builds a table from `[position, dcl, dcd]` rows, sorting by position.
    /// Returns `None` when fewer than two rows are given.
    pub fn from_rows(rows: &[[f64; 3]]) -> Option<Self> {
        if rows.len() < 2 {
            return None;
        }
        let mut entries: Vec<(f64, f64, f64)> = rows.iter().map(|r| (r[0], r[1], r[2])).collect();
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        Some(Self(entries))
    }

    pub fn a320_flaps() -> Self {
        Self(vec![
            (0.0, 0.0, 0.0),
            (0.25, 0.25, 0.012),
            (0.5, 0.5, 0.025),
            (0.75, 0.8, 0.05),
            (1.0, 1.1, 0.08),
        ])
    }

    pub fn a320_speedbrake() -> Self {
        Self(vec![(0.0, 0.0, 0.0), (0.5, -0.12, 0.02), (1.0, -0.25, 0.05)])
    }
}

impl AircraftAeroCoefficients {
    pub fn a320() -> Self {
        Self {
            drag: DragCoefficients {
                c_d_0: 0.022,
                oswald_efficiency: 0.8,
                c_d_gear: 0.015,
            },
            lift: LiftCoefficients {
                c_l_0: 0.25,
                c_l_alpha: 5.5,
                c_l_deltae: 0.3,
            },
            side_force: SideForceCoefficients {
                c_y_beta: -0.8,
                c_y_deltar: -0.12,
            },
            roll: RollCoefficients {
                c_l_beta: -0.1,
                c_l_p: -0.5,
                c_l_deltaa: 0.12,
                c_l_deltar: 0.01,
                c_l_r_lift_factor: 0.25,
            },
            pitch: PitchCoefficients {
                c_m_0: 0.05,
                c_m_alpha: -1.2,
                c_m_q: -18.0,
                c_m_deltae: -1.3,
                c_m_flaps: -0.05,
            },
            yaw: YawCoefficients {
                c_n_beta: 0.12,
                c_n_r: -0.2,
                c_n_deltar: 0.08,
                c_n_deltaa: -0.005,
            },
            stall: StallModel {
                alpha_stall_deg: 15.0,
                max_lift_loss: 0.8,
                loss_rate: 3.0,
            },
            flaps: IncrementTable::a320_flaps(),
            speedbrake: IncrementTable::a320_speedbrake(),
        }
    }
}

impl Default for AircraftAeroCoefficients {
    fn default() -> Self {
        Self::a320()
    }
}
