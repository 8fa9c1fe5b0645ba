use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::components::aircraft::config::{
    AircraftAeroCoefficients, AircraftGeometry, ConfigError, EngineConfig, EngineSpec, GearConfig,
    GearLeg, IncrementTable, MassModel, PropulsionConfig, RawAircraftConfig,
};
use crate::utils::MAX_ENGINES;

/// The full aircraft configuration. Immutable once built: every derived
/// quantity (chord, aspect ratio, engine layout) is resolved here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftConfig {
    /// Name of the aircraft.
    pub name: String,
    /// Mass and inertia properties.
    pub mass: MassModel,
    /// Wing geometry.
    pub geometry: AircraftGeometry,
    /// Aerodynamic coefficients for calculating forces and moments.
    pub aero_coef: AircraftAeroCoefficients,
    /// Installed engines.
    pub propulsion: PropulsionConfig,
    /// Landing gear legs and tyre friction.
    pub gear: GearConfig,
}

impl Default for AircraftConfig {
    /// The A320-class configuration is chosen as the default for convenience.
    fn default() -> Self {
        Self::a320()
    }
}

/// Tracks which raw parameters were absent so they can be reported together.
struct Defaults {
    missing: Vec<&'static str>,
}

impl Defaults {
    fn positive(&mut self, value: Option<f64>, default: f64, name: &'static str) -> f64 {
        match value {
            Some(v) if v.is_finite() && v > 0.0 => v,
            _ => {
                self.missing.push(name);
                default
            }
        }
    }

    fn finite(&mut self, value: Option<f64>, default: f64, name: &'static str) -> f64 {
        match value {
            Some(v) if v.is_finite() => v,
            _ => {
                self.missing.push(name);
                default
            }
        }
    }
}

impl AircraftConfig {
    pub fn a320() -> Self {
        Self {
            name: "A320".to_string(),
            mass: MassModel::a320(),
            geometry: AircraftGeometry::a320(),
            aero_coef: AircraftAeroCoefficients::a320(),
            propulsion: PropulsionConfig::a320(),
            gear: GearConfig::a320(),
        }
    }

    pub fn engine_count(&self) -> usize {
        self.propulsion.engine_count()
    }

    /// Reads a YAML aircraft description from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw = RawAircraftConfig::from_yaml_str(contents)?;
        Self::from_raw(raw)
    }

    /// Converts a raw configuration into the structured form.
    ///
    /// Missing or non-physical parameters are replaced by the A320 defaults
    /// and reported once through `tracing`. The only hard failure is an engine
    /// count outside `1..=MAX_ENGINES`, which is checked here and never again.
    pub fn from_raw(raw: RawAircraftConfig) -> Result<Self, ConfigError> {
        let base = Self::a320();
        let mut d = Defaults {
            missing: Vec::new(),
        };

        let name = raw.name.clone().unwrap_or_else(|| {
            d.missing.push("name");
            base.name.clone()
        });

        let wing_area = d.positive(raw.wing_area, base.geometry.wing_area, "wing_area");
        let wing_span = d.positive(raw.wing_span, base.geometry.wing_span, "wing_span");
        let mac = raw.mac.filter(|m| m.is_finite() && *m > 0.0);
        let geometry = AircraftGeometry::new(wing_area, wing_span, mac);

        let bm = &base.mass;
        let fuel_capacity = d.positive(raw.fuel_capacity, bm.fuel_capacity, "fuel_capacity");
        let mass = MassModel::new(
            d.positive(raw.empty_mass, bm.empty_mass, "empty_mass"),
            raw.payload.filter(|p| p.is_finite() && *p >= 0.0).unwrap_or(bm.default_payload),
            fuel_capacity,
            raw.fuel
                .filter(|f| f.is_finite() && *f >= 0.0)
                .unwrap_or(bm.default_fuel.min(fuel_capacity)),
            d.positive(raw.ixx, bm.ixx, "ixx"),
            d.positive(raw.iyy, bm.iyy, "iyy"),
            d.positive(raw.izz, bm.izz, "izz"),
        );

        let mut aero = base.aero_coef.clone();
        aero.lift.c_l_0 = d.finite(raw.c_L_0, aero.lift.c_l_0, "c_L_0");
        aero.lift.c_l_alpha = d.positive(raw.c_L_alpha, aero.lift.c_l_alpha, "c_L_alpha");
        aero.lift.c_l_deltae = d.finite(raw.c_L_deltae, aero.lift.c_l_deltae, "c_L_deltae");
        aero.drag.c_d_0 = d.positive(raw.c_D_0, aero.drag.c_d_0, "c_D_0");
        aero.drag.oswald_efficiency = d.positive(
            raw.oswald_efficiency,
            aero.drag.oswald_efficiency,
            "oswald_efficiency",
        );
        aero.drag.c_d_gear = d.finite(raw.c_D_gear, aero.drag.c_d_gear, "c_D_gear");
        aero.side_force.c_y_beta = d.finite(raw.c_Y_beta, aero.side_force.c_y_beta, "c_Y_beta");
        aero.side_force.c_y_deltar =
            d.finite(raw.c_Y_deltar, aero.side_force.c_y_deltar, "c_Y_deltar");
        aero.pitch.c_m_0 = d.finite(raw.c_m_0, aero.pitch.c_m_0, "c_m_0");
        aero.pitch.c_m_alpha = d.finite(raw.c_m_alpha, aero.pitch.c_m_alpha, "c_m_alpha");
        aero.pitch.c_m_q = d.finite(raw.c_m_q, aero.pitch.c_m_q, "c_m_q");
        aero.pitch.c_m_deltae = d.finite(raw.c_m_deltae, aero.pitch.c_m_deltae, "c_m_deltae");
        aero.pitch.c_m_flaps = d.finite(raw.c_m_flaps, aero.pitch.c_m_flaps, "c_m_flaps");
        aero.roll.c_l_beta = d.finite(raw.c_l_beta, aero.roll.c_l_beta, "c_l_beta");
        aero.roll.c_l_p = d.finite(raw.c_l_p, aero.roll.c_l_p, "c_l_p");
        aero.roll.c_l_deltaa = d.finite(raw.c_l_deltaa, aero.roll.c_l_deltaa, "c_l_deltaa");
        aero.roll.c_l_deltar = d.finite(raw.c_l_deltar, aero.roll.c_l_deltar, "c_l_deltar");
        aero.yaw.c_n_beta = d.finite(raw.c_n_beta, aero.yaw.c_n_beta, "c_n_beta");
        aero.yaw.c_n_r = d.finite(raw.c_n_r, aero.yaw.c_n_r, "c_n_r");
        aero.yaw.c_n_deltar = d.finite(raw.c_n_deltar, aero.yaw.c_n_deltar, "c_n_deltar");
        aero.yaw.c_n_deltaa = d.finite(raw.c_n_deltaa, aero.yaw.c_n_deltaa, "c_n_deltaa");
        aero.stall.alpha_stall_deg = d.positive(
            raw.alpha_stall_deg,
            aero.stall.alpha_stall_deg,
            "alpha_stall_deg",
        );
        if let Some(table) = raw.flap_table.as_deref().and_then(IncrementTable::from_rows) {
            aero.flaps = table;
        }
        if let Some(table) = raw
            .speedbrake_table
            .as_deref()
            .and_then(IncrementTable::from_rows)
        {
            aero.speedbrake = table;
        }

        let propulsion = Self::propulsion_from_raw(&raw, &geometry, &mut d)?;
        let gear = Self::gear_from_raw(&raw, &base.gear);

        if !d.missing.is_empty() {
            warn!(
                aircraft = %name,
                defaulted = ?d.missing,
                "Aircraft config incomplete, using default values"
            );
        }
        info!(
            aircraft = %name,
            engines = propulsion.engine_count(),
            "Aircraft configuration built"
        );

        Ok(Self {
            name,
            mass,
            geometry,
            aero_coef: aero,
            propulsion,
            gear,
        })
    }

    fn propulsion_from_raw(
        raw: &RawAircraftConfig,
        geometry: &AircraftGeometry,
        d: &mut Defaults,
    ) -> Result<PropulsionConfig, ConfigError> {
        let count = raw
            .engine_count
            .or_else(|| raw.engine_positions.as_ref().map(|p| p.len()))
            .unwrap_or(2);

        if count == 0 || count > MAX_ENGINES {
            return Err(ConfigError::ValidationError(format!(
                "engine count {} outside 1..={}",
                count, MAX_ENGINES
            )));
        }

        let mut spec = EngineSpec::cfm56();
        spec.max_thrust = d.positive(raw.max_thrust, spec.max_thrust, "max_thrust");

        match &raw.engine_positions {
            Some(positions) if positions.len() == count => Ok(PropulsionConfig {
                engines: positions
                    .iter()
                    .map(|p| EngineConfig {
                        spec: spec.clone(),
                        position: Vector3::new(p[0], p[1], p[2]),
                    })
                    .collect(),
            }),
            Some(positions) => {
                warn!(
                    given = positions.len(),
                    engines = count,
                    "Engine position count mismatch, deriving layout from span"
                );
                Ok(PropulsionConfig::default_layout(
                    &spec,
                    count,
                    geometry.wing_span,
                ))
            }
            None => Ok(PropulsionConfig::default_layout(
                &spec,
                count,
                geometry.wing_span,
            )),
        }
    }

    fn gear_from_raw(raw: &RawAircraftConfig, base: &GearConfig) -> GearConfig {
        let Some(legs) = &raw.gear else {
            return base.clone();
        };

        let valid: Vec<GearLeg> = legs
            .iter()
            .filter(|leg| leg.stiffness > 0.0 && leg.damping >= 0.0)
            .map(|leg| GearLeg {
                id: leg.id,
                position: Vector3::new(leg.position[0], leg.position[1], leg.position[2]),
                stiffness: leg.stiffness,
                damping: leg.damping,
                braked: leg.braked,
                steerable: leg.steerable,
            })
            .collect();

        if valid.len() != legs.len() || valid.is_empty() {
            warn!("Gear definition invalid, using default gear");
            return base.clone();
        }

        GearConfig {
            legs: valid,
            ..base.clone()
        }
    }
}
