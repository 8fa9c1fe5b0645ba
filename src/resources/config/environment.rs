use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::{SimError, SimResult};

/// Runway / taxiway surface under the wheels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceType {
    Paved,
    Grass,
}

impl SurfaceType {
    /// Multipliers on (rolling, braking, lateral) friction.
    pub fn friction_factors(self) -> (f64, f64, f64) {
        match self {
            SurfaceType::Paved => (1.0, 1.0, 1.0),
            SurfaceType::Grass => (4.0, 0.6, 0.7),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precipitation {
    None,
    Rain,
    Snow,
}

impl Precipitation {
    /// Multiplier on braking and lateral friction.
    pub fn friction_factor(self) -> f64 {
        match self {
            Precipitation::None => 1.0,
            Precipitation::Rain => 0.7,
            Precipitation::Snow => 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Mean wind speed [m/s]
    pub wind_speed_mps: f64,
    /// Direction the wind blows FROM [deg true]
    pub wind_direction_deg: f64,
    /// Gust intensity, 0 = calm air
    pub turbulence: f64,
    /// Offset from ISA temperature at every altitude [K]
    pub isa_deviation_k: f64,
    /// Ground height under the aircraft [m MSL]
    pub ground_elevation_m: f64,
    pub surface: SurfaceType,
    pub precipitation: Precipitation,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            wind_speed_mps: 0.0,
            wind_direction_deg: 0.0,
            turbulence: 0.0,
            isa_deviation_k: 0.0,
            ground_elevation_m: 0.0,
            surface: SurfaceType::Paved,
            precipitation: Precipitation::None,
        }
    }
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfigBuilder {
    pub wind_speed_mps: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub turbulence: Option<f64>,
    pub isa_deviation_k: Option<f64>,
    pub ground_elevation_m: Option<f64>,
    pub surface: Option<SurfaceType>,
    pub precipitation: Option<Precipitation>,
}

impl EnvironmentConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wind(mut self, speed_mps: f64, direction_deg: f64) -> Self {
        self.wind_speed_mps = Some(speed_mps);
        self.wind_direction_deg = Some(direction_deg);
        self
    }

    pub fn turbulence(mut self, turbulence: f64) -> Self {
        self.turbulence = Some(turbulence);
        self
    }

    pub fn isa_deviation(mut self, deviation_k: f64) -> Self {
        self.isa_deviation_k = Some(deviation_k);
        self
    }

    pub fn ground_elevation(mut self, elevation_m: f64) -> Self {
        self.ground_elevation_m = Some(elevation_m);
        self
    }

    pub fn surface(mut self, surface: SurfaceType) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn precipitation(mut self, precipitation: Precipitation) -> Self {
        self.precipitation = Some(precipitation);
        self
    }

    pub fn from_json(value: &Value) -> SimResult<Self> {
        let mut builder = Self::new();
        let num = |key: &str| value.get(key).and_then(|v| v.as_f64());

        builder.wind_speed_mps = num("wind_speed_mps");
        builder.wind_direction_deg = num("wind_direction_deg");
        builder.turbulence = num("turbulence");
        builder.isa_deviation_k = num("isa_deviation_k");
        builder.ground_elevation_m = num("ground_elevation_m");

        if let Some(surface) = value.get("surface") {
            builder.surface = Some(serde_json::from_value(surface.clone())?);
        }
        if let Some(precipitation) = value.get("precipitation") {
            builder.precipitation = Some(serde_json::from_value(precipitation.clone())?);
        }

        Ok(builder)
    }

    /// Fills unset fields from `base`.
    pub fn build_on(self, base: &EnvironmentConfig) -> SimResult<EnvironmentConfig> {
        let config = EnvironmentConfig {
            wind_speed_mps: self.wind_speed_mps.unwrap_or(base.wind_speed_mps),
            wind_direction_deg: self.wind_direction_deg.unwrap_or(base.wind_direction_deg),
            turbulence: self.turbulence.unwrap_or(base.turbulence),
            isa_deviation_k: self.isa_deviation_k.unwrap_or(base.isa_deviation_k),
            ground_elevation_m: self.ground_elevation_m.unwrap_or(base.ground_elevation_m),
            surface: self.surface.unwrap_or(base.surface),
            precipitation: self.precipitation.unwrap_or(base.precipitation),
        };

        if !(config.wind_speed_mps.is_finite() && config.wind_speed_mps >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "wind speed must be non-negative, got {}",
                config.wind_speed_mps
            )));
        }
        if !(config.turbulence.is_finite() && config.turbulence >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "turbulence must be non-negative, got {}",
                config.turbulence
            )));
        }

        Ok(config)
    }

    pub fn build(self) -> SimResult<EnvironmentConfig> {
        self.build_on(&EnvironmentConfig::default())
    }
}
