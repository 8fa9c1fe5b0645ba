use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{environment::EnvironmentConfig, physics::PhysicsConfig};
use crate::utils::SimResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Master seed for every random stream (engine variance, turbulence).
    pub seed: u64,
    pub physics: PhysicsConfig,
    pub environment: EnvironmentConfig,
    /// Optional YAML aircraft description; the built-in airframe is used otherwise.
    pub aircraft_file: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            physics: PhysicsConfig::default(),
            environment: EnvironmentConfig::default(),
            aircraft_file: None,
        }
    }
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(file)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> SimResult<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::config::environment::SurfaceType;
    use crate::utils::SimError;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.physics.substeps, 5);
        assert_eq!(config.environment.surface, SurfaceType::Paved);
        assert!(config.aircraft_file.is_none());
    }

    #[test]
    fn test_config_save_load() -> SimResult<()> {
        let mut config = SimulationConfig::default();
        config.seed = 7;
        config.environment.wind_speed_mps = 12.0;
        let temp_file = NamedTempFile::new()?;

        config.save(temp_file.path())?;
        assert!(fs::metadata(temp_file.path()).is_ok());

        let loaded = SimulationConfig::load(temp_file.path())?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: SimulationConfig = serde_yaml::from_str("seed: 9\n").unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.physics, PhysicsConfig::default());
    }

    #[test]
    fn test_invalid_config_load() {
        let result = SimulationConfig::load("nonexistent_file.yaml");
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}
