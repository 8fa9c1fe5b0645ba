use std::io;
use thiserror::Error;

use crate::components::aircraft::config::ConfigError;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::FileError(e) => SimError::Io(e),
            ConfigError::YamlError(e) => SimError::Yaml(e),
            ConfigError::ValidationError(msg) => SimError::InvalidConfig(msg),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
