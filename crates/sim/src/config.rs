use std::path::Path;

use cityscape_audio::AudioConfig;
use cityscape_kernel::{ConfigError, MovementConfig, WorldConfig};
use serde::{Deserialize, Serialize};

/// Errors that can occur while loading or validating a simulation config.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Every tunable of a run. Missing sections and fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub movement: MovementConfig,
    pub audio: AudioConfig,
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.movement.validate()?;
        let threshold = self.audio.speed_threshold;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "audio.speed_threshold",
                value: threshold,
            });
        }
        Ok(())
    }
}
