use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::linmod::PartitionLimits;
use crate::xor::XorOptions;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] crate::error::SampleError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub seed: u64,
    pub iterations: Option<usize>,
    pub xor: XorOptions,
    pub partition: PartitionLimits,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: None,
            xor: XorOptions::default(),
            partition: PartitionLimits::default(),
        }
    }
}

impl SamplingConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: SamplingConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.xor.validate()?;
        self.partition.validate()?;
        Ok(())
    }
}
