//! Ledger parameters

use serde::Deserialize;
use thiserror::Error;

use std::fs;
use std::path::Path;

use crate::blockchain::crypto::Curve;
use crate::blockchain::mining::{MiningLimits, MAX_DIFFICULTY};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerConfig {
    /// Leading zero hex characters required of a mined block hash
    #[serde(default = "default_difficulty")]
    pub difficulty: usize,

    /// Amount minted to the miner of each block
    #[serde(default = "default_mining_reward")]
    pub mining_reward: f64,

    #[serde(default)]
    pub mining: MiningLimits,

    /// Use strict Ed25519 verification
    #[serde(default = "default_strict_signatures")]
    pub strict_signatures: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            mining_reward: default_mining_reward(),
            mining: MiningLimits::unbounded(),
            strict_signatures: default_strict_signatures(),
        }
    }
}

fn default_difficulty() -> usize {
    3
}

fn default_mining_reward() -> f64 {
    100.0
}

fn default_strict_signatures() -> bool {
    true
}

impl LedgerConfig {
    /// Reads and validates a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml(&config_str)
    }

    pub fn from_toml(config_str: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(ConfigError::Invalid(format!(
                "difficulty {} exceeds the maximum of {}",
                self.difficulty, MAX_DIFFICULTY
            )));
        }

        if !(self.mining_reward.is_finite() && self.mining_reward > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "mining_reward must be a positive number, got {}",
                self.mining_reward
            )));
        }

        Ok(())
    }

    pub fn curve(&self) -> Curve {
        Curve::new(self.strict_signatures)
    }
}
