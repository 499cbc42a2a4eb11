use barter_registry::IntentLimits;
use barter_solver::SolverParams;
use barter_types::{BarterError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest chain, in intents, a solve may return
    pub max_chain_length: usize,

    /// Field length limits for new intents
    pub limits: IntentLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_chain_length: SolverParams::DEFAULT_MAX_CHAIN_LENGTH,
            limits: IntentLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| BarterError::Config(format!("read {}: {}", path.display(), e)))?;
        let config: EngineConfig = serde_json::from_str(&raw)
            .map_err(|e| BarterError::Config(format!("parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            max_chain_length: self.max_chain_length,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.solver_params().validate()?;
        if self.limits.max_actor_len == 0 || self.limits.max_resource_len == 0 {
            return Err(BarterError::Config(
                "field length limits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
