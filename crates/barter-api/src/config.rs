use barter_engine::{BarterError, EngineConfig, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Configuration for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,

    pub engine: EngineConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            engine: EngineConfig::default(),
        }
    }
}

impl ApiConfig {
    pub const CONFIG_PATH_VAR: &'static str = "BARTER_CONFIG";
    pub const BIND_ADDR_VAR: &'static str = "BARTER_BIND_ADDR";
    pub const MAX_CHAIN_LENGTH_VAR: &'static str = "BARTER_MAX_CHAIN_LENGTH";

    /// Defaults, then the file named by `BARTER_CONFIG`, then individual
    /// variable overrides
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(Self::CONFIG_PATH_VAR) {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(addr) = lookup(Self::BIND_ADDR_VAR) {
            config.bind_addr = addr.parse().map_err(|e| {
                BarterError::Config(format!("{}={:?}: {}", Self::BIND_ADDR_VAR, addr, e))
            })?;
        }

        if let Some(length) = lookup(Self::MAX_CHAIN_LENGTH_VAR) {
            config.engine.max_chain_length = length.trim().parse().map_err(|e| {
                BarterError::Config(format!(
                    "{}={:?}: {}",
                    Self::MAX_CHAIN_LENGTH_VAR,
                    length,
                    e
                ))
            })?;
        }

        config.engine.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| BarterError::Config(format!("read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| BarterError::Config(format!("parse {}: {}", path.display(), e)))
    }
}
