use barter_types::{BarterError, Chain, Result};
use serde::{Deserialize, Serialize};

/// Bounds for the chain search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverParams {
    /// Longest chain, in intents, the search will return
    pub max_chain_length: usize,
}

impl SolverParams {
    pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 6;

    pub fn new(max_chain_length: usize) -> Result<Self> {
        let params = SolverParams { max_chain_length };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_chain_length < Chain::MIN_LEN {
            return Err(BarterError::Config(format!(
                "max_chain_length must be at least {}, got {}",
                Chain::MIN_LEN,
                self.max_chain_length
            )));
        }
        Ok(())
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            max_chain_length: Self::DEFAULT_MAX_CHAIN_LENGTH,
        }
    }
}
