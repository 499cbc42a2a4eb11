use crate::{IntentId, IntentStatus, SettlementId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarterError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Intent not found: {0}")]
    NotFound(IntentId),

    #[error("Settlement not found: {0}")]
    SettlementNotFound(SettlementId),

    #[error("Intent {id} is {status}, expected open")]
    InvalidState { id: IntentId, status: IntentStatus },

    #[error("No chain found for intent {0}")]
    NoChainFound(IntentId),

    #[error("Invalid chain: {0}")]
    InvalidChain(String),

    #[error("Stale chain: intents {} changed since the chain was proposed", join_ids(.0))]
    StaleChain(Vec<IntentId>),

    /// Raised by the registry's conditional close; surfaced as `StaleChain`
    #[error("Conflict on intents {}", join_ids(.0))]
    Conflict(Vec<IntentId>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BarterError {
    /// Stable machine-readable name of the error class
    pub fn kind(&self) -> &'static str {
        match self {
            BarterError::InvalidArgument(_) => "invalid_argument",
            BarterError::NotFound(_) | BarterError::SettlementNotFound(_) => "not_found",
            BarterError::InvalidState { .. } => "invalid_state",
            BarterError::NoChainFound(_) => "no_chain_found",
            BarterError::InvalidChain(_) => "invalid_chain",
            BarterError::StaleChain(_) => "stale_chain",
            BarterError::Conflict(_) => "conflict",
            BarterError::Config(_) => "config",
            BarterError::Internal(_) => "internal",
        }
    }

    /// Intents that triggered the error, where knowable
    pub fn intent_ids(&self) -> Vec<IntentId> {
        match self {
            BarterError::NotFound(id) | BarterError::NoChainFound(id) => vec![*id],
            BarterError::InvalidState { id, .. } => vec![*id],
            BarterError::StaleChain(ids) | BarterError::Conflict(ids) => ids.clone(),
            _ => Vec::new(),
        }
    }
}

fn join_ids(ids: &[IntentId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, BarterError>;
