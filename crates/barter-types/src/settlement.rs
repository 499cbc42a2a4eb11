use crate::{Chain, SettlementId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of an executed chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    /// Consumed intents, in the order they were submitted
    pub chain: Chain,
    pub created_at: DateTime<Utc>,
    /// Hex SHA-256 over the chain and its members as committed
    pub digest: String,
}
