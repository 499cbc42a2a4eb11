use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time counters for the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub intents: usize,
    pub open_intents: usize,
    pub settlements: usize,
    pub max_chain_length: usize,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: u64,
}
