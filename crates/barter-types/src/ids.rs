use serde::{Deserialize, Serialize};
use std::fmt;

/// Intent identifier, assigned by the registry in ascending order.
///
/// The total order on ids drives the solver's tie-break and the order in
/// which multi-intent operations touch the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentId(u64);

impl IntentId {
    pub const fn new(id: u64) -> Self {
        IntentId(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id that follows this one
    pub const fn next(self) -> Self {
        IntentId(self.0 + 1)
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for IntentId {
    fn from(id: u64) -> Self {
        IntentId(id)
    }
}

/// Settlement identifier (sequential counter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementId(u64);

impl SettlementId {
    pub const fn new(id: u64) -> Self {
        SettlementId(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn next(self) -> Self {
        SettlementId(self.0 + 1)
    }
}

impl fmt::Display for SettlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for SettlementId {
    fn from(id: u64) -> Self {
        SettlementId(id)
    }
}
