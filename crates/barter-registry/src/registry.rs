use barter_types::{BarterError, Intent, IntentId, NewIntent, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Intent registry: sole owner of intent records and their status.
///
/// Implementations must make `try_close` a single atomic check-then-mutate
/// step relative to every other write touching an overlapping id.
pub trait Registry: Send + Sync {
    /// Validate and store a new intent as `Open` with version 0
    fn create(&self, request: NewIntent) -> Result<Intent>;

    /// Get a single intent by id
    fn get(&self, id: IntentId) -> Result<Intent>;

    /// All intents of every status, ordered by id
    fn list(&self) -> Result<Vec<Intent>> {
        Ok(self.snapshot()?.into_intents())
    }

    /// Move an open intent to `Cancelled`
    fn cancel(&self, id: IntentId) -> Result<()>;

    /// Close every intent in `expected` iff each is open at its expected
    /// version; otherwise mutate nothing and report `Conflict`.
    ///
    /// Returns the closed intents in id order.
    fn try_close(&self, expected: &BTreeMap<IntentId, u64>) -> Result<Vec<Intent>>;

    /// Point-in-time copy of every intent
    fn snapshot(&self) -> Result<RegistrySnapshot>;

    /// Fetch several intents from one consistent snapshot, in the given order
    fn fetch(&self, ids: &[IntentId]) -> Result<Vec<Intent>> {
        let snapshot = self.snapshot()?;
        ids.iter()
            .map(|id| snapshot.get(*id).cloned().ok_or(BarterError::NotFound(*id)))
            .collect()
    }
}

/// Consistent copy of the registry taken under a single read
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegistrySnapshot {
    pub intents: BTreeMap<IntentId, Intent>,
    pub taken_at: DateTime<Utc>,
}

impl RegistrySnapshot {
    pub fn new(intents: BTreeMap<IntentId, Intent>, taken_at: DateTime<Utc>) -> Self {
        RegistrySnapshot { intents, taken_at }
    }

    pub fn get(&self, id: IntentId) -> Option<&Intent> {
        self.intents.get(&id)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Open intents whose deadline had not passed when the snapshot was taken,
    /// in id order
    pub fn matchable(&self) -> impl Iterator<Item = &Intent> + '_ {
        let now = self.taken_at;
        self.intents.values().filter(move |i| i.is_matchable(now))
    }

    pub fn open_count(&self) -> usize {
        self.intents.values().filter(|i| i.is_open()).count()
    }

    pub fn into_intents(self) -> Vec<Intent> {
        self.intents.into_values().collect()
    }
}
