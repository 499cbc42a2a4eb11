use barter_types::{BarterError, Intent, IntentId, IntentStatus, NewIntent, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::{Registry, RegistrySnapshot};
use crate::validation::{validate_new_intent, IntentLimits};

#[derive(Debug)]
struct RegistryState {
    intents: BTreeMap<IntentId, Intent>,
    next_id: IntentId,
}

/// In-memory registry.
///
/// Every write (create, cancel, try_close) runs inside one critical section,
/// so a conditional close over many ids is atomic with respect to any other
/// write. Readers take the shared lock only long enough to copy a snapshot.
#[derive(Debug)]
pub struct MemoryRegistry {
    state: RwLock<RegistryState>,
    limits: IntentLimits,
}

impl MemoryRegistry {
    /// Create a new empty registry with default field limits
    pub fn new() -> Self {
        Self::with_limits(IntentLimits::default())
    }

    pub fn with_limits(limits: IntentLimits) -> Self {
        MemoryRegistry {
            state: RwLock::new(RegistryState {
                intents: BTreeMap::new(),
                next_id: IntentId::new(1),
            }),
            limits,
        }
    }

    pub fn limits(&self) -> &IntentLimits {
        &self.limits
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, RegistryState>> {
        self.state
            .read()
            .map_err(|_| BarterError::Internal("intent registry lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, RegistryState>> {
        self.state
            .write()
            .map_err(|_| BarterError::Internal("intent registry lock poisoned".to_string()))
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for MemoryRegistry {
    fn create(&self, request: NewIntent) -> Result<Intent> {
        let request = validate_new_intent(request, &self.limits)?;

        let mut state = self.write()?;
        let id = state.next_id;
        state.next_id = id.next();

        let intent = Intent {
            id,
            actor: request.actor,
            offer: request.offer,
            want: request.want,
            deadline: request.deadline,
            status: IntentStatus::Open,
            version: 0,
            created_at: Utc::now(),
        };
        state.intents.insert(id, intent.clone());

        tracing::info!(
            intent = %id,
            actor = %intent.actor,
            offer = %intent.offer,
            want = %intent.want,
            "intent created"
        );
        Ok(intent)
    }

    fn get(&self, id: IntentId) -> Result<Intent> {
        self.read()?
            .intents
            .get(&id)
            .cloned()
            .ok_or(BarterError::NotFound(id))
    }

    fn cancel(&self, id: IntentId) -> Result<()> {
        let mut state = self.write()?;
        let intent = state
            .intents
            .get_mut(&id)
            .ok_or(BarterError::NotFound(id))?;

        if !intent.status.can_transition_to(IntentStatus::Cancelled) {
            return Err(BarterError::InvalidState {
                id,
                status: intent.status,
            });
        }

        intent.status = IntentStatus::Cancelled;
        intent.version += 1;

        tracing::info!(intent = %id, version = intent.version, "intent cancelled");
        Ok(())
    }

    fn try_close(&self, expected: &BTreeMap<IntentId, u64>) -> Result<Vec<Intent>> {
        if expected.is_empty() {
            return Err(BarterError::InvalidArgument(
                "no intents to close".to_string(),
            ));
        }

        let mut state = self.write()?;

        // Check the whole set before touching anything
        let conflicts: Vec<IntentId> = expected
            .iter()
            .filter(|(id, version)| match state.intents.get(*id) {
                Some(intent) => !intent.is_open() || intent.version != **version,
                None => true,
            })
            .map(|(id, _)| *id)
            .collect();

        if !conflicts.is_empty() {
            tracing::debug!(?conflicts, "conditional close rejected");
            return Err(BarterError::Conflict(conflicts));
        }

        let mut closed = Vec::with_capacity(expected.len());
        for id in expected.keys() {
            if let Some(intent) = state.intents.get_mut(id) {
                intent.status = IntentStatus::Closed;
                intent.version += 1;
                closed.push(intent.clone());
            }
        }

        tracing::info!(count = closed.len(), "intents closed");
        Ok(closed)
    }

    fn snapshot(&self) -> Result<RegistrySnapshot> {
        let state = self.read()?;
        Ok(RegistrySnapshot::new(state.intents.clone(), Utc::now()))
    }
}
