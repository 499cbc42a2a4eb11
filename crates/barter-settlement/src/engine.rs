use barter_registry::Registry;
use barter_types::{BarterError, Chain, Intent, IntentId, Result, Settlement, SettlementId};
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::book::SettlementBook;
use crate::digest::settlement_digest;

/// Validates proposed chains and commits them against the registry.
///
/// The only component that moves intents from `Open` to `Closed`. A commit
/// either closes every member and records a settlement, or changes nothing.
pub struct SettlementEngine {
    registry: Arc<dyn Registry>,
    book: Mutex<SettlementBook>,
}

impl SettlementEngine {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        SettlementEngine {
            registry,
            book: Mutex::new(SettlementBook::new()),
        }
    }

    /// Settle `chain`, failing `InvalidChain` for a malformed or unlinked
    /// chain and `StaleChain` if any member is no longer open at the
    /// version read here
    pub fn settle(&self, chain: Chain) -> Result<Settlement> {
        chain.validate_shape()?;

        let members = self.fetch_members(&chain)?;
        chain.validate_linkage(&members)?;

        // Members no longer open, or past their deadline, in id order
        let checked_at = Utc::now();
        let stale: BTreeSet<IntentId> = members
            .iter()
            .filter(|intent| !intent.is_open() || intent.is_expired(checked_at))
            .map(|intent| intent.id)
            .collect();
        if !stale.is_empty() {
            let stale: Vec<IntentId> = stale.into_iter().collect();
            tracing::warn!(%chain, ?stale, "settlement rejected: stale members");
            return Err(BarterError::StaleChain(stale));
        }

        let expected: BTreeMap<IntentId, u64> = members
            .iter()
            .map(|intent| (intent.id, intent.version))
            .collect();
        let digest = settlement_digest(&chain, &members)?;

        // Held across the close so settlement ids follow commit order
        let mut book = self.lock_book()?;
        let created_at = Utc::now();
        match self.registry.try_close(&expected) {
            Ok(_) => {}
            Err(BarterError::Conflict(ids)) => {
                tracing::warn!(%chain, conflicts = ?ids, "settlement rejected: stale chain");
                return Err(BarterError::StaleChain(ids));
            }
            Err(e) => return Err(e),
        }

        let settlement = book.record(chain, created_at, digest);
        tracing::info!(
            settlement = %settlement.id,
            chain = %settlement.chain,
            "settlement committed"
        );
        Ok(settlement)
    }

    /// All settlements in commit order
    pub fn list(&self) -> Result<Vec<Settlement>> {
        Ok(self.lock_book()?.list())
    }

    pub fn get(&self, id: SettlementId) -> Result<Settlement> {
        self.lock_book()?
            .get(id)
            .cloned()
            .ok_or(BarterError::SettlementNotFound(id))
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.lock_book()?.len())
    }

    fn fetch_members(&self, chain: &Chain) -> Result<Vec<Intent>> {
        self.registry.fetch(chain.ids()).map_err(|e| match e {
            BarterError::NotFound(id) => {
                BarterError::InvalidChain(format!("intent {} does not exist", id))
            }
            other => other,
        })
    }

    fn lock_book(&self) -> Result<MutexGuard<'_, SettlementBook>> {
        self.book
            .lock()
            .map_err(|_| BarterError::Internal("settlement book lock poisoned".to_string()))
    }
}
