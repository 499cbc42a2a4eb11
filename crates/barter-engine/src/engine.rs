use barter_registry::{MemoryRegistry, Registry};
use barter_settlement::SettlementEngine;
use barter_solver::ChainSolver;
use barter_types::{
    Chain, Intent, IntentId, NewIntent, Result, Settlement, SettlementId,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::state::EngineStatus;

/// Barter matching engine: intent registry, chain solver and settlement
/// behind one handle.
///
/// Every operation takes `&self`; share the engine across tasks with an
/// `Arc`. Solving never blocks writers beyond copying a snapshot, so a chain
/// may be stale by the time it is settled. Re-solve on `StaleChain`.
pub struct BarterEngine {
    config: EngineConfig,
    registry: Arc<dyn Registry>,
    solver: ChainSolver,
    settlement: SettlementEngine,
    started_at: DateTime<Utc>,
}

impl BarterEngine {
    /// Create an engine over a fresh in-memory registry
    pub fn new(config: EngineConfig) -> Result<Self> {
        let registry = Arc::new(MemoryRegistry::with_limits(config.limits));
        Self::with_registry(config, registry)
    }

    /// Create an engine over an existing registry.
    ///
    /// Field limits are enforced by the registry itself; `config.limits` only
    /// applies to registries built by [`BarterEngine::new`].
    pub fn with_registry(config: EngineConfig, registry: Arc<dyn Registry>) -> Result<Self> {
        config.validate()?;
        let solver = ChainSolver::new(config.solver_params())?;
        let settlement = SettlementEngine::new(registry.clone());

        tracing::info!(
            max_chain_length = config.max_chain_length,
            "barter engine ready"
        );

        Ok(Self {
            config,
            registry,
            solver,
            settlement,
            started_at: Utc::now(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn create_intent(&self, request: NewIntent) -> Result<Intent> {
        self.registry.create(request)
    }

    /// All intents, every status, in id order
    pub fn list_intents(&self) -> Result<Vec<Intent>> {
        self.registry.list()
    }

    pub fn get_intent(&self, id: IntentId) -> Result<Intent> {
        self.registry.get(id)
    }

    pub fn cancel_intent(&self, id: IntentId) -> Result<()> {
        self.registry.cancel(id)
    }

    /// Shortest closing chain through `seed`
    pub fn solve(&self, seed: IntentId) -> Result<Chain> {
        self.solver.solve_in(self.registry.as_ref(), seed)
    }

    pub fn settle(&self, chain: Chain) -> Result<Settlement> {
        self.settlement.settle(chain)
    }

    /// Settlements in commit order
    pub fn list_settlements(&self) -> Result<Vec<Settlement>> {
        self.settlement.list()
    }

    pub fn get_settlement(&self, id: SettlementId) -> Result<Settlement> {
        self.settlement.get(id)
    }

    pub fn status(&self) -> Result<EngineStatus> {
        let snapshot = self.registry.snapshot()?;
        let uptime = (Utc::now() - self.started_at).num_seconds().max(0) as u64;

        Ok(EngineStatus {
            intents: snapshot.len(),
            open_intents: snapshot.open_count(),
            settlements: self.settlement.count()?,
            max_chain_length: self.config.max_chain_length,
            started_at: self.started_at,
            uptime_seconds: uptime,
        })
    }
}
