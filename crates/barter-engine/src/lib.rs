mod config;
mod engine;
mod state;

pub use config::EngineConfig;
pub use engine::BarterEngine;
pub use state::EngineStatus;

pub use barter_registry::{IntentLimits, Registry};
pub use barter_solver::SolverParams;
pub use barter_types::{
    ActorId, BarterError, Chain, Intent, IntentId, IntentStatus, NewIntent, ResourceType, Result,
    Settlement, SettlementId,
};
