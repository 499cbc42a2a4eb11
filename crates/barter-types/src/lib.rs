mod actor;
mod chain;
mod error;
mod ids;
mod intent;
mod settlement;

pub use actor::{ActorId, ResourceType};
pub use chain::Chain;
pub use error::{BarterError, Result};
pub use ids::{IntentId, SettlementId};
pub use intent::{Intent, IntentStatus, NewIntent};
pub use settlement::Settlement;
