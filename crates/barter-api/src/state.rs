use barter_engine::{BarterEngine, EngineConfig, Result};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BarterEngine>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(AppState {
            engine: Arc::new(BarterEngine::new(config)?),
        })
    }

    pub fn from_engine(engine: Arc<BarterEngine>) -> Self {
        AppState { engine }
    }
}
