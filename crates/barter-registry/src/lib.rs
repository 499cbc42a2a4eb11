mod memory;
mod registry;
mod validation;

pub use memory::MemoryRegistry;
pub use registry::{Registry, RegistrySnapshot};
pub use validation::{validate_new_intent, IntentLimits};
