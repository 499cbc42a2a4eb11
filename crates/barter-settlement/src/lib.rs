mod book;
mod digest;
mod engine;

pub use book::SettlementBook;
pub use digest::{compute_hash, settlement_digest, HashRef};
pub use engine::SettlementEngine;
