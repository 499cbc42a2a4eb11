use barter_types::{BarterError, Chain, Intent, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hash reference (hex-encoded SHA256)
pub type HashRef = String;

/// Compute SHA256 hash of data
pub fn compute_hash(data: &[u8]) -> HashRef {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[derive(Serialize)]
struct SettlementPreimage<'a> {
    chain: &'a Chain,
    members: &'a [Intent],
}

/// Digest of a chain and its members at the versions being consumed
pub fn settlement_digest(chain: &Chain, members: &[Intent]) -> Result<HashRef> {
    let json = serde_json::to_vec(&SettlementPreimage { chain, members })
        .map_err(|e| BarterError::Internal(format!("settlement digest: {}", e)))?;
    Ok(compute_hash(&json))
}
