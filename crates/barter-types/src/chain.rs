use crate::{BarterError, Intent, IntentId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Ordered sequence of intent ids whose wants and offers link
/// consecutively and close back on the first intent
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain(Vec<IntentId>);

impl Chain {
    /// Minimum number of intents in a closing chain
    pub const MIN_LEN: usize = 2;

    pub fn new(ids: Vec<IntentId>) -> Self {
        Chain(ids)
    }

    pub fn ids(&self) -> &[IntentId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<IntentId> {
        self.0.first().copied()
    }

    pub fn contains(&self, id: IntentId) -> bool {
        self.0.contains(&id)
    }

    pub fn into_inner(self) -> Vec<IntentId> {
        self.0
    }

    /// Check shape independent of any registry state: at least two ids,
    /// none repeated
    pub fn validate_shape(&self) -> Result<()> {
        if self.0.len() < Self::MIN_LEN {
            return Err(BarterError::InvalidChain(format!(
                "chain must contain at least {} intents, got {}",
                Self::MIN_LEN,
                self.0.len()
            )));
        }

        let mut seen = BTreeSet::new();
        for id in &self.0 {
            if !seen.insert(*id) {
                return Err(BarterError::InvalidChain(format!(
                    "intent {} appears more than once",
                    id
                )));
            }
        }

        Ok(())
    }

    /// Check the offer/want linkage against `intents`, given in chain order.
    ///
    /// Requires `want(i_j) == offer(i_{j+1})` for consecutive members and
    /// `want(i_k) == offer(i_1)` to close the cycle.
    pub fn validate_linkage(&self, intents: &[Intent]) -> Result<()> {
        if intents.len() != self.0.len() {
            return Err(BarterError::InvalidChain(format!(
                "expected {} intents, got {}",
                self.0.len(),
                intents.len()
            )));
        }

        for (id, intent) in self.0.iter().zip(intents) {
            if *id != intent.id {
                return Err(BarterError::InvalidChain(format!(
                    "intent {} supplied out of chain order",
                    intent.id
                )));
            }
        }

        let n = intents.len();
        for idx in 0..n {
            let current = &intents[idx];
            let next = &intents[(idx + 1) % n];
            if !current.feeds(next) {
                return Err(BarterError::InvalidChain(format!(
                    "intent {} wants {} but intent {} offers {}",
                    current.id, current.want, next.id, next.offer
                )));
            }
        }

        Ok(())
    }
}

impl From<Vec<IntentId>> for Chain {
    fn from(ids: Vec<IntentId>) -> Self {
        Chain(ids)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|id| id.get().to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(ids: &[u64]) -> Chain {
        Chain::new(ids.iter().copied().map(IntentId::new).collect())
    }

    #[test]
    fn test_shape_too_short() {
        assert!(matches!(
            chain(&[1]).validate_shape(),
            Err(BarterError::InvalidChain(_))
        ));
        assert!(chain(&[]).validate_shape().is_err());
    }

    #[test]
    fn test_shape_duplicates() {
        assert!(chain(&[1, 2, 1]).validate_shape().is_err());
        assert!(chain(&[1, 2, 3]).validate_shape().is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(chain(&[4, 9, 2]).to_string(), "[4, 9, 2]");
    }
}
