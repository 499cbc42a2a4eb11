use barter_types::{Chain, Settlement, SettlementId};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Append-only store of settlement records
#[derive(Debug, Clone)]
pub struct SettlementBook {
    records: BTreeMap<SettlementId, Settlement>,
    next_id: SettlementId,
}

impl SettlementBook {
    pub fn new() -> Self {
        SettlementBook {
            records: BTreeMap::new(),
            next_id: SettlementId::new(1),
        }
    }

    /// Assign the next id and store the record
    pub fn record(&mut self, chain: Chain, created_at: DateTime<Utc>, digest: String) -> Settlement {
        let id = self.next_id;
        self.next_id = id.next();

        let settlement = Settlement {
            id,
            chain,
            created_at,
            digest,
        };
        self.records.insert(id, settlement.clone());
        settlement
    }

    pub fn get(&self, id: SettlementId) -> Option<&Settlement> {
        self.records.get(&id)
    }

    /// All settlements in id (commit) order
    pub fn list(&self) -> Vec<Settlement> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SettlementBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barter_types::IntentId;

    #[test]
    fn test_record_assigns_sequential_ids() {
        let mut book = SettlementBook::new();
        let chain = Chain::new(vec![IntentId::new(1), IntentId::new(2)]);

        let first = book.record(chain.clone(), Utc::now(), "aa".to_string());
        let second = book.record(chain, Utc::now(), "bb".to_string());

        assert_eq!(first.id, SettlementId::new(1));
        assert_eq!(second.id, SettlementId::new(2));
        assert_eq!(book.len(), 2);
        assert_eq!(book.get(first.id).unwrap().digest, "aa");
        assert_eq!(book.list()[1].id, second.id);
    }
}
