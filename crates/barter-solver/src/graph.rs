use barter_registry::RegistrySnapshot;
use barter_types::{Intent, ResourceType};
use std::collections::BTreeMap;

/// Barter graph over a registry snapshot: resource types are vertices and
/// every matchable intent is an edge `offer -> want`.
///
/// Parallel edges are kept. Outgoing edges of a vertex are in ascending id
/// order.
#[derive(Debug, Clone)]
pub struct OfferGraph<'a> {
    outgoing: BTreeMap<&'a ResourceType, Vec<&'a Intent>>,
    edge_count: usize,
}

impl<'a> OfferGraph<'a> {
    pub fn from_snapshot(snapshot: &'a RegistrySnapshot) -> Self {
        Self::from_intents(snapshot.matchable())
    }

    /// Build from intents already filtered for matchability, in id order
    pub fn from_intents(intents: impl IntoIterator<Item = &'a Intent>) -> Self {
        let mut outgoing: BTreeMap<&'a ResourceType, Vec<&'a Intent>> = BTreeMap::new();
        let mut edge_count = 0;
        for intent in intents {
            outgoing.entry(&intent.offer).or_default().push(intent);
            edge_count += 1;
        }
        for edges in outgoing.values_mut() {
            edges.sort_by_key(|intent| intent.id);
        }
        OfferGraph {
            outgoing,
            edge_count,
        }
    }

    /// Intents offering `resource`
    pub fn outgoing(&self, resource: &ResourceType) -> &[&'a Intent] {
        self.outgoing
            .get(resource)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of distinct resources offered by at least one intent
    pub fn source_count(&self) -> usize {
        self.outgoing.len()
    }
}
