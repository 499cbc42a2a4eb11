use barter_registry::{Registry, RegistrySnapshot};
use barter_types::{BarterError, Chain, IntentId, ResourceType, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::OfferGraph;
use crate::params::SolverParams;

/// Search statistics for a single solve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDiagnostics {
    /// Matchable intents in the snapshot
    pub edges: usize,
    /// Resource types reached from the seed's want
    pub resources_reached: usize,
    /// Breadth-first levels expanded
    pub levels: usize,
}

/// A closing chain and how it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSolution {
    pub chain: Chain,
    pub diagnostics: SearchDiagnostics,
}

/// How a resource type was first reached: from `from`, via intent `via`
#[derive(Debug, Clone, Copy)]
struct Step<'a> {
    from: &'a ResourceType,
    via: IntentId,
}

/// Shortest-cycle search over the barter graph.
///
/// Breadth-first over resource types, expanding frontier vertices in the
/// order their paths sort and outgoing intents in ascending id order. The
/// first closing intent found is therefore on the shortest chain, and among
/// chains of that length the one with the lexicographically smallest id
/// sequence. A shortest chain never revisits a resource type (the loop
/// could be cut out), so each type is reached at most once.
#[derive(Debug, Clone, Default)]
pub struct ChainSolver {
    params: SolverParams,
}

impl ChainSolver {
    pub fn new(params: SolverParams) -> Result<Self> {
        params.validate()?;
        Ok(ChainSolver { params })
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Take a snapshot of `registry` and solve against it
    pub fn solve_in(&self, registry: &dyn Registry, seed: IntentId) -> Result<Chain> {
        let snapshot = registry.snapshot()?;
        self.solve(&snapshot, seed)
    }

    pub fn solve(&self, snapshot: &RegistrySnapshot, seed: IntentId) -> Result<Chain> {
        self.solve_detailed(snapshot, seed).map(|solution| solution.chain)
    }

    /// Find the chain `[seed, i2, ..., ik]` closing back on `seed`.
    ///
    /// Fails `NotFound` if `seed` is not open and unexpired in the snapshot,
    /// and `NoChainFound` if no chain of at most `max_chain_length` intents
    /// exists.
    pub fn solve_detailed(
        &self,
        snapshot: &RegistrySnapshot,
        seed: IntentId,
    ) -> Result<ChainSolution> {
        let seed_intent = snapshot
            .get(seed)
            .filter(|intent| intent.is_matchable(snapshot.taken_at))
            .ok_or(BarterError::NotFound(seed))?;

        let graph = OfferGraph::from_snapshot(snapshot);
        let target = &seed_intent.offer;
        let start = &seed_intent.want;

        let mut diagnostics = SearchDiagnostics {
            edges: graph.edge_count(),
            resources_reached: 1,
            levels: 0,
        };

        let mut reached: BTreeMap<&ResourceType, Option<Step<'_>>> = BTreeMap::new();
        reached.insert(start, None);
        let mut frontier = vec![start];

        // Paths to the frontier hold `depth` intents, seed included
        for depth in 1..self.params.max_chain_length {
            diagnostics.levels = depth;
            let mut next = Vec::new();

            for &resource in &frontier {
                for intent in graph.outgoing(resource) {
                    if intent.id == seed {
                        continue;
                    }

                    if &intent.want == target {
                        let mut ids = trace_back(&reached, resource);
                        ids.push(intent.id);
                        let mut chain = Vec::with_capacity(ids.len() + 1);
                        chain.push(seed);
                        chain.extend(ids);
                        diagnostics.resources_reached = reached.len();

                        tracing::debug!(
                            seed = %seed,
                            length = chain.len(),
                            levels = diagnostics.levels,
                            "closing chain found"
                        );
                        return Ok(ChainSolution {
                            chain: Chain::new(chain),
                            diagnostics,
                        });
                    }

                    if !reached.contains_key(&intent.want) {
                        reached.insert(
                            &intent.want,
                            Some(Step {
                                from: resource,
                                via: intent.id,
                            }),
                        );
                        next.push(&intent.want);
                    }
                }
            }

            diagnostics.resources_reached = reached.len();
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        tracing::debug!(
            seed = %seed,
            edges = diagnostics.edges,
            reached = diagnostics.resources_reached,
            "no closing chain within bound"
        );
        Err(BarterError::NoChainFound(seed))
    }
}

/// Intents on the recorded path from the seed's want to `resource`, in
/// chain order
fn trace_back<'a>(
    reached: &BTreeMap<&'a ResourceType, Option<Step<'a>>>,
    resource: &'a ResourceType,
) -> Vec<IntentId> {
    let mut ids = Vec::new();
    let mut current = resource;
    while let Some(Some(step)) = reached.get(current) {
        ids.push(step.via);
        current = step.from;
    }
    ids.reverse();
    ids
}
