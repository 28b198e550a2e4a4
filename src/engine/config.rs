//! Engine configuration

use crate::dnf::DEFAULT_MAX_DISJUNCTIVE_TERMS;

/// Tunables for query execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on the number of disjunctive terms a filter may expand
    /// into. Queries that exceed it fall back to a full collection scan
    /// rather than fanning out an unbounded number of index lookups.
    pub max_disjunctive_terms: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_disjunctive_terms: DEFAULT_MAX_DISJUNCTIVE_TERMS,
        }
    }
}
