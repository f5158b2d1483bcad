//! Ordering context for demand rule evaluation.

use std::collections::HashMap;

/// Per-run facts demand rules may consult.
///
/// Holds the number of compatible vessels per demand in the current
/// snapshot, which scarcity-aware rules rank on.
#[derive(Debug, Clone, Default)]
pub struct OrderingContext {
    candidate_counts: HashMap<String, usize>,
}

impl OrderingContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context from `(demand_id, compatible vessel count)` pairs.
    pub fn from_counts<'a>(counts: impl IntoIterator<Item = (&'a str, usize)>) -> Self {
        Self {
            candidate_counts: counts
                .into_iter()
                .map(|(id, count)| (id.to_string(), count))
                .collect(),
        }
    }

    /// Sets the compatible vessel count of a demand.
    pub fn with_candidate_count(mut self, demand_id: impl Into<String>, count: usize) -> Self {
        self.candidate_counts.insert(demand_id.into(), count);
        self
    }

    /// Compatible vessel count of a demand, if known.
    pub fn candidate_count(&self, demand_id: &str) -> Option<usize> {
        self.candidate_counts.get(demand_id).copied()
    }
}
