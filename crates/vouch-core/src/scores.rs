// crates/vouch-core/src/scores.rs
//
// Output vectors produced by the engine: per-node scores and per-node
// integer point allocations. Both are keyed by node identifier in
// ascending order so downstream consumers see a stable enumeration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Node identifier -> non-negative score. Sums to 1 when produced by the solver.
pub type Scores = BTreeMap<String, f64>;

/// Result of apportioning an integer pool over a score vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Points assigned to each node.
    pub points: BTreeMap<String, u64>,
    /// Points left undistributed. Non-zero only when the score vector was
    /// empty or summed to zero.
    pub unallocated: u64,
}

impl Allocation {
    /// Total points assigned to nodes (excludes `unallocated`).
    pub fn allocated(&self) -> u64 {
        self.points.values().sum()
    }

    /// Points assigned to `id`, or 0 if it is not in the allocation.
    pub fn get(&self, id: &str) -> u64 {
        self.points.get(id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
