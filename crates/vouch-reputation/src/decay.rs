// crates/vouch-reputation/src/decay.rs
//
// Distance-based trust decay for the Vouch reputation engine.
//
// Teleportation mass is attenuated by trust_decay^d, where d is the hop
// distance from the nearest trusted seed. Closeness to a seed is treated as
// a structural notion, so distances come from a breadth-first search over
// the graph with edge direction ignored.

use std::collections::VecDeque;

use crate::view::TrustView;

/// Hop distance from the nearest seed for every canonical position.
///
/// Seeds are at distance 0. `None` marks a node with no path to any seed
/// (every node, if the graph contains no seeds).
pub(crate) fn seed_distances(view: &TrustView<'_>) -> Vec<Option<u32>> {
    let n = view.len();
    let mut distance: Vec<Option<u32>> = vec![None; n];
    let mut queue = VecDeque::new();

    for pos in 0..n {
        if view.is_seed(pos) {
            distance[pos] = Some(0);
            queue.push_back(pos);
        }
    }

    while let Some(pos) = queue.pop_front() {
        let next = distance[pos].map_or(0, |d| d + 1);
        let neighbours = view
            .successors(pos)
            .iter()
            .chain(view.predecessors(pos).iter())
            .map(|link| link.node);
        for other in neighbours {
            if distance[other].is_none() {
                distance[other] = Some(next);
                queue.push_back(other);
            }
        }
    }

    distance
}

/// Attenuation factor `decay^distance`.
///
/// A node unreachable from every seed is infinitely far away: its factor is
/// 0 unless `decay` is 1. A seed (distance 0) always gets 1, even when
/// `decay` is 0.
pub fn decay_factor(decay: f64, distance: Option<u32>) -> f64 {
    match distance {
        Some(0) => 1.0,
        Some(d) => decay.powf(d as f64),
        None => {
            if decay >= 1.0 {
                1.0
            } else {
                0.0
            }
        }
    }
}
