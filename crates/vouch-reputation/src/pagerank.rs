// crates/vouch-reputation/src/pagerank.rs
//
// Trust-aware PageRank for the Vouch reputation engine.
//
// Personalized PageRank where both the teleportation vector and the edge
// weights favour a configured set of trusted seeds:
//   1. Prior: seeds share `trust_share` of the mass, everyone else shares
//      the rest. The prior is also the starting vector.
//   2. Teleportation: the prior attenuated by trust_decay^d, d being the hop
//      distance from the nearest seed.
//   3. Power iteration:
//        raw = (1-d) * teleport + d * (M * scores + dangling / N)
//      followed by normalization to sum 1.
//   4. Stop once the L1 change drops below the tolerance, or after
//      `max_iterations`.
//   5. Seed floors: every seed is lifted to at least its reserved share
//      (`trust_share / k`) and to at least the score it would have had as a
//      non-seed. Non-seeds are scaled down to make room.

use serde::{Deserialize, Serialize};
use vouch_core::{PageRankConfig, Scores};

use crate::decay::{decay_factor, seed_distances};
use crate::graph::GraphComputer;
use crate::view::TrustView;

/// Scores plus solver diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankOutcome {
    /// Final score vector, summing to 1 (empty for an empty graph).
    pub scores: Scores,
    /// Iterations actually run.
    pub iterations: u32,
    /// `true` if the L1 change fell below the tolerance.
    pub converged: bool,
    /// L1 change of the last iteration.
    pub residual: f64,
}

/// Result of one power iteration, in canonical order.
#[derive(Debug)]
struct Iteration {
    scores: Vec<f64>,
    iterations: u32,
    converged: bool,
    residual: f64,
}

pub(crate) fn solve(graph: &GraphComputer, config: &PageRankConfig) -> PageRankOutcome {
    let view = TrustView::build(graph, config);
    let n = view.len();
    if n == 0 {
        tracing::debug!("PageRank requested on an empty graph");
        return PageRankOutcome {
            scores: Scores::new(),
            iterations: 0,
            converged: true,
            residual: 0.0,
        };
    }

    let seed_count = view.seed_count();
    tracing::debug!(
        nodes = n,
        edges = graph.edge_count(),
        seeds = seed_count,
        damping = config.damping_factor(),
        max_iterations = config.max_iterations(),
        "Running trust-aware PageRank"
    );

    let Iteration {
        mut scores,
        iterations,
        converged,
        residual,
    } = iterate(&view, config);

    if converged {
        tracing::debug!(iterations, residual, "PageRank converged");
    } else {
        tracing::warn!(
            iterations,
            residual,
            tolerance = config.tolerance(),
            "PageRank did not converge; returning last iterate"
        );
    }

    if seed_count > 0 {
        let floors = seed_floors(graph, config, &view, &scores);
        apply_seed_floors(&mut scores, view.seed_flags(), &floors);
    }

    let scores = view
        .ids()
        .iter()
        .zip(scores)
        .map(|(id, score)| (id.to_string(), score))
        .collect();

    PageRankOutcome {
        scores,
        iterations,
        converged,
        residual,
    }
}

/// Power iteration over `view`. No seed floors are applied here.
fn iterate(view: &TrustView<'_>, config: &PageRankConfig) -> Iteration {
    let n = view.len();
    let trust = config.trust();
    let d = config.damping_factor();
    let prior = seed_prior(view.seed_flags(), trust.trust_share());

    // Teleportation is attenuated by distance only when there is a seed to
    // measure distance from.
    let teleport: Vec<f64> = if view.seed_count() > 0 {
        let distances = seed_distances(view);
        prior
            .iter()
            .zip(&distances)
            .map(|(&p, &dist)| p * decay_factor(trust.trust_decay(), dist))
            .collect()
    } else {
        prior.clone()
    };

    let mut scores = prior;
    let mut next = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut residual = f64::INFINITY;
    let mut converged = false;

    while iterations < config.max_iterations() {
        iterations += 1;

        // Mass held by nodes with no outgoing weight is spread evenly.
        let dangling: f64 = (0..n)
            .filter(|&pos| view.out_weight(pos) <= 0.0)
            .map(|pos| scores[pos])
            .sum();
        let spread = dangling / n as f64;

        step(view, &scores, &teleport, d, spread, &mut next);
        normalize(&mut next);

        residual = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        std::mem::swap(&mut scores, &mut next);

        if residual < config.tolerance() {
            converged = true;
            break;
        }
    }

    Iteration {
        scores,
        iterations,
        converged,
        residual,
    }
}

/// Initial distribution: seeds share `trust_share`, non-seeds share the
/// remainder. Uniform when the graph has no seeds or only seeds.
fn seed_prior(is_seed: &[bool], trust_share: f64) -> Vec<f64> {
    let n = is_seed.len();
    let k = is_seed.iter().filter(|&&s| s).count();
    if k == 0 || k == n {
        return vec![1.0 / n as f64; n];
    }
    let seed_mass = trust_share / k as f64;
    let other_mass = (1.0 - trust_share) / (n - k) as f64;
    let mut prior: Vec<f64> = is_seed
        .iter()
        .map(|&s| if s { seed_mass } else { other_mass })
        .collect();
    normalize(&mut prior);
    prior
}

/// Share reserved for each of `seed_count` seeds among `n` nodes. Nothing is
/// reserved when the graph has no seeds or only seeds.
fn reserved_share(trust_share: f64, seed_count: usize, n: usize) -> f64 {
    if seed_count == 0 || seed_count == n {
        0.0
    } else {
        trust_share / seed_count as f64
    }
}

/// Lowest final score each seed may end up with (0 for non-seeds).
///
/// A seed's floor is the largest of its iterated score, its reserved share,
/// and its demoted score from [`demoted_score`].
fn seed_floors(graph: &GraphComputer, config: &PageRankConfig, view: &TrustView<'_>, scores: &[f64]) -> Vec<f64> {
    let reserved = reserved_share(config.trust().trust_share(), view.seed_count(), view.len());
    (0..view.len())
        .map(|pos| {
            if !view.is_seed(pos) {
                return 0.0;
            }
            let demoted = demoted_score(graph, config, view.id(pos), pos);
            scores[pos].max(reserved).max(demoted)
        })
        .collect()
}

/// Upper bound on the final score `id` gets when it is removed from the
/// seed set and everything else stays the same.
///
/// Runs the power iteration without `id` as a seed, then applies the least
/// scaling that the remaining seeds' floors force on non-seeds. The real
/// non-seed scaling is at least that strong, so lifting a seed to this value
/// means promoting a node never lowers its score.
fn demoted_score(graph: &GraphComputer, config: &PageRankConfig, id: &str, pos: usize) -> f64 {
    let mut demoted = config.clone();
    demoted.trust_mut().remove_seed(id);
    let view = TrustView::build(graph, &demoted);
    let run = iterate(&view, &demoted);
    if !run.converged {
        tracing::trace!(node = id, residual = run.residual, "Demoted solve did not converge");
    }

    let reserved = reserved_share(demoted.trust().trust_share(), view.seed_count(), view.len());
    let (mut held, mut free) = (0.0_f64, 0.0_f64);
    for (&score, &seed) in run.scores.iter().zip(view.seed_flags()) {
        if seed {
            held += score.max(reserved);
        } else {
            free += score;
        }
    }
    let scale = if free > 0.0 {
        ((1.0 - held) / free).clamp(0.0, 1.0)
    } else {
        0.0
    };
    run.scores[pos] * scale
}

/// Lift every seed to `max(score, floor)` and scale non-seeds down so the
/// vector still sums to 1. If the floors alone exceed the whole mass, the
/// seeds share it in proportion and non-seeds get nothing.
fn apply_seed_floors(scores: &mut [f64], is_seed: &[bool], floors: &[f64]) {
    let (mut held, mut free) = (0.0_f64, 0.0_f64);
    for ((score, &seed), &floor) in scores.iter_mut().zip(is_seed).zip(floors) {
        if seed {
            *score = score.max(floor);
            held += *score;
        } else {
            free += *score;
        }
    }

    if held < 1.0 && free > 0.0 {
        let scale = (1.0 - held) / free;
        for (score, &seed) in scores.iter_mut().zip(is_seed) {
            if !seed {
                *score *= scale;
            }
        }
    } else {
        tracing::debug!(held, "Seed floors cover the whole mass");
        for (score, &seed) in scores.iter_mut().zip(is_seed) {
            if !seed {
                *score = 0.0;
            }
        }
        normalize(scores);
    }
}

/// Node `pos`'s damped update from its in-edges.
fn update(view: &TrustView<'_>, scores: &[f64], teleport: &[f64], d: f64, spread: f64, pos: usize) -> f64 {
    let incoming: f64 = view
        .predecessors(pos)
        .iter()
        // A zero-weight link carries nothing; its source may be dangling
        // with out_weight 0.
        .filter(|link| link.weight > 0.0)
        .map(|link| scores[link.node] * link.weight / view.out_weight(link.node))
        .sum();
    (1.0 - d) * teleport[pos] + d * (incoming + spread)
}

#[cfg(any(not(feature = "parallel"), test))]
fn step_serial(view: &TrustView<'_>, scores: &[f64], teleport: &[f64], d: f64, spread: f64, next: &mut [f64]) {
    for (pos, slot) in next.iter_mut().enumerate() {
        *slot = update(view, scores, teleport, d, spread, pos);
    }
}

#[cfg(not(feature = "parallel"))]
fn step(view: &TrustView<'_>, scores: &[f64], teleport: &[f64], d: f64, spread: f64, next: &mut [f64]) {
    step_serial(view, scores, teleport, d, spread, next);
}

#[cfg(feature = "parallel")]
fn step(view: &TrustView<'_>, scores: &[f64], teleport: &[f64], d: f64, spread: f64, next: &mut [f64]) {
    use rayon::prelude::*;

    next.par_iter_mut()
        .enumerate()
        .for_each(|(pos, slot)| *slot = update(view, scores, teleport, d, spread, pos));
}

fn normalize(scores: &mut [f64]) {
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for s in scores.iter_mut() {
            *s /= sum;
        }
    }
}
