// crates/vouch-economics/src/distribution.rs
//
// Point distribution for the Vouch reputation engine.
//
// A finite pool of integer points is split proportionally to a score
// vector using the largest-remainder (Hamilton) method:
//   1. Each node's raw share is score / total * pool.
//   2. Every node provisionally receives the floor of its raw share.
//   3. The shortfall is handed out one point at a time to the nodes with
//      the largest fractional remainder, ties broken by ascending identifier.
//
// The returned allocation always sums to exactly the pool, except when the
// scores are empty or all zero: then every node gets 0 and the whole pool is
// reported as `unallocated`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use vouch_core::{Allocation, Scores, VouchError};

/// A node's provisional share while apportioning.
#[derive(Debug)]
struct Share<'a> {
    id: &'a str,
    points: u64,
    remainder: f64,
}

/// Distribute `pool` points over the nodes of `scores`.
pub fn distribute(scores: &Scores, pool: u64) -> Result<Allocation, VouchError> {
    distribute_over(std::iter::empty::<&str>(), scores, pool)
}

/// Distribute `pool` points over `nodes` together with every node in `scores`.
///
/// Nodes listed in `nodes` but absent from `scores` count as score 0 and
/// appear in the allocation with 0 points.
///
/// # Errors
/// Returns `VouchError::InvalidScore` if any score is negative or
/// non-finite.
pub fn distribute_over<'a, I>(nodes: I, scores: &Scores, pool: u64) -> Result<Allocation, VouchError>
where
    I: IntoIterator<Item = &'a str>,
{
    for (id, &score) in scores {
        if !score.is_finite() || score < 0.0 {
            return Err(VouchError::InvalidScore(format!(
                "score for {} must be finite and >= 0, got {}",
                id, score
            )));
        }
    }

    let mut points: BTreeMap<String, u64> = nodes.into_iter().map(|id| (id.to_string(), 0)).collect();
    for id in scores.keys() {
        points.entry(id.clone()).or_insert(0);
    }

    if pool == 0 {
        return Ok(Allocation {
            points,
            unallocated: 0,
        });
    }

    // Scores are taken relative to the largest one, so the total stays
    // finite (at most the node count) even when the raw sum would overflow.
    let peak = scores.values().copied().fold(0.0_f64, f64::max);
    let total: f64 = if peak > 0.0 {
        scores.values().map(|&score| score / peak).sum()
    } else {
        0.0
    };
    if total <= 0.0 {
        tracing::debug!(
            "Score vector is empty or sums to zero; leaving {} points unallocated across {} nodes",
            pool,
            points.len()
        );
        return Ok(Allocation {
            points,
            unallocated: pool,
        });
    }

    // Provisional floors. Only positive scores take part in the remainder
    // rounds, so a zero-score node never receives points.
    let pool_f = pool as f64;
    let mut shares: Vec<Share<'_>> = scores
        .iter()
        .filter(|(_, &score)| score > 0.0)
        .map(|(id, &score)| {
            let raw = pool_f * (score / peak / total);
            let floor = raw.floor();
            // `as` saturates, and a share can never exceed the pool.
            let provisional = (floor as u64).min(pool);
            Share {
                id: id.as_str(),
                points: provisional,
                remainder: raw - floor,
            }
        })
        .collect();

    let assigned: u128 = shares.iter().map(|s| s.points as u128).sum();
    let pool_wide = pool as u128;

    match assigned.cmp(&pool_wide) {
        Ordering::Less => {
            hand_out_shortfall(&mut shares, (pool_wide - assigned) as u64);
        }
        Ordering::Greater => {
            // Floating-point error pushed the floors above the pool.
            reclaim_surplus(&mut shares, (assigned - pool_wide) as u64);
        }
        Ordering::Equal => {}
    }

    for share in &shares {
        points.insert(share.id.to_string(), share.points);
    }

    Ok(Allocation {
        points,
        unallocated: 0,
    })
}

/// Largest remainder first, then ascending identifier.
fn by_largest_remainder(a: &Share<'_>, b: &Share<'_>) -> Ordering {
    b.remainder
        .partial_cmp(&a.remainder)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id.cmp(b.id))
}

fn hand_out_shortfall(shares: &mut [Share<'_>], shortfall: u64) {
    if shares.is_empty() {
        return;
    }
    shares.sort_by(by_largest_remainder);

    // Normally shortfall < shares.len(); the full rounds only matter when
    // float error on very large pools leaves more than one point per node.
    let n = shares.len() as u64;
    let full_rounds = shortfall / n;
    let rest = (shortfall % n) as usize;
    for (i, share) in shares.iter_mut().enumerate() {
        share.points += full_rounds;
        if i < rest {
            share.points += 1;
        }
    }
}

fn reclaim_surplus(shares: &mut [Share<'_>], mut surplus: u64) {
    shares.sort_by(|a, b| by_largest_remainder(b, a));
    while surplus > 0 {
        let mut progressed = false;
        for share in shares.iter_mut() {
            if surplus == 0 {
                break;
            }
            if share.points > 0 {
                share.points -= 1;
                surplus -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
}
