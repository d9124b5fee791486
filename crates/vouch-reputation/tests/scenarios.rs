// crates/vouch-reputation/tests/scenarios.rs
//
// End-to-end scenarios for the reputation engine: build a graph, score it,
// distribute a pool, and check the engine-wide properties (mass
// conservation, exact allocation, determinism, seed advantage, clamping).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vouch_core::{PageRankConfig, Scores, TrustConfig};
use vouch_reputation::{DuplicateEdgePolicy, GraphComputer};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn config_with(seeds: &[&str], multiplier: f64, share: f64, decay: f64) -> PageRankConfig {
    let trust = TrustConfig::new(seeds.iter().copied(), multiplier, share, decay).unwrap();
    PageRankConfig::new(0.85, 100, 1e-6, 0.0, 1.0, trust).unwrap()
}

fn graph_from(edges: &[(&str, &str, f64)]) -> GraphComputer {
    let mut g = GraphComputer::new();
    for &(from, to, w) in edges {
        g.add_edge(from, to, w).unwrap();
    }
    g
}

/// Deterministic pseudo-random graph over `n` nodes.
fn synthetic_graph(n: u32, salt: u32) -> GraphComputer {
    let mut g = GraphComputer::with_policy(DuplicateEdgePolicy::Allow);
    for i in 0..n {
        for j in 0..n {
            let h = (i * 31 + j * 17 + salt * 7) % 11;
            if h < 3 {
                let weight = ((i + j + salt) % 5) as f64 / 4.0;
                g.add_edge(&format!("n{}", i), &format!("n{}", j), weight).unwrap();
            }
        }
    }
    g
}

fn total(scores: &Scores) -> f64 {
    scores.values().sum()
}

/// Prior share of one node, given how many of `nodes` are seeds.
fn own_prior(share: f64, seeds: usize, nodes: usize, is_seed: bool) -> f64 {
    if seeds == 0 || seeds == nodes {
        1.0 / nodes as f64
    } else if is_seed {
        share / seeds as f64
    } else {
        (1.0 - share) / (nodes - seeds) as f64
    }
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn seeded_attester_outranks_mutual_pair() {
    let g = graph_from(&[("A", "B", 1.0), ("B", "A", 1.0), ("C", "A", 0.5)]);
    let config = config_with(&["C"], 2.0, 0.5, 0.5);

    let scores = g.calculate_pagerank(&config);
    assert_eq!(scores.len(), 3);
    assert!(scores["C"] > scores["A"], "C={} A={}", scores["C"], scores["A"]);
    assert!(scores["C"] > scores["B"], "C={} B={}", scores["C"], scores["B"]);
    assert!((total(&scores) - 1.0).abs() < 1e-9);

    let alloc = g.distribute_points(&scores, 1000).unwrap();
    let keys: Vec<&str> = alloc.points.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["A", "B", "C"]);
    assert_eq!(alloc.allocated(), 1000);
    assert_eq!(alloc.unallocated, 0);
    assert!(alloc.get("C") > alloc.get("A"));
    assert!(alloc.get("C") > alloc.get("B"));
    assert!(alloc.points.values().all(|&p| p > 0));
}

#[test]
fn empty_graph_yields_empty_results() {
    let g = GraphComputer::new();
    let scores = g.calculate_pagerank(&PageRankConfig::default());
    assert!(scores.is_empty());

    let alloc = g.distribute_points(&Scores::new(), 500).unwrap();
    assert!(alloc.points.is_empty());
    assert_eq!(alloc.unallocated, 500);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn scores_sum_to_one_across_graphs() {
    for salt in 0..6 {
        for n in [1u32, 2, 5, 12, 25] {
            let g = synthetic_graph(n, salt);
            let seeds: Vec<String> = (0..n).filter(|i| i % 4 == 0).map(|i| format!("n{}", i)).collect();
            let trust = TrustConfig::new(seeds, 1.5, 0.3, 0.7).unwrap();
            let config = PageRankConfig::default().with_trust(trust).unwrap();
            let scores = g.calculate_pagerank(&config);
            if g.is_empty() {
                assert!(scores.is_empty());
                continue;
            }
            assert!(
                (total(&scores) - 1.0).abs() < 1e-9,
                "n={} salt={} sum={}",
                n,
                salt,
                total(&scores)
            );
            assert!(scores.values().all(|&s| s >= 0.0));
        }
    }
}

#[test]
fn allocation_sums_exactly_to_pool() {
    let g = synthetic_graph(20, 3);
    let config = config_with(&["n0", "n7"], 2.0, 0.5, 0.5);
    let scores = g.calculate_pagerank(&config);
    for pool in [0u64, 1, 19, 20, 21, 997, 1_000_000, 18_446_744_073] {
        let alloc = g.distribute_points(&scores, pool).unwrap();
        assert_eq!(alloc.allocated(), pool, "pool {}", pool);
        assert_eq!(alloc.unallocated, 0);
    }
}

#[test]
fn repeated_solves_are_identical() {
    let g = synthetic_graph(15, 1);
    let config = config_with(&["n3"], 2.0, 0.5, 0.5);
    let first = g.calculate_pagerank(&config);
    let second = g.calculate_pagerank(&config);
    assert_eq!(first, second);
}

#[test]
fn insertion_order_does_not_change_scores() {
    let edges = [
        ("alice", "bob", 1.0),
        ("bob", "carol", 0.5),
        ("carol", "alice", 0.75),
        ("dave", "alice", 0.25),
        ("carol", "dave", 1.0),
    ];
    let forward = graph_from(&edges);
    let mut reversed_edges = edges;
    reversed_edges.reverse();
    let backward = graph_from(&reversed_edges);

    let config = config_with(&["carol"], 2.0, 0.4, 0.6);
    assert_eq!(forward.calculate_pagerank(&config), backward.calculate_pagerank(&config));
}

#[test]
fn becoming_a_seed_never_lowers_score() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut checked = 0;
    for round in 0..400 {
        let n = rng.gen_range(2..=8usize);
        let density = [0.15, 0.3, 0.5][rng.gen_range(0..3)];
        let mut g = GraphComputer::new();
        for i in 0..n {
            for j in 0..n {
                if i != j && rng.gen_bool(density) {
                    let weight = [0.0, 0.25, 0.5, 1.0, 1.5, 3.0][rng.gen_range(0..6)];
                    g.add_edge(&format!("n{}", i), &format!("n{}", j), weight).unwrap();
                }
            }
        }
        let mut nodes = g.nodes().to_vec();
        nodes.sort();
        if nodes.len() < 2 {
            continue;
        }

        let seeds: Vec<&str> = nodes
            .iter()
            .map(String::as_str)
            .filter(|_| rng.gen_bool(0.4))
            .collect();
        let candidates: Vec<&str> = nodes
            .iter()
            .map(String::as_str)
            .filter(|id| !seeds.contains(id))
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let x = candidates[rng.gen_range(0..candidates.len())];
        let share = [0.1, 0.3, 0.5, 0.7, 0.9][rng.gen_range(0..5)];
        let decay = [0.0, 0.3, 0.5, 1.0][rng.gen_range(0..4)];
        let multiplier = [1.0, 2.0, 5.0][rng.gen_range(0..3)];

        // Promotion that shrinks x's own prior share is not an advantage.
        let k = seeds.len();
        if own_prior(share, k + 1, nodes.len(), true) < own_prior(share, k, nodes.len(), false) {
            continue;
        }

        let without = g.calculate_pagerank(&config_with(&seeds, multiplier, share, decay));
        let mut promoted = seeds.clone();
        promoted.push(x);
        let with = g.calculate_pagerank(&config_with(&promoted, multiplier, share, decay));
        assert!(
            with[x] >= without[x] - 1e-12,
            "round {}: {} as seed scored {} < {} as non-seed (seeds {:?}, share {}, decay {}, multiplier {})",
            round,
            x,
            with[x],
            without[x],
            seeds,
            share,
            decay,
            multiplier
        );
        checked += 1;
    }
    assert!(checked > 100, "only {} promotions checked", checked);
}

#[test]
fn promoted_seed_fed_by_another_seed_keeps_its_score() {
    let g = graph_from(&[
        ("n0", "n1", 1.5),
        ("n1", "n0", 1.0),
        ("n2", "n0", 0.0),
        ("n4", "n2", 1.0),
        ("n2", "n4", 0.5),
    ]);
    let fed = g.calculate_pagerank(&config_with(&["n4"], 2.0, 0.5, 0.5));
    let promoted = g.calculate_pagerank(&config_with(&["n4", "n2"], 2.0, 0.5, 0.5));
    assert!(promoted["n2"] >= fed["n2"] - 1e-12, "{} < {}", promoted["n2"], fed["n2"]);
}

#[test]
fn effective_weights_stay_within_clamp() {
    let g = synthetic_graph(12, 2);
    let trust = TrustConfig::new(["n0", "n5"], 5.0, 0.5, 0.5).unwrap();
    let config = PageRankConfig::new(0.85, 100, 1e-6, 0.3, 0.8, trust).unwrap();
    let edges = g.effective_edges(&config);
    assert_eq!(edges.len(), g.edge_count());
    for e in edges {
        assert!(
            (0.3..=0.8).contains(&e.effective_weight),
            "{} -> {} has effective weight {}",
            e.from,
            e.to,
            e.effective_weight
        );
    }
}

#[test]
fn zero_pool_gives_zero_to_every_scored_node() {
    let g = synthetic_graph(8, 4);
    let scores = g.calculate_pagerank(&PageRankConfig::default());
    let alloc = g.distribute_points(&scores, 0).unwrap();
    for id in scores.keys() {
        assert_eq!(alloc.points.get(id), Some(&0));
    }
    assert_eq!(alloc.unallocated, 0);
}

// ---------------------------------------------------------------------------
// Trust behaviour
// ---------------------------------------------------------------------------

#[test]
fn sybil_cluster_cut_off_from_seeds_fades() {
    let mut g = GraphComputer::new();
    for (a, b) in [("h1", "h2"), ("h2", "h3"), ("h3", "h1"), ("h2", "h1")] {
        g.add_edge(a, b, 1.0).unwrap();
    }
    for (a, b) in [("s1", "s2"), ("s2", "s3"), ("s3", "s1"), ("s1", "s3")] {
        g.add_edge(a, b, 1.0).unwrap();
    }
    let scores = g.calculate_pagerank(&config_with(&["h1"], 2.0, 0.5, 0.5));

    let sybil: f64 = ["s1", "s2", "s3"].iter().map(|id| scores[*id]).sum();
    assert!(sybil < 1e-3, "sybil cluster kept {}", sybil);
    for honest in ["h1", "h2", "h3"] {
        assert!(scores[honest] > scores["s1"]);
    }
}

#[test]
fn stronger_decay_starves_unreachable_nodes() {
    let g = graph_from(&[("seed", "a", 1.0), ("a", "seed", 1.0), ("x", "y", 1.0), ("y", "x", 1.0)]);
    let gentle = g.calculate_pagerank(&config_with(&["seed"], 2.0, 0.5, 1.0));
    let strict = g.calculate_pagerank(&config_with(&["seed"], 2.0, 0.5, 0.5));
    assert!(strict["x"] < gentle["x"]);
}

#[test]
fn seeds_absent_from_graph_change_nothing() {
    let g = synthetic_graph(10, 5);
    let plain = g.calculate_pagerank(&config_with(&[], 2.0, 0.5, 0.5));
    let phantom = g.calculate_pagerank(&config_with(&["not-in-graph"], 2.0, 0.5, 0.5));
    assert_eq!(plain, phantom);
}

#[test]
fn duplicate_policy_changes_weighting() {
    let build = |policy| {
        let mut g = GraphComputer::with_policy(policy);
        g.add_edge("a", "b", 0.2).unwrap();
        g.add_edge("a", "b", 0.2).unwrap();
        g.add_edge("a", "c", 0.3).unwrap();
        g.add_edge("b", "a", 1.0).unwrap();
        g.add_edge("c", "a", 1.0).unwrap();
        g
    };
    let config = PageRankConfig::default();
    let summed = build(DuplicateEdgePolicy::Sum).calculate_pagerank(&config);
    let overwritten = build(DuplicateEdgePolicy::Overwrite).calculate_pagerank(&config);
    // a -> b carries 0.4 against a -> c's 0.3 when summed, 0.2 when overwritten.
    assert!(summed["b"] > summed["c"]);
    assert!(overwritten["b"] < overwritten["c"]);
}
