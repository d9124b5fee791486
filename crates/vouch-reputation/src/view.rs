// crates/vouch-reputation/src/view.rs
//
// Read-only, canonically ordered adjacency view of the attestation graph.
//
// Nodes are renumbered 0..N in ascending identifier order and both edge
// directions are stored in Compressed Sparse Row form. Every summation the
// solver performs walks these arrays front to back, so results do not
// depend on hash-map iteration order or on node insertion order.

use vouch_core::PageRankConfig;

use crate::graph::GraphComputer;

/// One entry of an adjacency list: the node at the other end, the stored
/// edge it came from, and its effective weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Link {
    pub node: usize,
    pub edge: usize,
    pub weight: f64,
}

#[derive(Debug)]
pub(crate) struct TrustView<'a> {
    /// Identifier of each canonical position.
    ids: Vec<&'a str>,
    is_seed: Vec<bool>,
    /// Offsets into `out_links`. Length = N + 1.
    out_offsets: Vec<usize>,
    out_links: Vec<Link>,
    /// Offsets into `in_links`. Length = N + 1.
    in_offsets: Vec<usize>,
    in_links: Vec<Link>,
    /// Sum of effective outgoing weights per node.
    out_weight: Vec<f64>,
}

impl<'a> TrustView<'a> {
    /// Build the view, applying the seed multiplier and weight clamp of
    /// `config` to every edge.
    pub fn build(graph: &'a GraphComputer, config: &PageRankConfig) -> Self {
        let nodes = graph.nodes();
        let n = nodes.len();
        let trust = config.trust();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| nodes[a].cmp(&nodes[b]));
        let mut position = vec![0usize; n];
        for (pos, &idx) in order.iter().enumerate() {
            position[idx] = pos;
        }

        let ids: Vec<&'a str> = order.iter().map(|&idx| nodes[idx].as_str()).collect();
        let is_seed: Vec<bool> = ids.iter().map(|id| trust.is_trusted(id)).collect();

        // (source, target, edge, effective weight)
        let mut entries: Vec<(usize, usize, usize, f64)> = graph
            .edge_records()
            .iter()
            .enumerate()
            .map(|(edge, record)| {
                let src = position[record.from];
                let dst = position[record.to];
                let multiplier = if is_seed[src] {
                    trust.trust_multiplier()
                } else {
                    1.0
                };
                (src, dst, edge, config.clamp_weight(record.weight * multiplier))
            })
            .collect();

        entries.sort_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));
        let out_offsets = offsets(entries.iter().map(|e| e.0), n);
        let out_links: Vec<Link> = entries
            .iter()
            .map(|&(_, dst, edge, weight)| Link { node: dst, edge, weight })
            .collect();

        let mut out_weight = vec![0.0_f64; n];
        for &(src, _, _, weight) in &entries {
            out_weight[src] += weight;
        }

        entries.sort_by(|a, b| (a.1, a.0, a.2).cmp(&(b.1, b.0, b.2)));
        let in_offsets = offsets(entries.iter().map(|e| e.1), n);
        let in_links: Vec<Link> = entries
            .iter()
            .map(|&(src, _, edge, weight)| Link { node: src, edge, weight })
            .collect();

        Self {
            ids,
            is_seed,
            out_offsets,
            out_links,
            in_offsets,
            in_links,
            out_weight,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn id(&self, pos: usize) -> &'a str {
        self.ids[pos]
    }

    pub fn ids(&self) -> &[&'a str] {
        &self.ids
    }

    pub fn is_seed(&self, pos: usize) -> bool {
        self.is_seed[pos]
    }

    pub fn seed_flags(&self) -> &[bool] {
        &self.is_seed
    }

    /// Number of trusted seeds present in the graph.
    pub fn seed_count(&self) -> usize {
        self.is_seed.iter().filter(|&&s| s).count()
    }

    /// Total effective outgoing weight. Zero marks a dangling node.
    pub fn out_weight(&self, pos: usize) -> f64 {
        self.out_weight[pos]
    }

    pub fn successors(&self, pos: usize) -> &[Link] {
        &self.out_links[self.out_offsets[pos]..self.out_offsets[pos + 1]]
    }

    pub fn predecessors(&self, pos: usize) -> &[Link] {
        &self.in_links[self.in_offsets[pos]..self.in_offsets[pos + 1]]
    }

    /// All edges as (source, target, edge, effective weight), grouped by source.
    pub fn out_edges(&self) -> impl Iterator<Item = (usize, usize, usize, f64)> + '_ {
        (0..self.len()).flat_map(move |src| {
            self.successors(src)
                .iter()
                .map(move |link| (src, link.node, link.edge, link.weight))
        })
    }
}

/// CSR offsets for a sorted key sequence over `n` nodes.
fn offsets(keys: impl Iterator<Item = usize>, n: usize) -> Vec<usize> {
    let mut offsets = vec![0usize; n + 1];
    for key in keys {
        offsets[key + 1] += 1;
    }
    for i in 0..n {
        offsets[i + 1] += offsets[i];
    }
    offsets
}
