//! H-index driven incremental expansion
//!
//! A working graph grows around user-chosen seeds. For a seed, the articles
//! citing it are ranked by their own citation counts in the global graph;
//! the H-core (the citers defining the seed's H-index) is copied into the
//! working graph, and the working graph's edges are re-derived so they
//! always equal the global edges induced by its node set.

use crate::citation::{CitationEdge, CitationGraph, EdgeKind};
use citegraph_common::metrics::{record_expansion, record_graph_size};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// H-index calculation result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HIndexResult {
    pub h_index: usize,

    /// Citing articles defining the index, most cited first
    pub h_core: Vec<String>,

    /// Median citation count within the H-core
    pub h_median: f64,
}

/// Expansion engine over a read-only global graph
pub struct GraphExpander<'a> {
    global: &'a CitationGraph,
}

impl<'a> GraphExpander<'a> {
    pub fn new(global: &'a CitationGraph) -> Self {
        Self { global }
    }

    /// Calculate the H-index of an article in the global graph.
    ///
    /// An unknown seed yields a zero result.
    pub fn h_index(&self, seed: &str) -> HIndexResult {
        let mut citers: Vec<(&str, usize)> = self
            .global
            .incoming(seed)
            .map(|citer| (citer, self.global.incoming_citation_count(citer)))
            .collect();

        // Stable: ties keep the order the citations were discovered in
        citers.sort_by(|a, b| b.1.cmp(&a.1));

        let counts: Vec<usize> = citers.iter().map(|&(_, c)| c).collect();
        let h = h_index_of(&counts);

        HIndexResult {
            h_index: h,
            h_core: citers[..h].iter().map(|&(id, _)| id.to_string()).collect(),
            h_median: median(&counts[..h]),
        }
    }

    /// Expand `working` around `seed`.
    ///
    /// Nothing is touched when the seed's H-index is zero. Otherwise every
    /// H-core article missing from `working` is copied in, then every global
    /// citation edge and connectivity edge between working nodes is added
    /// unless already present. Nodes and edges only ever grow.
    pub fn expand(&self, working: &mut CitationGraph, seed: &str) -> HIndexResult {
        let result = self.h_index(seed);

        if result.h_index == 0 {
            debug!(seed, "H-index is zero, nothing to expand");
            record_expansion(0, 0);
            return result;
        }

        let mut added = 0usize;
        for id in &result.h_core {
            if working.contains_node(id) {
                continue;
            }
            if let Some(node) = self.global.node(id) {
                working.add_node(node.detached());
                added += 1;
            }
        }

        let edges_before = working.edges().len();
        self.add_induced_edges(working, EdgeKind::Citation);
        self.add_induced_edges(working, EdgeKind::Connectivity);

        info!(
            seed,
            h_index = result.h_index,
            h_median = result.h_median,
            nodes_added = added,
            edges_added = working.edges().len() - edges_before,
            working_nodes = working.node_count(),
            "Working graph expanded"
        );
        record_expansion(result.h_index, added);
        record_graph_size("working", working.node_count(), working.citation_edge_count());

        result
    }

    fn add_induced_edges(&self, working: &mut CitationGraph, kind: EdgeKind) {
        let candidates: Box<dyn Iterator<Item = &CitationEdge> + '_> = match kind {
            EdgeKind::Citation => Box::new(self.global.citation_edges()),
            EdgeKind::Connectivity => Box::new(self.global.connectivity_edges()),
        };

        for edge in candidates {
            if working.contains_node(&edge.from)
                && working.contains_node(&edge.to)
                && !working.contains_edge(edge)
            {
                working.add_edge(&edge.from, &edge.to, kind);
            }
        }
    }
}

/// H-index of a descending sequence of citation counts: the largest `h`
/// such that the `h`-th count is at least `h`.
pub fn h_index_of(sorted_counts: &[usize]) -> usize {
    sorted_counts
        .iter()
        .enumerate()
        .take_while(|&(i, &c)| c > i)
        .count()
}

fn median(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }

    let mut sorted = counts.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    }
}
