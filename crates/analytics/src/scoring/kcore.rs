//! K-core decomposition
//!
//! Degrees count distinct undirected citation neighbors. Callers pass the
//! result of [`CitationGraph::to_undirected_citation_graph`].

use crate::citation::CitationGraph;
use citegraph_common::metrics::AlgorithmTimer;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::num::NonZeroUsize;

/// Find the k-core: the nodes left after repeatedly removing every node
/// with fewer than `k` neighbors among the remaining ones.
pub fn k_core(graph: &CitationGraph, k: NonZeroUsize) -> HashSet<String> {
    let timer = AlgorithmTimer::start("k_core");
    let k = k.get();
    let adjacency = graph.undirected_adjacency();
    let mut alive = vec![true; graph.node_count()];

    loop {
        let degrees: Vec<usize> = adjacency
            .iter()
            .map(|neighbors| neighbors.iter().filter(|&&j| alive[j]).count())
            .collect();

        let mut removed = false;
        for (i, &degree) in degrees.iter().enumerate() {
            if alive[i] && degree < k {
                alive[i] = false;
                removed = true;
            }
        }

        if !removed {
            break;
        }
    }

    let core: HashSet<String> = alive
        .iter()
        .enumerate()
        .filter(|&(_, &a)| a)
        .map(|(i, _)| graph.id_at(i).to_string())
        .collect();

    tracing::debug!(k, size = core.len(), "K-core computed");
    timer.finish(graph.node_count());

    core
}

/// Core number of every node: the largest k whose k-core contains it.
///
/// Peels nodes in order of current degree, so a node's core number is the
/// highest degree seen at removal time.
pub fn core_numbers(graph: &CitationGraph) -> HashMap<String, usize> {
    let timer = AlgorithmTimer::start("core_numbers");
    let n = graph.node_count();
    let adjacency = graph.undirected_adjacency();

    let mut degree: Vec<usize> = adjacency.iter().map(Vec::len).collect();
    let mut removed = vec![false; n];
    let mut queue: BTreeSet<(usize, usize)> = (0..n).map(|i| (degree[i], i)).collect();
    let mut core = vec![0usize; n];
    let mut current = 0usize;

    while let Some((d, v)) = queue.pop_first() {
        current = current.max(d);
        core[v] = current;
        removed[v] = true;

        for &w in &adjacency[v] {
            if removed[w] {
                continue;
            }
            queue.remove(&(degree[w], w));
            degree[w] -= 1;
            queue.insert((degree[w], w));
        }
    }

    timer.finish(n);

    core.into_iter()
        .enumerate()
        .map(|(i, c)| (graph.id_at(i).to_string(), c))
        .collect()
}
