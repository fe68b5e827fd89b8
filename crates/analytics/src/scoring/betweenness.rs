//! Betweenness centrality (Brandes' algorithm)
//!
//! Citation edges are followed in both directions; connectivity edges are
//! ignored. Every unordered pair is visited once from each endpoint, so the
//! accumulated totals are halved.

use crate::citation::CitationGraph;
use citegraph_common::metrics::AlgorithmTimer;
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

/// Compute betweenness centrality for every node.
///
/// Runs in O(V·E); call it off any latency-sensitive thread.
pub fn betweenness(graph: &CitationGraph) -> HashMap<String, f64> {
    let timer = AlgorithmTimer::start("betweenness");
    let n = graph.node_count();
    let adjacency = graph.undirected_adjacency();
    let mut centrality = vec![0.0_f64; n];

    // Buffers reused across sources
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1_i64; n];
    let mut delta = vec![0.0_f64; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        for v in &order {
            sigma[*v] = 0.0;
            dist[*v] = -1;
            delta[*v] = 0.0;
            predecessors[*v].clear();
        }
        order.clear();

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            order.push(v);

            for &w in &adjacency[v] {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Farthest first
        for &w in order.iter().rev() {
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }

    timer.finish(n);

    centrality
        .into_iter()
        .enumerate()
        .map(|(i, c)| (graph.id_at(i).to_string(), c / 2.0))
        .collect()
}

/// Scores sorted descending; ties ordered by id
pub fn rank_by_betweenness(scores: &HashMap<String, f64>) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = scores.iter().map(|(id, &s)| (id.clone(), s)).collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::graph::tests::graph;
    use crate::citation::EdgeKind;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_path_graph() {
        // A -> B -> C -> D
        let g = graph(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);
        let scores = betweenness(&g);

        assert!(approx(scores["A"], 0.0));
        assert!(approx(scores["B"], 2.0));
        assert!(approx(scores["C"], 2.0));
        assert!(approx(scores["D"], 0.0));
    }

    #[test]
    fn test_star_graph() {
        // Leaves all cite the hub
        let g = graph(
            &["H", "L1", "L2", "L3", "L4"],
            &[("L1", "H"), ("L2", "H"), ("L3", "H"), ("L4", "H")],
        );
        let scores = betweenness(&g);

        // C(4, 2) leaf pairs all route through the hub
        assert!(approx(scores["H"], 6.0));
        for leaf in ["L1", "L2", "L3", "L4"] {
            assert!(approx(scores[leaf], 0.0));
        }
    }

    #[test]
    fn test_split_shortest_paths() {
        // Square A-B-C-D-A: two shortest paths between opposite corners
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        );
        let scores = betweenness(&g);

        for id in ["A", "B", "C", "D"] {
            assert!(approx(scores[id], 0.5));
        }
    }

    #[test]
    fn test_direction_and_duplicates_ignored() {
        // Reciprocal and repeated citations between A and B, B cites C
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "A"), ("A", "B"), ("B", "C")]);
        let scores = betweenness(&g);

        assert!(approx(scores["B"], 1.0));
        assert!(approx(scores["A"], 0.0));
    }

    #[test]
    fn test_connectivity_edges_ignored_and_isolated_nodes_zero() {
        let mut g = graph(&["A", "B", "C", "I"], &[("A", "B"), ("B", "C")]);
        g.add_edge("C", "I", EdgeKind::Connectivity);
        g.add_edge("I", "A", EdgeKind::Connectivity);

        let scores = betweenness(&g);

        assert_eq!(scores.len(), 4);
        assert!(approx(scores["I"], 0.0));
        assert!(approx(scores["B"], 1.0));
        assert!(scores.values().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_empty_graph() {
        assert!(betweenness(&CitationGraph::new()).is_empty());
    }

    #[test]
    fn test_rank_by_betweenness() {
        let scores = HashMap::from([
            ("W2".to_string(), 1.5),
            ("W1".to_string(), 1.5),
            ("W3".to_string(), 4.0),
            ("W4".to_string(), 0.0),
        ]);

        let ranked = rank_by_betweenness(&scores);
        let ids: Vec<&str> = ranked.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["W3", "W1", "W2", "W4"]);
    }
}
