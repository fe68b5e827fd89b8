//! Summary statistics over a citation graph

use super::CitationGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Article with an associated count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedArticle {
    pub id: String,
    pub count: usize,
}

/// Graph-level statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub citation_edge_count: usize,
    pub connectivity_edge_count: usize,

    /// Article with the most incoming citations
    pub most_cited: Option<RankedArticle>,

    /// Article with the most outgoing references
    pub most_referencing: Option<RankedArticle>,
}

impl GraphStats {
    /// Collect statistics; ties go to the earliest inserted node
    pub fn collect(graph: &CitationGraph) -> Self {
        let mut outgoing: HashMap<&str, usize> = HashMap::new();
        for edge in graph.citation_edges() {
            *outgoing.entry(edge.from.as_str()).or_default() += 1;
        }

        let most_cited = top_by(graph, |id| graph.incoming_citation_count(id));
        let most_referencing = top_by(graph, |id| outgoing.get(id).copied().unwrap_or(0));

        Self {
            node_count: graph.node_count(),
            citation_edge_count: graph.citation_edge_count(),
            connectivity_edge_count: graph.connectivity_edges().count(),
            most_cited,
            most_referencing,
        }
    }
}

fn top_by(graph: &CitationGraph, count: impl Fn(&str) -> usize) -> Option<RankedArticle> {
    let mut best: Option<RankedArticle> = None;

    for id in graph.node_ids() {
        let c = count(id);
        if best.as_ref().map_or(true, |b| c > b.count) {
            best = Some(RankedArticle {
                id: id.to_string(),
                count: c,
            });
        }
    }

    best
}
