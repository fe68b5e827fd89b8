//! Citation graph representation
//!
//! Typed, directed multigraph over articles. Nodes live in a single table
//! addressed by index; the article key maps to that index. Adjacency lists
//! only ever hold citation edges whose endpoints both exist, while the edge
//! list records every edge that was added.

use citegraph_common::Article;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

/// Kind of an edge in the citation graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// A real reference from one article to another
    Citation,

    /// Synthetic edge keeping the dataset traversable; ignored by every metric
    Connectivity,
}

/// Edge in the citation graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitationEdge {
    /// Citing article key
    pub from: String,

    /// Cited article key
    pub to: String,

    pub kind: EdgeKind,
}

impl CitationEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    pub fn is_citation(&self) -> bool {
        self.kind == EdgeKind::Citation
    }
}

/// Article node
#[derive(Debug, Clone)]
pub struct ArticleNode {
    id: String,
    article: Arc<Article>,
    label: String,

    /// Indices of nodes citing this one
    incoming: Vec<usize>,

    /// Indices of nodes this one cites
    outgoing: Vec<usize>,
}

impl ArticleNode {
    pub fn new(id: impl Into<String>, article: Arc<Article>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            article,
            label: label.into(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Node keyed by the article's extracted id and labelled with the
    /// first author's initials
    pub fn from_article(article: Arc<Article>) -> Self {
        let id = article.numeric_id().to_string();
        let label = article.author_initials();
        Self::new(id, article, label)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn article(&self) -> &Arc<Article> {
        &self.article
    }

    /// Display label (first author's initials)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Copy of this node without adjacency
    pub fn detached(&self) -> Self {
        Self::new(self.id.clone(), Arc::clone(&self.article), self.label.clone())
    }
}

/// In-memory citation graph
#[derive(Debug, Default)]
pub struct CitationGraph {
    /// Node table
    nodes: Vec<ArticleNode>,

    /// Article key -> position in the node table
    index: HashMap<String, usize>,

    /// Every edge ever added, in insertion order
    edges: Vec<CitationEdge>,

    /// Positions of connectivity edges in `edges`
    connectivity: Vec<usize>,

    /// Membership of (from, to, kind) triples
    edge_set: HashSet<CitationEdge>,

    /// Memoized inbound citation counts
    inbound_cache: Mutex<HashMap<String, usize>>,
}

impl CitationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless its key is already present.
    ///
    /// Adjacency carried by the node is discarded; it is rebuilt from the
    /// edges added to this graph. Returns whether the node was inserted.
    pub fn add_node(&mut self, mut node: ArticleNode) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }

        node.incoming.clear();
        node.outgoing.clear();

        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Add an edge to the graph
    ///
    /// The edge is always recorded in the edge list. Citation edges reach the
    /// adjacency lists only when both endpoints exist.
    pub fn add_edge(&mut self, from: &str, to: &str, kind: EdgeKind) {
        let edge = CitationEdge::new(from, to, kind);

        if kind == EdgeKind::Connectivity {
            self.connectivity.push(self.edges.len());
        } else {
            if let (Some(&f), Some(&t)) = (self.index.get(from), self.index.get(to)) {
                self.nodes[f].outgoing.push(t);
                self.nodes[t].incoming.push(f);
            }

            self.inbound_cache
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(to);
        }

        self.edge_set.insert(edge.clone());
        self.edges.push(edge);
    }

    /// Get a node by key
    pub fn node(&self, id: &str) -> Option<&ArticleNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Check whether the exact (from, to, kind) triple was added
    pub fn contains_edge(&self, edge: &CitationEdge) -> bool {
        self.edge_set.contains(edge)
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &ArticleNode> {
        self.nodes.iter()
    }

    /// Get all node keys in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get every edge in insertion order
    pub fn edges(&self) -> &[CitationEdge] {
        &self.edges
    }

    pub fn citation_edges(&self) -> impl Iterator<Item = &CitationEdge> {
        self.edges.iter().filter(|e| e.is_citation())
    }

    pub fn connectivity_edges(&self) -> impl Iterator<Item = &CitationEdge> {
        self.connectivity.iter().map(|&i| &self.edges[i])
    }

    /// Get keys of articles citing this one, in the order the edges were added
    pub fn incoming(&self, id: &str) -> impl Iterator<Item = &str> {
        self.ids_at(self.node(id).map(|n| n.incoming.as_slice()))
    }

    /// Get keys of articles cited by this one
    pub fn outgoing(&self, id: &str) -> impl Iterator<Item = &str> {
        self.ids_at(self.node(id).map(|n| n.outgoing.as_slice()))
    }

    fn ids_at<'a>(&'a self, indices: Option<&'a [usize]>) -> impl Iterator<Item = &'a str> + 'a {
        indices
            .unwrap_or(&[])
            .iter()
            .map(move |&i| self.nodes[i].id.as_str())
    }

    /// Deduplicated union of citing and cited articles
    pub fn undirected_citation_neighbors(&self, id: &str) -> Vec<&str> {
        let Some(&i) = self.index.get(id) else {
            return Vec::new();
        };

        self.neighbor_indices(i)
            .into_iter()
            .map(|j| self.nodes[j].id.as_str())
            .collect()
    }

    /// Number of citation edges ending at `id`
    pub fn incoming_citation_count(&self, id: &str) -> usize {
        let mut cache = self.inbound_cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(&count) = cache.get(id) {
            return count;
        }

        let count = self.citation_edges().filter(|e| e.to == id).count();
        cache.insert(id.to_string(), count);
        count
    }

    /// Number of citation edges starting at `id`; scans the edge list
    pub fn outgoing_citation_count(&self, id: &str) -> usize {
        self.citation_edges().filter(|e| e.from == id).count()
    }

    pub fn citation_edge_count(&self) -> usize {
        self.edges.len() - self.connectivity.len()
    }

    /// Drop memoized counts
    pub fn clear_cache(&mut self) {
        self.inbound_cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Copy of this graph where every citation edge (u, v) appears as both
    /// (u, v) and (v, u). Connectivity edges are dropped.
    pub fn to_undirected_citation_graph(&self) -> CitationGraph {
        let mut undirected = CitationGraph::new();

        for node in &self.nodes {
            undirected.add_node(node.detached());
        }

        for edge in self.citation_edges() {
            undirected.add_edge(&edge.from, &edge.to, EdgeKind::Citation);
            undirected.add_edge(&edge.to, &edge.from, EdgeKind::Citation);
        }

        undirected
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn id_at(&self, index: usize) -> &str {
        &self.nodes[index].id
    }

    /// Distinct undirected citation neighbors of the node at `index`, in
    /// first-seen order (incoming before outgoing)
    pub(crate) fn neighbor_indices(&self, index: usize) -> Vec<usize> {
        let node = &self.nodes[index];
        let mut seen = HashSet::with_capacity(node.incoming.len() + node.outgoing.len());

        node.incoming
            .iter()
            .chain(node.outgoing.iter())
            .copied()
            .filter(|&j| seen.insert(j))
            .collect()
    }

    /// Undirected citation adjacency for every node, indexed like the node table
    pub(crate) fn undirected_adjacency(&self) -> Vec<Vec<usize>> {
        (0..self.nodes.len()).map(|i| self.neighbor_indices(i)).collect()
    }

    #[cfg(test)]
    pub(crate) fn is_count_cached(&self, id: &str) -> bool {
        self.inbound_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }
}

impl Clone for CitationGraph {
    fn clone(&self) -> Self {
        let cache = self
            .inbound_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        Self {
            nodes: self.nodes.clone(),
            index: self.index.clone(),
            edges: self.edges.clone(),
            connectivity: self.connectivity.clone(),
            edge_set: self.edge_set.clone(),
            inbound_cache: Mutex::new(cache),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn node(id: &str) -> ArticleNode {
        let article = Article {
            id: format!("https://openalex.org/{}", id),
            authors: vec!["Test Author".to_string()],
            ..Default::default()
        };
        ArticleNode::from_article(Arc::new(article))
    }

    /// Graph with the given nodes and citation edges
    pub(crate) fn graph(ids: &[&str], citations: &[(&str, &str)]) -> CitationGraph {
        let mut graph = CitationGraph::new();
        for id in ids {
            graph.add_node(node(id));
        }
        for (from, to) in citations {
            graph.add_edge(from, to, EdgeKind::Citation);
        }
        graph
    }

    #[test]
    fn test_graph_construction() {
        // A cites B, B cites C
        let graph = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.outgoing("A").collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(graph.incoming("B").collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(graph.outgoing("B").collect::<Vec<_>>(), vec!["C"]);
        assert_eq!(graph.node("A").unwrap().label(), "T.A.");
    }

    #[test]
    fn test_duplicate_node_is_noop() {
        let mut graph = graph(&["A"], &[]);
        assert!(!graph.add_node(node("A")));
        assert!(graph.add_node(node("B")));
        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_edge_to_unknown_node_is_recorded_but_not_adjacent() {
        let mut graph = graph(&["A"], &[]);
        graph.add_edge("A", "Z", EdgeKind::Citation);

        assert_eq!(graph.edges().len(), 1);
        assert_eq!(graph.outgoing("A").count(), 0);
        assert!(graph.undirected_citation_neighbors("A").is_empty());
        assert!(graph.undirected_citation_neighbors("Z").is_empty());
    }

    #[test]
    fn test_connectivity_edges_stay_out_of_adjacency() {
        let mut graph = graph(&["A", "B"], &[]);
        graph.add_edge("A", "B", EdgeKind::Connectivity);

        assert_eq!(graph.connectivity_edges().count(), 1);
        assert_eq!(graph.citation_edge_count(), 0);
        assert!(graph.undirected_citation_neighbors("A").is_empty());
        assert_eq!(graph.incoming_citation_count("B"), 0);
        assert!(graph.contains_edge(&CitationEdge::new("A", "B", EdgeKind::Connectivity)));
        assert!(!graph.contains_edge(&CitationEdge::new("A", "B", EdgeKind::Citation)));
    }

    #[test]
    fn test_citation_counts() {
        // Both A and C cite B
        let graph = graph(&["A", "B", "C"], &[("A", "B"), ("C", "B")]);

        assert_eq!(graph.incoming_citation_count("B"), 2);
        assert_eq!(graph.outgoing_citation_count("A"), 1);
        assert_eq!(graph.outgoing_citation_count("B"), 0);
        assert_eq!(graph.incoming_citation_count("missing"), 0);
    }

    #[test]
    fn test_inbound_cache_invalidated_on_new_citation() {
        let mut graph = graph(&["A", "B", "C"], &[("A", "B")]);

        assert_eq!(graph.incoming_citation_count("B"), 1);
        assert!(graph.is_count_cached("B"));

        graph.add_edge("C", "B", EdgeKind::Citation);
        assert!(!graph.is_count_cached("B"));
        assert_eq!(graph.incoming_citation_count("B"), 2);

        // Connectivity edges leave the cache alone
        graph.add_edge("A", "B", EdgeKind::Connectivity);
        assert!(graph.is_count_cached("B"));
        assert_eq!(graph.incoming_citation_count("B"), 2);

        graph.clear_cache();
        assert!(!graph.is_count_cached("B"));
    }

    #[test]
    fn test_undirected_neighbors_deduplicated() {
        // A and B cite each other, A cites B twice
        let graph = graph(&["A", "B", "C"], &[("A", "B"), ("B", "A"), ("A", "B"), ("C", "A")]);

        let mut neighbors = graph.undirected_citation_neighbors("A");
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec!["B", "C"]);

        // Multigraph: repeated references stay in the incoming list
        assert_eq!(graph.incoming("B").count(), 2);
        assert_eq!(graph.incoming_citation_count("B"), 2);
    }

    #[test]
    fn test_to_undirected_citation_graph() {
        let mut directed = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        directed.add_edge("A", "B", EdgeKind::Connectivity);
        directed.add_edge("B", "C", EdgeKind::Connectivity);

        let undirected = directed.to_undirected_citation_graph();

        assert_eq!(
            undirected.node_ids().collect::<Vec<_>>(),
            directed.node_ids().collect::<Vec<_>>()
        );
        assert_eq!(undirected.edges().len(), 4);
        assert_eq!(undirected.connectivity_edges().count(), 0);
        for (from, to) in [("A", "B"), ("B", "A"), ("B", "C"), ("C", "B")] {
            assert!(undirected.contains_edge(&CitationEdge::new(from, to, EdgeKind::Citation)));
        }
        assert_eq!(undirected.incoming_citation_count("B"), 2);
        assert_eq!(undirected.outgoing_citation_count("B"), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = graph(&["A", "B"], &[("A", "B")]);
        let mut snapshot = original.clone();
        snapshot.add_node(node("C"));
        snapshot.add_edge("C", "B", EdgeKind::Citation);

        assert_eq!(original.node_count(), 2);
        assert_eq!(original.incoming_citation_count("B"), 1);
        assert_eq!(snapshot.incoming_citation_count("B"), 2);
    }

    #[test]
    fn test_graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CitationGraph>();
    }
}
