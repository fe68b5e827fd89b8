//! Global graph construction from article records

use super::{ArticleNode, CitationGraph, EdgeKind};
use citegraph_common::metrics::{record_dangling_references, record_graph_size, AlgorithmTimer};
use citegraph_common::models::extract_id;
use citegraph_common::Article;
use std::sync::Arc;
use tracing::{debug, info};

/// Build the global citation graph from the full article list.
///
/// 1. One node per article, keyed by its extracted id (later duplicates are ignored).
/// 2. A citation edge for every reference whose target is also in the dataset;
///    references to works outside the dataset are dropped.
/// 3. Connectivity edges chaining all node ids in lexicographic order.
pub fn build_global_graph<I>(articles: I) -> CitationGraph
where
    I: IntoIterator,
    I::Item: Into<Arc<Article>>,
{
    let timer = AlgorithmTimer::start("build_global_graph");
    let articles: Vec<Arc<Article>> = articles.into_iter().map(Into::into).collect();
    let mut graph = CitationGraph::new();

    for article in &articles {
        graph.add_node(ArticleNode::from_article(Arc::clone(article)));
    }

    let mut dangling = 0usize;
    for article in &articles {
        let from = article.numeric_id();

        for reference in &article.referenced_works {
            let to = extract_id(reference);

            if graph.contains_node(from) && graph.contains_node(to) {
                graph.add_edge(from, to, EdgeKind::Citation);
            } else {
                dangling += 1;
            }
        }
    }

    if dangling > 0 {
        debug!(dangling, "Dropped references to works outside the dataset");
        record_dangling_references(dangling);
    }

    let mut sorted: Vec<String> = graph.node_ids().map(str::to_string).collect();
    sorted.sort_unstable();

    for pair in sorted.windows(2) {
        graph.add_edge(&pair[0], &pair[1], EdgeKind::Connectivity);
    }

    info!(
        articles = articles.len(),
        nodes = graph.node_count(),
        citation_edges = graph.citation_edge_count(),
        "Global citation graph built"
    );
    record_graph_size("global", graph.node_count(), graph.citation_edge_count());
    timer.finish(graph.node_count());

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::CitationEdge;

    fn article(id: &str, refs: &[&str]) -> Article {
        Article {
            id: format!("https://openalex.org/{}", id),
            title: format!("Article {}", id),
            authors: vec!["Grace Hopper".to_string()],
            referenced_works: refs
                .iter()
                .map(|r| format!("https://openalex.org/{}", r))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_drops_dangling_references() {
        let graph = build_global_graph(vec![
            article("W3", &["W1", "W99"]),
            article("W1", &["W2"]),
            article("W2", &[]),
        ]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.citation_edge_count(), 2);
        assert!(graph.contains_edge(&CitationEdge::new("W3", "W1", EdgeKind::Citation)));
        assert!(graph.contains_edge(&CitationEdge::new("W1", "W2", EdgeKind::Citation)));
        assert!(!graph.edges().iter().any(|e| e.to == "W99"));
        assert_eq!(graph.node("W3").unwrap().label(), "G.H.");
    }

    #[test]
    fn test_connectivity_chain_in_sorted_order() {
        let graph = build_global_graph(vec![
            article("W3", &[]),
            article("W10", &[]),
            article("W2", &[]),
        ]);

        let chain: Vec<(&str, &str)> = graph
            .connectivity_edges()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();

        // Lexicographic, not numeric
        assert_eq!(chain, vec![("W10", "W2"), ("W2", "W3")]);
        assert_eq!(graph.citation_edge_count(), 0);
    }

    #[test]
    fn test_duplicate_articles_keep_first_node() {
        let mut second = article("W1", &["W2"]);
        second.title = "Duplicate".to_string();

        let graph = build_global_graph(vec![article("W1", &[]), second, article("W2", &[])]);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node("W1").unwrap().article().title, "Article W1");
        // References of the duplicate record still count
        assert_eq!(graph.outgoing_citation_count("W1"), 1);
    }

    #[test]
    fn test_empty_dataset() {
        let graph = build_global_graph(Vec::<Article>::new());
        assert!(graph.is_empty());
        assert!(graph.edges().is_empty());
    }
}
