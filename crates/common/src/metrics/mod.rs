//! Metrics and observability utilities
//!
//! Metric descriptions and recording helpers under a common prefix.
//! Recording is a no-op until a recorder is installed (the CLI installs a
//! Prometheus recorder when asked to emit metrics).

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all CiteGraph metrics
pub const METRICS_PREFIX: &str = "citegraph";

/// Histogram buckets for algorithm runtimes (in seconds)
///
/// Betweenness on a few thousand nodes lands in the upper range.
pub const ALGORITHM_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.025,  // 25ms
    0.100,  // 100ms
    0.250,  // 250ms
    1.000,  // 1s
    5.000,  // 5s
    30.00,  // 30s
    120.0,  // 2min
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Dataset metrics
    describe_counter!(
        format!("{}_articles_loaded_total", METRICS_PREFIX),
        Unit::Count,
        "Total article records accepted by the loader"
    );

    describe_histogram!(
        format!("{}_dataset_load_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Dataset load latency in seconds"
    );

    // Graph metrics
    describe_gauge!(
        format!("{}_graph_nodes", METRICS_PREFIX),
        Unit::Count,
        "Number of nodes in a graph"
    );

    describe_gauge!(
        format!("{}_graph_citation_edges", METRICS_PREFIX),
        Unit::Count,
        "Number of citation edges in a graph"
    );

    describe_counter!(
        format!("{}_dangling_references_total", METRICS_PREFIX),
        Unit::Count,
        "References dropped because the cited work is outside the dataset"
    );

    // Expansion metrics
    describe_counter!(
        format!("{}_expansions_total", METRICS_PREFIX),
        Unit::Count,
        "Total expansion requests"
    );

    describe_counter!(
        format!("{}_expansion_nodes_added_total", METRICS_PREFIX),
        Unit::Count,
        "Nodes copied into working graphs by expansion"
    );

    // Algorithm metrics
    describe_histogram!(
        format!("{}_algorithm_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Graph algorithm latency in seconds"
    );

    tracing::debug!("Metrics registered");
}

/// Helper to time a graph algorithm
pub struct AlgorithmTimer {
    start: Instant,
    algorithm: &'static str,
}

impl AlgorithmTimer {
    /// Start timing an algorithm run
    pub fn start(algorithm: &'static str) -> Self {
        Self {
            start: Instant::now(),
            algorithm,
        }
    }

    /// Record completion, returning the elapsed seconds
    pub fn finish(self, node_count: usize) -> f64 {
        let duration = self.start.elapsed().as_secs_f64();

        histogram!(
            format!("{}_algorithm_duration_seconds", METRICS_PREFIX),
            "algorithm" => self.algorithm
        )
        .record(duration);

        tracing::debug!(
            algorithm = self.algorithm,
            nodes = node_count,
            elapsed_secs = duration,
            "Algorithm finished"
        );

        duration
    }
}

/// Helper to record dataset loading
pub fn record_dataset_load(duration_secs: f64, articles: usize) {
    counter!(format!("{}_articles_loaded_total", METRICS_PREFIX)).increment(articles as u64);

    histogram!(format!("{}_dataset_load_duration_seconds", METRICS_PREFIX)).record(duration_secs);
}

/// Helper to record the size of a graph
pub fn record_graph_size(graph: &'static str, nodes: usize, citation_edges: usize) {
    gauge!(
        format!("{}_graph_nodes", METRICS_PREFIX),
        "graph" => graph
    )
    .set(nodes as f64);

    gauge!(
        format!("{}_graph_citation_edges", METRICS_PREFIX),
        "graph" => graph
    )
    .set(citation_edges as f64);
}

/// Helper to record references dropped during construction
pub fn record_dangling_references(count: usize) {
    counter!(format!("{}_dangling_references_total", METRICS_PREFIX)).increment(count as u64);
}

/// Helper to record an expansion
pub fn record_expansion(h_index: usize, nodes_added: usize) {
    let outcome = if h_index == 0 { "empty" } else { "expanded" };

    counter!(
        format!("{}_expansions_total", METRICS_PREFIX),
        "outcome" => outcome
    )
    .increment(1);

    counter!(format!("{}_expansion_nodes_added_total", METRICS_PREFIX)).increment(nodes_added as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_buckets() {
        let mut prev = 0.0;
        for &bucket in ALGORITHM_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_helpers_without_recorder() {
        register_metrics();
        let timer = AlgorithmTimer::start("test");
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(timer.finish(3) > 0.0);

        record_dataset_load(0.1, 10);
        record_graph_size("global", 10, 12);
        record_dangling_references(4);
        record_expansion(0, 0);
    }
}
