//! Citation graph model and construction
//!
//! The global graph is built once per dataset; working graphs are grown
//! from it by the expansion engine.

mod builder;
pub(crate) mod graph;
mod stats;

pub use builder::build_global_graph;
pub use graph::{ArticleNode, CitationEdge, CitationGraph, EdgeKind};
pub use stats::{GraphStats, RankedArticle};
