//! CiteGraph analytics engine
//!
//! - Citation graph model and global graph construction
//! - H-index driven expansion of working graphs
//! - Betweenness centrality (Brandes)
//! - K-core decomposition
//!
//! Everything here is synchronous. Only [`GraphExpander::expand`] mutates a
//! graph, and only the working graph it is handed.

pub mod citation;
pub mod expansion;
pub mod roles;
pub mod scoring;

pub use citation::{
    build_global_graph, ArticleNode, CitationEdge, CitationGraph, EdgeKind, GraphStats, RankedArticle,
};
pub use expansion::{GraphExpander, HIndexResult};
pub use roles::{NodeRole, NodeRoles};
pub use scoring::{betweenness, core_numbers, k_core, rank_by_betweenness};
