//! Expand a working graph around seed articles.

use citegraph_analytics::{CitationGraph, NodeRole, NodeRoles};
use citegraph_common::Result;
use colored::Colorize;
use serde::Serialize;

use super::{expand_seeds, expansion_roles, Context, SeedExpansion};

/// Working graph node as printed
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub id: String,
    pub label: String,
    pub title: String,
    pub year: i32,
    pub role: NodeRole,
}

#[derive(Debug, Serialize)]
pub struct ExpandReport {
    pub expansions: Vec<SeedExpansion>,
    pub citation_edges: usize,
    pub connectivity_edges: usize,
    pub nodes: Vec<NodeSummary>,
}

pub async fn run(ctx: &Context, seeds: &[String]) -> Result<()> {
    let global = ctx.load_global().await?;
    let (working, expansions) = expand_seeds(&global, seeds)?;

    let roles = expansion_roles(&working, &expansions);

    let report = ExpandReport {
        citation_edges: working.citation_edge_count(),
        connectivity_edges: working.connectivity_edges().count(),
        nodes: summarize(&working, &roles),
        expansions,
    };

    ctx.emit(&report, print)
}

pub(crate) fn summarize(working: &CitationGraph, roles: &NodeRoles) -> Vec<NodeSummary> {
    working
        .nodes()
        .map(|node| NodeSummary {
            id: node.id().to_string(),
            label: node.label().to_string(),
            title: node.article().title.clone(),
            year: node.article().year,
            role: roles.role(node.id()),
        })
        .collect()
}

pub(crate) fn print_expansions(expansions: &[SeedExpansion]) {
    for e in expansions {
        if e.result.h_index == 0 {
            println!("  {}  nothing to expand (H-index 0)", e.seed.cyan());
        } else {
            println!(
                "  {}  H-index {}  core {}  median {:.1}",
                e.seed.cyan(),
                e.result.h_index.to_string().bold(),
                e.result.h_core.len(),
                e.result.h_median
            );
        }
    }
}

fn print(report: &ExpandReport) {
    println!("{}", "Expansion".bold());
    print_expansions(&report.expansions);
    println!();
    println!(
        "{} {} articles, {} citation edges, {} connectivity edges",
        "Working graph:".bold(),
        report.nodes.len(),
        report.citation_edges,
        report.connectivity_edges
    );

    for node in &report.nodes {
        let marker = match node.role {
            NodeRole::HCore => "h".green(),
            NodeRole::Seed => "s".yellow(),
            _ => " ".normal(),
        };
        println!("  {} {:<14} {:<6} {:>4}  {}", marker, node.id, node.label, node.year, node.title);
    }
}
