//! Find the k-core of the working graph.

use citegraph_analytics::{core_numbers, k_core, CitationGraph, NodeRole, NodeRoles};
use citegraph_common::Result;
use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;
use std::num::NonZeroUsize;

use super::expand::{print_expansions, summarize, NodeSummary};
use super::{expand_seeds, expansion_roles, last_expanded_seed, run_blocking, Context, SeedExpansion};

#[derive(Debug, Clone, Serialize)]
pub struct CoreMember {
    #[serde(flatten)]
    pub node: NodeSummary,
    pub core_number: usize,
}

#[derive(Debug, Serialize)]
pub struct KCoreReport {
    pub k: usize,
    pub expansions: Vec<SeedExpansion>,
    pub working_nodes: usize,
    pub members: Vec<CoreMember>,
}

pub async fn run(ctx: &Context, seeds: &[String], k: Option<NonZeroUsize>) -> Result<()> {
    let k = k.unwrap_or(ctx.config.analysis.k);
    let global = ctx.load_global().await?;
    let (working, expansions) = expand_seeds(&global, seeds)?;

    let (core, numbers) = run_blocking(working.clone(), move |snapshot| {
        let undirected = snapshot.to_undirected_citation_graph();
        (k_core(&undirected, k), core_numbers(&undirected))
    })
    .await?;

    let roles = core_roles(&working, &expansions, &core);

    let mut members: Vec<CoreMember> = summarize(&working, &roles)
        .into_iter()
        .filter(|node| node.role == NodeRole::KCore)
        .map(|node| CoreMember {
            core_number: numbers.get(&node.id).copied().unwrap_or(0),
            node,
        })
        .collect();
    members.sort_by(|a, b| b.core_number.cmp(&a.core_number).then_with(|| a.node.id.cmp(&b.node.id)));

    let report = KCoreReport {
        k: k.get(),
        expansions,
        working_nodes: working.node_count(),
        members,
    };

    ctx.emit(&report, print)
}

/// Expansion highlights with the k-core laid over them; the last expanded seed keeps its mark
fn core_roles(working: &CitationGraph, expansions: &[SeedExpansion], core: &HashSet<String>) -> NodeRoles {
    let mut roles = expansion_roles(working, expansions);
    roles.apply_k_core(working, core, last_expanded_seed(expansions));
    roles
}

fn print(report: &KCoreReport) {
    println!("{}", "Expansion".bold());
    print_expansions(&report.expansions);
    println!();

    if report.members.is_empty() {
        println!("{} is empty ({} working articles)", format!("{}-core", report.k).bold(), report.working_nodes);
        return;
    }

    println!(
        "{}: {} of {} working articles",
        format!("{}-core", report.k).bold(),
        report.members.len(),
        report.working_nodes
    );
    for member in &report.members {
        println!(
            "  {:<14} {:<6} core {:>2}  {}",
            member.node.id.cyan(),
            member.node.label,
            member.core_number,
            member.node.title
        );
    }
}
