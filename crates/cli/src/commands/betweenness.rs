//! Rank working graph articles by betweenness centrality.

use citegraph_analytics::{betweenness, rank_by_betweenness};
use citegraph_common::Result;
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use super::{expand_seeds, run_blocking, Context, SeedExpansion};
use super::expand::print_expansions;

#[derive(Debug, Clone, Serialize)]
pub struct ScoredArticle {
    pub id: String,
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct BetweennessReport {
    pub expansions: Vec<SeedExpansion>,
    pub working_nodes: usize,
    pub ranking: Vec<ScoredArticle>,
}

pub async fn run(ctx: &Context, seeds: &[String], top: Option<usize>) -> Result<()> {
    let top = top.unwrap_or(ctx.config.analysis.top);
    let global = ctx.load_global().await?;
    let (working, expansions) = expand_seeds(&global, seeds)?;

    info!(nodes = working.node_count(), "Computing betweenness");
    let ranked = run_blocking(working.clone(), |snapshot| rank_by_betweenness(&betweenness(&snapshot))).await?;

    let ranking = ranked
        .into_iter()
        .take(top)
        .map(|(id, score)| ScoredArticle {
            label: working.node(&id).map(|n| n.label().to_string()).unwrap_or_default(),
            id,
            score,
        })
        .collect();

    let report = BetweennessReport {
        expansions,
        working_nodes: working.node_count(),
        ranking,
    };

    ctx.emit(&report, print)
}

fn print(report: &BetweennessReport) {
    println!("{}", "Expansion".bold());
    print_expansions(&report.expansions);
    println!();
    println!(
        "{} (top {} of {})",
        "Betweenness centrality".bold(),
        report.ranking.len(),
        report.working_nodes
    );

    for (rank, article) in report.ranking.iter().enumerate() {
        println!(
            "  {:>3}. {:<14} {:<6} {:>10.3}",
            rank + 1,
            article.id.cyan(),
            article.label,
            article.score
        );
    }
}
