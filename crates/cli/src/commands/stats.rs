//! Show global graph statistics.

use citegraph_analytics::{GraphStats, RankedArticle};
use citegraph_common::Result;
use colored::Colorize;

use super::Context;

pub async fn run(ctx: &Context) -> Result<()> {
    let global = ctx.load_global().await?;
    let stats = GraphStats::collect(&global);

    ctx.emit(&stats, print)
}

fn print(stats: &GraphStats) {
    println!("{}", "Citation Graph Statistics".bold());
    println!("{}", "=".repeat(40));
    println!("  Articles:            {}", stats.node_count);
    println!("  Citation edges:      {}", stats.citation_edge_count);
    println!("  Connectivity edges:  {}", stats.connectivity_edge_count);
    println!();
    println!("  Most cited:          {}", describe(stats.most_cited.as_ref(), "citations"));
    println!("  Most referencing:    {}", describe(stats.most_referencing.as_ref(), "references"));
}

fn describe(article: Option<&RankedArticle>, unit: &str) -> String {
    match article {
        Some(a) => format!("{} ({} {})", a.id.cyan(), a.count, unit),
        None => "-".dimmed().to_string(),
    }
}
