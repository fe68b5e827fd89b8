//! CiteGraph CLI - citation network analysis over an OpenAlex-style dataset.

mod commands;

use citegraph_common::errors::ErrorResponse;
use citegraph_common::metrics::{register_metrics, ALGORITHM_BUCKETS};
use citegraph_common::{AppConfig, AppError};
use clap::{Parser, Subcommand};
use colored::Colorize;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use commands::Context;

#[derive(Parser)]
#[command(name = "citegraph")]
#[command(author, version, about = "CiteGraph - H-index expansion and centrality over citation networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file layered above config/
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Dataset file (JSON array of articles); overrides the configured path
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Print a Prometheus snapshot of the recorded metrics to stderr
    #[arg(long, global = true)]
    emit_metrics: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show global graph statistics
    Stats,

    /// Expand a working graph around one or more seeds
    Expand {
        /// Seed article ids (e.g. W2741809807, 2741809807 or an OpenAlex URL)
        #[arg(required = true)]
        seeds: Vec<String>,
    },

    /// Rank working graph articles by betweenness centrality
    Betweenness {
        /// Seed article ids
        #[arg(required = true)]
        seeds: Vec<String>,

        /// Number of articles to print (default from config)
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Find the k-core of the working graph
    Kcore {
        /// Seed article ids
        #[arg(required = true)]
        seeds: Vec<String>,

        /// Minimum neighbor count (default from config)
        #[arg(short, long)]
        k: Option<NonZeroUsize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match AppConfig::load_with(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&AppError::from(e), cli.json),
    };

    init_tracing(&config, cli.verbose);
    tracing::debug!(version = citegraph_common::VERSION, "Starting CiteGraph");

    let metrics_handle = if cli.emit_metrics {
        Some(install_metrics()?)
    } else {
        None
    };

    let ctx = Context::new(config, cli.dataset, cli.json);

    let result = match cli.command {
        Commands::Stats => commands::stats::run(&ctx).await,
        Commands::Expand { seeds } => commands::expand::run(&ctx, &seeds).await,
        Commands::Betweenness { seeds, top } => commands::betweenness::run(&ctx, &seeds, top).await,
        Commands::Kcore { seeds, k } => commands::kcore::run(&ctx, &seeds, k).await,
    };

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => report(&err, ctx.json),
    }
}

fn report(err: &AppError, json: bool) -> anyhow::Result<ExitCode> {
    let response = ErrorResponse::from(err);
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        eprintln!("{} {}", "error:".red().bold(), response.error.message);
    }
    Ok(ExitCode::from(err.exit_code() as u8))
}

fn init_tracing(config: &AppConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level))
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.observability.json_logging {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn install_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Suffix("duration_seconds".to_string()), ALGORITHM_BUCKETS)?
        .install_recorder()?;

    register_metrics();
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kcore() {
        let cli = Cli::try_parse_from(["citegraph", "--dataset", "data.json", "kcore", "W1", "w2", "-k", "3"])
            .unwrap();

        assert_eq!(cli.dataset, Some(PathBuf::from("data.json")));
        match cli.command {
            Commands::Kcore { seeds, k } => {
                assert_eq!(seeds, vec!["W1", "w2"]);
                assert_eq!(k.map(NonZeroUsize::get), Some(3));
            }
            _ => panic!("expected kcore"),
        }
    }

    #[test]
    fn test_zero_k_rejected() {
        assert!(Cli::try_parse_from(["citegraph", "kcore", "W1", "-k", "0"]).is_err());
    }

    #[test]
    fn test_seed_required() {
        assert!(Cli::try_parse_from(["citegraph", "expand"]).is_err());
        assert!(Cli::try_parse_from(["citegraph", "betweenness", "--top", "5"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["citegraph", "stats", "--json", "-v"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Stats));
    }
}
