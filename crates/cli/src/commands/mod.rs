//! CLI command implementations.

pub mod betweenness;
pub mod expand;
pub mod kcore;
pub mod stats;

use citegraph_analytics::{build_global_graph, CitationGraph, GraphExpander, HIndexResult, NodeRoles};
use citegraph_common::models::{load_articles, normalize_article_id};
use citegraph_common::{AppConfig, AppError, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Settings shared by every command
pub struct Context {
    pub config: AppConfig,
    pub dataset: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    pub fn new(config: AppConfig, dataset: Option<PathBuf>, json: bool) -> Self {
        Self { config, dataset, json }
    }

    /// Dataset path: the command line wins over configuration
    pub fn dataset_path(&self) -> Result<PathBuf> {
        self.dataset
            .clone()
            .or_else(|| self.config.dataset.path.clone())
            .ok_or_else(|| AppError::Validation {
                message: "no dataset given; pass --dataset or set dataset.path".to_string(),
                field: Some("dataset".to_string()),
            })
    }

    /// Load the dataset and build the global graph on a blocking worker
    pub async fn load_global(&self) -> Result<CitationGraph> {
        let path = self.dataset_path()?;
        info!(path = %path.display(), "Loading dataset");

        tokio::task::spawn_blocking(move || -> Result<CitationGraph> {
            let articles = load_articles(&path)?;
            Ok(build_global_graph(articles))
        })
        .await
        .map_err(join_error)?
    }

    /// Print `value` as pretty JSON, or fall back to the text renderer
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text(value);
        }
        Ok(())
    }
}

/// Outcome of expanding around one seed
#[derive(Debug, Clone, Serialize)]
pub struct SeedExpansion {
    pub seed: String,
    #[serde(flatten)]
    pub result: HIndexResult,
}

/// Normalize every seed and make sure it exists in the global graph
pub fn resolve_seeds(global: &CitationGraph, seeds: &[String]) -> Result<Vec<String>> {
    seeds
        .iter()
        .map(|raw| {
            let id = normalize_article_id(raw).ok_or_else(|| AppError::Validation {
                message: format!("'{}' is not an article id", raw),
                field: Some("seed".to_string()),
            })?;

            if global.contains_node(&id) {
                Ok(id)
            } else {
                Err(AppError::ArticleNotFound { id })
            }
        })
        .collect()
}

/// Grow a fresh working graph seed by seed
pub fn expand_seeds(global: &CitationGraph, seeds: &[String]) -> Result<(CitationGraph, Vec<SeedExpansion>)> {
    let seeds = resolve_seeds(global, seeds)?;
    let expander = GraphExpander::new(global);
    let mut working = CitationGraph::new();

    let expansions = seeds
        .into_iter()
        .map(|seed| {
            let result = expander.expand(&mut working, &seed);
            SeedExpansion { seed, result }
        })
        .collect();

    Ok((working, expansions))
}

/// Highlight expansions in order; seeds with H-index 0 leave the roles as they were
pub fn expansion_roles(working: &CitationGraph, expansions: &[SeedExpansion]) -> NodeRoles {
    let mut roles = NodeRoles::new();
    for expansion in expansions.iter().filter(|e| e.result.h_index > 0) {
        roles.apply_expansion(working, &expansion.seed, &expansion.result);
    }
    roles
}

/// Last seed that actually expanded the working graph
pub fn last_expanded_seed(expansions: &[SeedExpansion]) -> Option<&str> {
    expansions
        .iter()
        .rev()
        .find(|e| e.result.h_index > 0)
        .map(|e| e.seed.as_str())
}

/// Run CPU-heavy work on an owned snapshot off the runtime threads
pub async fn run_blocking<T, F>(snapshot: CitationGraph, work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(CitationGraph) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(snapshot))
        .await
        .map_err(join_error)
}

fn join_error(err: tokio::task::JoinError) -> AppError {
    AppError::Internal {
        message: format!("worker task failed: {}", err),
    }
}
