//! Dataset loading
//!
//! The dataset is a JSON array of article objects. Each element is decoded
//! on its own so that one malformed record does not sink the whole load.

use super::Article;
use crate::errors::{AppError, Result};
use crate::metrics::record_dataset_load;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Load articles from a JSON file
pub fn load_articles(path: impl AsRef<Path>) -> Result<Vec<Article>> {
    let path = path.as_ref();
    let start = Instant::now();

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::DatasetNotFound {
            path: path.display().to_string(),
        },
        _ => AppError::Io(e),
    })?;

    let articles = parse_articles(&content)?;

    info!(
        path = %path.display(),
        articles = articles.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Dataset loaded"
    );
    record_dataset_load(start.elapsed().as_secs_f64(), articles.len());

    Ok(articles)
}

/// Parse articles from an in-memory JSON array
pub fn parse_articles(content: &str) -> Result<Vec<Article>> {
    let value: Value = serde_json::from_str(content)?;

    let Value::Array(records) = value else {
        return Err(AppError::InvalidFormat {
            message: "dataset must be a JSON array of articles".to_string(),
        });
    };

    let total = records.len();
    let mut articles = Vec::with_capacity(total);

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Article>(record) {
            Ok(article) if article.id.trim().is_empty() => {
                warn!(index, "Skipping article without id");
            }
            Ok(article) => articles.push(article),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed article");
            }
        }
    }

    debug!(total, kept = articles.len(), "Parsed article records");

    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DATASET: &str = r#"[
        {
            "id": "https://openalex.org/W1",
            "title": "Graph Theory",
            "year": 2001,
            "authors": ["Ada Lovelace"],
            "referenced_works": ["https://openalex.org/W2"]
        },
        {"id": "https://openalex.org/W2", "title": "Peeling", "year": "not a year"},
        {"title": "No id at all"},
        {"id": "  "},
        {"id": "https://openalex.org/W3", "year": 1999}
    ]"#;

    #[test]
    fn test_parse_skips_malformed_records() {
        let articles = parse_articles(DATASET).unwrap();

        let ids: Vec<&str> = articles.iter().map(|a| a.numeric_id()).collect();
        assert_eq!(ids, vec!["W1", "W3"]);
        assert_eq!(articles[0].title, "Graph Theory");
        assert_eq!(articles[1].year, 1999);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_articles(r#"{"id": "W1"}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidFormat { .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_articles("[{").unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();

        let articles = load_articles(file.path()).unwrap();
        assert_eq!(articles.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_articles("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AppError::DatasetNotFound { .. }));
    }
}
