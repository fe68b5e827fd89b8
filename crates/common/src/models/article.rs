//! Article record and identifier helpers

use serde::{Deserialize, Serialize};

/// A research article as it appears in the dataset
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// URL-like identifier, e.g. `https://openalex.org/W2741809807`
    pub id: String,

    #[serde(default)]
    pub doi: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub year: i32,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default)]
    pub venue: Option<String>,

    #[serde(default)]
    pub keywords: Option<Vec<String>>,

    /// URL-like identifiers of the works this article cites
    #[serde(default)]
    pub referenced_works: Vec<String>,
}

impl Article {
    /// Graph key of this article
    pub fn numeric_id(&self) -> &str {
        extract_id(&self.id)
    }

    /// Initials of the first author
    pub fn author_initials(&self) -> String {
        author_initials(&self.authors)
    }
}

/// Extract the key after the last `/` of a URL-like identifier.
///
/// Returns the input unchanged when it has no `/` or ends with one.
pub fn extract_id(url: &str) -> &str {
    match url.rfind('/') {
        Some(pos) if pos + 1 < url.len() => &url[pos + 1..],
        _ => url,
    }
}

/// Normalize user input into a graph key: trimmed, upper-cased and
/// carrying the `W` prefix.
pub fn normalize_article_id(input: &str) -> Option<String> {
    let trimmed = extract_id(input.trim()).trim();
    if trimmed.is_empty() {
        return None;
    }

    let upper = trimmed.to_uppercase();
    if upper.starts_with('W') {
        Some(upper)
    } else {
        Some(format!("W{}", upper))
    }
}

/// Initials of the first author in `A.B.` form, or `?` when unavailable
pub fn author_initials(authors: &[String]) -> String {
    let Some(first) = authors.first() else {
        return "?".to_string();
    };

    let initials: String = first
        .split([' ', '-'])
        .filter_map(|part| part.chars().next())
        .filter(|c| c.is_alphabetic())
        .flat_map(|c| c.to_uppercase().chain(std::iter::once('.')))
        .collect();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_id() {
        assert_eq!(extract_id("https://openalex.org/W2741809807"), "W2741809807");
        assert_eq!(extract_id("W123"), "W123");
        assert_eq!(extract_id("https://openalex.org/"), "https://openalex.org/");
        assert_eq!(extract_id(""), "");
    }

    #[test]
    fn test_normalize_article_id() {
        assert_eq!(normalize_article_id("  w42 "), Some("W42".to_string()));
        assert_eq!(normalize_article_id("42"), Some("W42".to_string()));
        assert_eq!(normalize_article_id("https://openalex.org/W7"), Some("W7".to_string()));
        assert_eq!(normalize_article_id("   "), None);
    }

    #[test]
    fn test_author_initials() {
        let authors = vec!["jean-paul sartre".to_string(), "Simone".to_string()];
        assert_eq!(author_initials(&authors), "J.P.S.");
        assert_eq!(author_initials(&["Ada Lovelace".to_string()]), "A.L.");
        assert_eq!(author_initials(&[]), "?");
        assert_eq!(author_initials(&["  ".to_string()]), "?");
        assert_eq!(author_initials(&["42 99".to_string()]), "?");
    }

    #[test]
    fn test_article_deserialize_defaults() {
        let article: Article = serde_json::from_str(
            r#"{"id": "https://openalex.org/W1", "referenced_works": ["https://openalex.org/W2"]}"#,
        )
        .unwrap();

        assert_eq!(article.numeric_id(), "W1");
        assert_eq!(article.year, 0);
        assert!(article.authors.is_empty());
        assert_eq!(article.referenced_works.len(), 1);
        assert_eq!(article.author_initials(), "?");
    }
}
