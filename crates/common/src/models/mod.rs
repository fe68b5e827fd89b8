//! Dataset models

mod article;
mod loader;

pub use article::{author_initials, extract_id, normalize_article_id, Article};
pub use loader::{load_articles, parse_articles};
