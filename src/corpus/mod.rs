// Labeled news corpora: loading True.csv / Fake.csv for training, and
// pulling cleaned sample articles out of them.
//
// Both files share the same layout: a header row with at least `title` and
// `text` columns, usually followed by `subject` and `date`. Every row of
// True.csv is labeled Real and every row of Fake.csv is labeled Fake.

pub mod examples;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::model::traits::NewsClass;

pub const TRUE_FILE: &str = "True.csv";
pub const FAKE_FILE: &str = "Fake.csv";

/// One CSV row. Missing columns and empty cells come through as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Article {
    /// Title and body joined by a space, the document the model sees.
    pub fn combined_text(&self) -> String {
        let title = self.title.as_deref().unwrap_or("");
        let text = self.text.as_deref().unwrap_or("");
        format!("{title} {text}")
    }
}

/// A raw document with its class.
#[derive(Debug, Clone)]
pub struct LabeledDocument {
    pub text: String,
    pub class: NewsClass,
}

/// Read up to `limit` articles (all when `None`) from a CSV file.
pub fn read_articles(path: &Path, limit: Option<usize>) -> Result<Vec<Article>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?;
    if !headers.iter().any(|h| h == "title" || h == "text") {
        anyhow::bail!(
            "{} has no `title` or `text` column (found: {})",
            path.display(),
            headers.iter().collect::<Vec<_>>().join(", ")
        );
    }

    let mut articles = Vec::new();
    for (row, record) in reader.deserialize::<Article>().enumerate() {
        if limit.is_some_and(|n| articles.len() >= n) {
            break;
        }
        let article = record
            .with_context(|| format!("Malformed row {} in {}", row + 2, path.display()))?;
        articles.push(article);
    }
    Ok(articles)
}

/// Load both corpora into one labeled list: Real articles first, then Fake.
pub fn load_corpus(true_path: &Path, fake_path: &Path) -> Result<Vec<LabeledDocument>> {
    let real = read_articles(true_path, None)?;
    info!(articles = real.len(), path = %true_path.display(), "Loaded real news corpus");

    let fake = read_articles(fake_path, None)?;
    info!(articles = fake.len(), path = %fake_path.display(), "Loaded fake news corpus");

    let labeled = |articles: Vec<Article>, class: NewsClass| {
        articles.into_iter().map(move |a| LabeledDocument {
            text: a.combined_text(),
            class,
        })
    };

    Ok(labeled(real, NewsClass::Real)
        .chain(labeled(fake, NewsClass::Fake))
        .collect())
}
