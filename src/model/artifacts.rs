// Model artifact files: the contract between `newscheck train` and every
// process that serves predictions.
//
// Two JSON files live side by side in the model directory:
// 1. tfidf_vectorizer.json: vocabulary, idf weights, n-gram settings
// 2. fake_news_model.json: logistic regression weights and intercept
//
// Each file wraps its payload in an envelope carrying a format version and
// the training timestamp. The classifier's width must equal the vectorizer's
// vocabulary size; a mismatch is reported at load time and surfaces as an
// internal failure on every prediction.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::logistic::LogisticRegression;
use crate::features::tfidf::TfidfVectorizer;

pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const CLASSIFIER_FILE: &str = "fake_news_model.json";

/// Bumped whenever the serialized layout changes incompatibly.
pub const FORMAT_VERSION: u32 = 1;

/// On-disk envelope around a fitted artifact.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactFile<T> {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    pub artifact: T,
}

/// Returns the default directory for storing model artifacts.
/// Uses the platform data directory: ~/.local/share/newscheck/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newscheck")
        .join("models")
}

pub fn vectorizer_path(dir: &Path) -> PathBuf {
    dir.join(VECTORIZER_FILE)
}

pub fn classifier_path(dir: &Path) -> PathBuf {
    dir.join(CLASSIFIER_FILE)
}

/// Check whether both artifact files exist.
pub fn model_files_present(dir: &Path) -> bool {
    vectorizer_path(dir).exists() && classifier_path(dir).exists()
}

/// Write both artifacts into `dir`, creating it if needed.
/// Returns the two paths written (vectorizer, classifier).
pub fn save_artifacts(
    dir: &Path,
    vectorizer: &TfidfVectorizer,
    classifier: &LogisticRegression,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    let trained_at = Utc::now();
    let vec_path = vectorizer_path(dir);
    let clf_path = classifier_path(dir);

    write_artifact(&vec_path, vectorizer, trained_at)?;
    write_artifact(&clf_path, classifier, trained_at)?;

    info!(
        vectorizer = %vec_path.display(),
        classifier = %clf_path.display(),
        "Saved model artifacts"
    );
    Ok((vec_path, clf_path))
}

fn write_artifact<T: Serialize>(path: &Path, artifact: &T, trained_at: DateTime<Utc>) -> Result<()> {
    let file = ArtifactFile {
        format_version: FORMAT_VERSION,
        trained_at,
        artifact,
    };
    let json = serde_json::to_string(&file)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<ArtifactFile<T>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: ArtifactFile<T> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    if file.format_version != FORMAT_VERSION {
        anyhow::bail!(
            "{} has format version {}, expected {}. Re-run `newscheck train`.",
            path.display(),
            file.format_version,
            FORMAT_VERSION
        );
    }
    Ok(file)
}

/// Load and validate the fitted vectorizer from `dir`.
pub fn load_vectorizer(dir: &Path) -> Result<ArtifactFile<TfidfVectorizer>> {
    let file: ArtifactFile<TfidfVectorizer> = read_artifact(&vectorizer_path(dir))?;
    file.artifact.validate()?;
    Ok(file)
}

/// Load the fitted classifier from `dir`.
pub fn load_classifier(dir: &Path) -> Result<ArtifactFile<LogisticRegression>> {
    read_artifact(&classifier_path(dir))
}
