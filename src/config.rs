use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::corpus::{FAKE_FILE, TRUE_FILE};
use crate::model::artifacts;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override these values where a command takes them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding tfidf_vectorizer.json and fake_news_model.json
    pub model_dir: PathBuf,
    /// Directory holding True.csv and Fake.csv
    pub data_dir: PathBuf,
    /// Address the web server binds to (NEWSCHECK_BIND)
    pub bind_addr: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables. Everything has a default;
    /// only a malformed NEWSCHECK_PORT is an error.
    pub fn load() -> Result<Self> {
        let model_dir = env::var("NEWSCHECK_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| artifacts::default_model_dir());

        let port = match env::var("NEWSCHECK_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("NEWSCHECK_PORT must be a port number, got {raw:?}"))?,
            Err(_) => 8080,
        };

        Ok(Self {
            model_dir,
            data_dir: env::var("NEWSCHECK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            bind_addr: env::var("NEWSCHECK_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
        })
    }

    pub fn true_csv(&self) -> PathBuf {
        self.data_dir.join(TRUE_FILE)
    }

    pub fn fake_csv(&self) -> PathBuf {
        self.data_dir.join(FAKE_FILE)
    }

    /// Check that both trained artifacts exist.
    /// Call this before a one-shot prediction, where an unloaded model is useless.
    pub fn require_model(&self) -> Result<()> {
        if !artifacts::model_files_present(&self.model_dir) {
            anyhow::bail!(
                "Model artifacts not found in {}\n\
                 Run `newscheck train` to build them, or set NEWSCHECK_MODEL_DIR.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}
