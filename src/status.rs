// System status: artifact load state for the health endpoint and
// the `newscheck status` command.

use std::path::Path;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::inference::Predictor;
use crate::model::artifacts;

/// Load state of a single artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentState {
    #[serde(rename = "loaded")]
    Loaded,
    #[serde(rename = "not loaded")]
    NotLoaded,
}

impl ComponentState {
    pub fn from_loaded(loaded: bool) -> Self {
        if loaded {
            ComponentState::Loaded
        } else {
            ComponentState::NotLoaded
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentState::Loaded => "loaded",
            ComponentState::NotLoaded => "not loaded",
        }
    }
}

impl std::fmt::Display for ComponentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Health response: the service answers "OK" even when artifacts are
/// missing, the per-artifact fields say whether predictions can work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model: ComponentState,
    pub vectorizer: ComponentState,
}

impl HealthStatus {
    pub fn new(model: ComponentState, vectorizer: ComponentState) -> Self {
        Self {
            status: "OK".to_string(),
            model,
            vectorizer,
        }
    }
}

/// Display system status to the terminal.
pub fn show(predictor: &Predictor, model_dir: &Path) {
    println!("Model directory: {}", model_dir.display());

    let health = predictor.health();
    print_component(
        "Vectorizer",
        health.vectorizer,
        &artifacts::vectorizer_path(model_dir),
    );
    print_component(
        "Classifier",
        health.model,
        &artifacts::classifier_path(model_dir),
    );

    if predictor.is_ready() {
        println!("\n{}", "Ready to classify.".green().bold());
    } else {
        println!("\nPredictions are disabled until both artifacts load.");
        println!("  Run `newscheck train` to build them");
    }
}

fn print_component(name: &str, state: ComponentState, path: &Path) {
    let state_str = match state {
        ComponentState::Loaded => state.as_str().green().to_string(),
        ComponentState::NotLoaded => state.as_str().red().to_string(),
    };
    let size = std::fs::metadata(path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "missing".to_string());
    println!("{name}: {state_str} ({}, {size})", path.display());
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["B", "KB", "MB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
