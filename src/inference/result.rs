// Prediction outputs and the typed errors that can replace them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::traits::{ClassProbabilities, NewsClass};

/// Why a prediction could not be produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    /// One of the artifacts was not loaded at startup. Names the missing one.
    #[error("model not loaded: {0} unavailable")]
    NotLoaded(&'static str),

    /// The caller sent nothing usable (used by the HTTP layer for blank forms).
    #[error("{0}")]
    MalformedInput(String),

    /// Anything that went wrong inside vectorization or classification.
    #[error("prediction failed: {0}")]
    InternalFailure(String),
}

/// A successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class: NewsClass,
    /// Probability of `class` (the argmax), in [0.5, 1.0]
    pub probability: f64,
    pub probabilities: ClassProbabilities,
    pub processed_text: String,
}

/// Label reported to callers. `Error` stands in for any failed prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Real,
    Fake,
    Error,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "Real",
            Label::Fake => "Fake",
            Label::Error => "Error",
        }
    }
}

impl From<NewsClass> for Label {
    fn from(class: NewsClass) -> Self {
        match class {
            NewsClass::Real => Label::Real,
            NewsClass::Fake => Label::Fake,
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flat, always-well-formed result handed to request handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Label,
    /// Confidence in `label`; 0.0 for errors
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_text: Option<String>,
}

impl PredictionResult {
    pub fn is_error(&self) -> bool {
        self.label == Label::Error
    }
}

impl From<Prediction> for PredictionResult {
    fn from(p: Prediction) -> Self {
        Self {
            label: p.class.into(),
            probability: p.probability,
            error: None,
            processed_text: Some(p.processed_text),
        }
    }
}

impl From<PredictError> for PredictionResult {
    fn from(e: PredictError) -> Self {
        Self {
            label: Label::Error,
            probability: 0.0,
            error: Some(e.to_string()),
            processed_text: None,
        }
    }
}

impl From<Result<Prediction, PredictError>> for PredictionResult {
    fn from(r: Result<Prediction, PredictError>) -> Self {
        match r {
            Ok(p) => p.into(),
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_result_shape() {
        let r: PredictionResult = PredictError::NotLoaded("classifier").into();
        assert_eq!(r.label, Label::Error);
        assert_eq!(r.probability, 0.0);
        assert_eq!(r.error.as_deref(), Some("model not loaded: classifier unavailable"));
        assert!(r.processed_text.is_none());
    }

    #[test]
    fn test_error_result_json_omits_processed_text() {
        let r: PredictionResult = PredictError::InternalFailure("boom".into()).into();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["label"], "Error");
        assert_eq!(json["probability"], 0.0);
        assert!(json.get("processed_text").is_none());
    }

    #[test]
    fn test_success_result_echoes_processed_text() {
        let p = Prediction {
            class: NewsClass::Fake,
            probability: 0.8,
            probabilities: ClassProbabilities::from_fake(0.8),
            processed_text: "miracle cure".into(),
        };
        let r: PredictionResult = p.into();
        assert_eq!(r.label, Label::Fake);
        assert!(!r.is_error());
        assert_eq!(r.processed_text.as_deref(), Some("miracle cure"));
        assert!(r.error.is_none());
    }
}
