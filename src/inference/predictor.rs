// Predictor: the explicit inference context.
//
// Built once at startup from the model directory and then shared read-only
// (the web server holds it in an Arc). Nothing inside is mutated after
// construction, so any number of threads can call `predict` at once.
//
// A missing or unreadable artifact does not stop the process: the slot is
// left empty, health reports it as "not loaded", and every prediction comes
// back as an Error result until the process is restarted with artifacts in place.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::result::{PredictError, Prediction, PredictionResult};
use crate::features::traits::Vectorizer;
use crate::model::artifacts;
use crate::model::traits::NewsClassifier;
use crate::status::{ComponentState, HealthStatus};
use crate::text::preprocess;

pub struct Predictor {
    vectorizer: Option<Arc<dyn Vectorizer>>,
    classifier: Option<Arc<dyn NewsClassifier>>,
}

impl Predictor {
    /// Build a predictor from already-loaded parts.
    pub fn new(
        vectorizer: Option<Arc<dyn Vectorizer>>,
        classifier: Option<Arc<dyn NewsClassifier>>,
    ) -> Self {
        if let (Some(v), Some(c)) = (&vectorizer, &classifier) {
            if v.dimension() != c.n_features() {
                warn!(
                    vectorizer_features = v.dimension(),
                    classifier_features = c.n_features(),
                    "Vectorizer and classifier disagree on feature count; predictions will fail. \
                     Re-run `newscheck train` to regenerate both artifacts together."
                );
            }
        }
        Self {
            vectorizer,
            classifier,
        }
    }

    /// A predictor with nothing loaded. Every prediction is an Error result.
    pub fn unloaded() -> Self {
        Self {
            vectorizer: None,
            classifier: None,
        }
    }

    /// Load both artifacts from `model_dir`. Never fails: problems are
    /// logged and the affected artifact is left unloaded.
    pub fn load(model_dir: &Path) -> Self {
        let vectorizer: Option<Arc<dyn Vectorizer>> = match artifacts::load_vectorizer(model_dir) {
            Ok(file) => {
                info!(
                    features = file.artifact.dimension(),
                    trained_at = %file.trained_at,
                    "Vectorizer loaded"
                );
                Some(Arc::new(file.artifact))
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Vectorizer not loaded");
                None
            }
        };

        let classifier: Option<Arc<dyn NewsClassifier>> = match artifacts::load_classifier(model_dir) {
            Ok(file) => {
                info!(
                    features = file.artifact.n_features(),
                    trained_at = %file.trained_at,
                    "Classifier loaded"
                );
                Some(Arc::new(file.artifact))
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Classifier not loaded");
                None
            }
        };

        Self::new(vectorizer, classifier)
    }

    pub fn vectorizer_loaded(&self) -> bool {
        self.vectorizer.is_some()
    }

    pub fn classifier_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    /// True when both artifacts are available.
    pub fn is_ready(&self) -> bool {
        self.vectorizer_loaded() && self.classifier_loaded()
    }

    /// Loaded / not-loaded state of each artifact.
    pub fn health(&self) -> HealthStatus {
        HealthStatus::new(
            ComponentState::from_loaded(self.classifier_loaded()),
            ComponentState::from_loaded(self.vectorizer_loaded()),
        )
    }

    /// Classify one document, returning a typed error on failure.
    pub fn try_predict(&self, text: &str) -> Result<Prediction, PredictError> {
        let vectorizer = self
            .vectorizer
            .as_ref()
            .ok_or(PredictError::NotLoaded("vectorizer"))?;
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(PredictError::NotLoaded("classifier"))?;

        let processed_text = preprocess(text);
        let features = vectorizer.transform(&processed_text);

        let probabilities = classifier
            .predict_proba(&features)
            .map_err(|e| PredictError::InternalFailure(format!("{e:#}")))?;
        if !probabilities.is_valid() {
            return Err(PredictError::InternalFailure(format!(
                "classifier returned invalid probabilities {probabilities:?}"
            )));
        }

        let (class, probability) = probabilities.argmax();

        debug!(
            label = %class,
            probability,
            tokens = processed_text.split_whitespace().count(),
            features = features.nnz(),
            "Scored document"
        );

        Ok(Prediction {
            class,
            probability,
            probabilities,
            processed_text,
        })
    }

    /// Classify one document. Failures come back as an Error result,
    /// never as a panic or `Err`.
    pub fn predict(&self, text: &str) -> PredictionResult {
        self.try_predict(text).into()
    }

    /// Classify a possibly-missing document; `None` is treated as `""`.
    pub fn predict_opt(&self, text: Option<&str>) -> PredictionResult {
        self.predict(text.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;
    use crate::features::vector::FeatureVector;
    use crate::inference::result::Label;
    use crate::model::logistic::LogisticRegression;
    use crate::model::traits::ClassProbabilities;

    /// Maps every document onto feature 0 with weight 1.
    struct ConstantVectorizer(usize);

    impl Vectorizer for ConstantVectorizer {
        fn dimension(&self) -> usize {
            self.0
        }

        fn transform(&self, _document: &str) -> FeatureVector {
            FeatureVector::new(self.0, vec![(0, 1.0)])
        }
    }

    struct NanClassifier;

    impl NewsClassifier for NanClassifier {
        fn n_features(&self) -> usize {
            1
        }

        fn predict_proba(&self, _features: &FeatureVector) -> Result<ClassProbabilities> {
            Ok(ClassProbabilities::from_fake(f64::NAN))
        }
    }

    #[test]
    fn test_unloaded_predictor_returns_error() {
        let p = Predictor::unloaded();
        let r = p.predict("anything");
        assert_eq!(r.label, Label::Error);
        assert_eq!(r.probability, 0.0);
        assert!(r.error.unwrap().contains("model not loaded"));
        assert!(!p.is_ready());
    }

    #[test]
    fn test_missing_classifier_only() {
        let p = Predictor::new(Some(Arc::new(ConstantVectorizer(1))), None);
        assert_eq!(
            p.try_predict("text"),
            Err(PredictError::NotLoaded("classifier"))
        );
    }

    #[test]
    fn test_loaded_predictor_picks_argmax() {
        let p = Predictor::new(
            Some(Arc::new(ConstantVectorizer(1))),
            Some(Arc::new(LogisticRegression::from_weights(vec![2.0], 0.0))),
        );
        let r = p.predict("Miracle cure found");
        assert_eq!(r.label, Label::Fake);
        assert!(r.probability > 0.5 && r.probability <= 1.0);
        assert!(r.processed_text.unwrap().contains("miracle"));
    }

    #[test]
    fn test_dimension_mismatch_is_internal_failure() {
        let p = Predictor::new(
            Some(Arc::new(ConstantVectorizer(3))),
            Some(Arc::new(LogisticRegression::from_weights(vec![1.0, 1.0], 0.0))),
        );
        let err = p.try_predict("senate vote").unwrap_err();
        assert!(matches!(err, PredictError::InternalFailure(_)));
        let r = p.predict("senate vote");
        assert_eq!(r.label, Label::Error);
        assert_eq!(r.probability, 0.0);
    }

    #[test]
    fn test_invalid_probabilities_are_internal_failure() {
        let p = Predictor::new(Some(Arc::new(ConstantVectorizer(1))), Some(Arc::new(NanClassifier)));
        assert!(matches!(
            p.try_predict("x"),
            Err(PredictError::InternalFailure(_))
        ));
    }

    #[test]
    fn test_predict_opt_none_is_well_formed() {
        let p = Predictor::new(
            Some(Arc::new(ConstantVectorizer(1))),
            Some(Arc::new(LogisticRegression::from_weights(vec![-1.0], 0.0))),
        );
        let r = p.predict_opt(None);
        assert_eq!(r.label, Label::Real);
        assert_eq!(r.processed_text.as_deref(), Some(""));
    }

    #[test]
    fn test_load_from_empty_dir_is_unloaded() {
        let dir = tempfile::tempdir().unwrap();
        let p = Predictor::load(dir.path());
        let health = p.health();
        assert_eq!(health.model, ComponentState::NotLoaded);
        assert_eq!(health.vectorizer, ComponentState::NotLoaded);
    }
}
