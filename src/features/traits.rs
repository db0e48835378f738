// Vectorizer trait: the seam between preprocessed text and the classifier.
//
// The fitted TF-IDF vectorizer is the only implementation shipped, but the
// predictor only depends on this trait so tests can plug in fixed vectors.

use super::vector::FeatureVector;

/// Maps a preprocessed document onto a fixed feature space.
pub trait Vectorizer: Send + Sync {
    /// Number of features every output vector has.
    fn dimension(&self) -> usize;

    /// Transform one preprocessed document. Unknown terms are ignored.
    fn transform(&self, document: &str) -> FeatureVector;
}
