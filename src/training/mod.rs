// Offline training: preprocess the labeled corpora, split, fit the vectorizer
// and classifier, and evaluate on the held-out part.

pub mod metrics;
pub mod pipeline;
pub mod split;
