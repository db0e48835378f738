// Classification model: trait-based abstraction over the fitted classifier.
//
// The NewsClassifier trait defines the interface. LogisticRegression is the
// shipped implementation; artifacts handles reading and writing the fitted
// vectorizer and classifier to the model directory.

pub mod artifacts;
pub mod logistic;
pub mod traits;
