// Inference pipeline: preprocess -> vectorize -> classify -> label.

pub mod predictor;
pub mod result;

pub use predictor::Predictor;
pub use result::{Label, PredictError, Prediction, PredictionResult};
