// Text normalization shared by the trainer and the predictor.
//
// Anything that turns raw article text into the token stream the vectorizer
// sees lives here. Training and serving must call the exact same function,
// otherwise the fitted vocabulary stops lining up with what inference feeds it.

pub mod clean;
pub mod lemmatizer;
pub mod preprocess;

pub use preprocess::{preprocess, preprocess_opt, Preprocessor};
