// Feature extraction: turns preprocessed text into fixed-width vectors.

pub mod tfidf;
pub mod traits;
pub mod vector;
