// newscheck: fake news detection
//
// This is the library root. Each module corresponds to one stage of the
// train-then-serve pipeline.

pub mod config;
pub mod corpus;
pub mod features;
pub mod inference;
pub mod model;
pub mod output;
pub mod status;
pub mod text;
pub mod training;

#[cfg(feature = "web")]
pub mod web;
