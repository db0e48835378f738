// News classifier trait: the swap-ready abstraction.
//
// The predictor only needs a probability for each class, so any calibrated
// binary model (logistic regression, a calibrated linear SVM) fits behind it.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::features::vector::FeatureVector;

/// The two classes the model distinguishes. The discriminant is the label
/// value used in training data (0 = Real, 1 = Fake).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsClass {
    Real = 0,
    Fake = 1,
}

impl NewsClass {
    pub const ALL: [NewsClass; 2] = [NewsClass::Real, NewsClass::Fake];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsClass::Real => "Real",
            NewsClass::Fake => "Fake",
        }
    }
}

impl std::fmt::Display for NewsClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Probability distribution over the two classes. The two values sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub real: f64,
    pub fake: f64,
}

impl ClassProbabilities {
    /// Build from the probability of the Fake class.
    pub fn from_fake(fake: f64) -> Self {
        Self {
            real: 1.0 - fake,
            fake,
        }
    }

    pub fn get(&self, class: NewsClass) -> f64 {
        match class {
            NewsClass::Real => self.real,
            NewsClass::Fake => self.fake,
        }
    }

    /// Most likely class and its probability. An exact tie goes to Real.
    pub fn argmax(&self) -> (NewsClass, f64) {
        if self.fake > self.real {
            (NewsClass::Fake, self.fake)
        } else {
            (NewsClass::Real, self.real)
        }
    }

    /// True when both values are finite and inside [0, 1].
    pub fn is_valid(&self) -> bool {
        [self.real, self.fake]
            .iter()
            .all(|p| p.is_finite() && (0.0..=1.0).contains(p))
    }
}

/// Trait for scoring a feature vector. Implementations must be thread-safe
/// because one fitted model is shared by every concurrent request.
pub trait NewsClassifier: Send + Sync {
    /// Number of input features the model was fitted on.
    fn n_features(&self) -> usize;

    /// Class probabilities for one document.
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities>;
}
