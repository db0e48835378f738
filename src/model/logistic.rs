// Binary logistic regression over sparse TF-IDF rows.
//
// Minimizes the mean log loss plus an L2 penalty of ||w||^2 / (2 * C * n),
// which has the same minimizer as scikit-learn's `C * sum(loss) + ||w||^2 / 2`.
// The intercept is not penalized. Full-batch gradient descent with a step of
// 1 / L, where L bounds the curvature of the objective, so no learning rate
// has to be tuned. The sigmoid output is used directly as P(Fake).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::traits::{ClassProbabilities, NewsClass, NewsClassifier};
use crate::features::vector::FeatureVector;

/// Training hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    /// Inverse regularization strength (default 1.0). Smaller = stronger penalty.
    pub c: f64,
    /// Maximum gradient steps (default 1000)
    pub max_iter: usize,
    /// Stop when the objective improves by less than this (default 1e-6)
    pub tolerance: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-6,
        }
    }
}

/// A fitted logistic regression model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub params: LogisticParams,
    coefficients: Vec<f64>,
    intercept: f64,
    /// Gradient steps taken during fit
    pub iterations: usize,
    /// Objective value after the last step
    pub final_loss: f64,
}

/// Numerically stable sigmoid.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Binary cross-entropy for one sample, clipped away from log(0).
fn log_loss(target: f64, p: f64) -> f64 {
    let p = p.clamp(1e-15, 1.0 - 1e-15);
    -(target * p.ln() + (1.0 - target) * (1.0 - p).ln())
}

impl LogisticRegression {
    /// Build a model from known weights (used by tests and artifact loading).
    pub fn from_weights(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            params: LogisticParams::default(),
            coefficients,
            intercept,
            iterations: 0,
            final_loss: 0.0,
        }
    }

    /// Fit on feature rows and their classes.
    pub fn fit(rows: &[FeatureVector], labels: &[NewsClass], params: LogisticParams) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Cannot fit a classifier on zero samples");
        }
        if rows.len() != labels.len() {
            anyhow::bail!(
                "Got {} feature rows but {} labels",
                rows.len(),
                labels.len()
            );
        }
        if !(params.c > 0.0 && params.c.is_finite()) {
            anyhow::bail!("C must be a positive number, got {}", params.c);
        }
        if params.max_iter == 0 {
            anyhow::bail!("max_iter must be at least 1");
        }

        let n_features = rows[0].dim();
        if let Some(bad) = rows.iter().find(|r| r.dim() != n_features) {
            anyhow::bail!(
                "Feature rows disagree on width: expected {n_features}, found {}",
                bad.dim()
            );
        }
        if rows
            .iter()
            .any(|r| r.entries().iter().any(|&(i, _)| i >= n_features))
        {
            anyhow::bail!("A feature row has an index outside its declared width {n_features}");
        }
        for class in NewsClass::ALL {
            if !labels.contains(&class) {
                anyhow::bail!("Training data has no {class} samples; need both classes");
            }
        }

        let n = rows.len() as f64;
        let targets: Vec<f64> = labels.iter().map(|c| c.index() as f64).collect();
        let penalty = 1.0 / (params.c * n);

        // Curvature bound: sigmoid' <= 1/4, rows contribute at most max ||x||^2 + 1 (intercept)
        let max_sq_norm = rows
            .iter()
            .map(|r| r.norm().powi(2))
            .fold(0.0_f64, f64::max);
        let step = 1.0 / (0.25 * (max_sq_norm + 1.0) + penalty);

        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;
        let mut previous = f64::INFINITY;
        let mut iterations = 0;
        let mut loss = 0.0;

        for iter in 0..params.max_iter {
            iterations = iter + 1;

            let mut grad_w = vec![0.0; n_features];
            let mut grad_b = 0.0;
            let mut data_loss = 0.0;

            for (row, &target) in rows.iter().zip(&targets) {
                let z = linear(row, &weights, bias);
                let p = sigmoid(z);
                data_loss += log_loss(target, p);
                let err = p - target;
                for &(i, v) in row.entries() {
                    grad_w[i] += err * v;
                }
                grad_b += err;
            }

            let l2: f64 = weights.iter().map(|w| w * w).sum();
            loss = data_loss / n + 0.5 * penalty * l2;

            for (g, w) in grad_w.iter_mut().zip(&weights) {
                *g = *g / n + penalty * w;
            }
            grad_b /= n;

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= step * g;
            }
            bias -= step * grad_b;

            if (previous - loss).abs() < params.tolerance {
                debug!(iteration = iterations, loss, "Logistic regression converged");
                break;
            }
            previous = loss;
        }

        info!(
            samples = rows.len(),
            features = n_features,
            iterations,
            loss,
            "Fitted logistic regression"
        );

        Ok(Self {
            params,
            coefficients: weights,
            intercept: bias,
            iterations,
            final_loss: loss,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Raw decision score w·x + b for one row.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64> {
        if features.dim() != self.coefficients.len() {
            anyhow::bail!(
                "Feature dimension mismatch: model expects {}, got {}",
                self.coefficients.len(),
                features.dim()
            );
        }
        features
            .dot(&self.coefficients)
            .map(|d| d + self.intercept)
            .ok_or_else(|| anyhow::anyhow!("Feature vector has an index outside the model's range"))
    }

    /// Hard class prediction (decision score > 0 means Fake).
    pub fn predict(&self, features: &FeatureVector) -> Result<NewsClass> {
        Ok(if self.decision_function(features)? > 0.0 {
            NewsClass::Fake
        } else {
            NewsClass::Real
        })
    }
}

fn linear(row: &FeatureVector, weights: &[f64], bias: f64) -> f64 {
    row.entries()
        .iter()
        .map(|&(i, v)| weights[i] * v)
        .sum::<f64>()
        + bias
}

impl NewsClassifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities> {
        let z = self.decision_function(features)?;
        Ok(ClassProbabilities::from_fake(sigmoid(z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (Vec<FeatureVector>, Vec<NewsClass>) {
        // feature 0 marks fake articles, feature 1 marks real ones
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for _ in 0..10 {
            rows.push(FeatureVector::new(3, vec![(0, 1.0), (2, 0.2)]));
            labels.push(NewsClass::Fake);
            rows.push(FeatureVector::new(3, vec![(1, 1.0), (2, 0.2)]));
            labels.push(NewsClass::Real);
        }
        (rows, labels)
    }

    #[test]
    fn test_sigmoid_properties() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(40.0) > 0.999);
        assert!(sigmoid(-40.0) < 0.001);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_fit_learns_separable_data() {
        let (rows, labels) = toy_data();
        let model = LogisticRegression::fit(&rows, &labels, LogisticParams::default()).unwrap();

        let fake = model.predict_proba(&rows[0]).unwrap();
        let real = model.predict_proba(&rows[1]).unwrap();
        assert!(fake.fake > 0.5, "fake row scored {fake:?}");
        assert!(real.real > 0.5, "real row scored {real:?}");
        assert_eq!(model.predict(&rows[0]).unwrap(), NewsClass::Fake);
        assert_eq!(model.predict(&rows[1]).unwrap(), NewsClass::Real);
        assert!(model.coefficients()[0] > 0.0);
        assert!(model.coefficients()[1] < 0.0);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = LogisticRegression::from_weights(vec![2.0, -1.0], 0.3);
        let p = model
            .predict_proba(&FeatureVector::new(2, vec![(0, 0.5), (1, 0.5)]))
            .unwrap();
        assert!((p.real + p.fake - 1.0).abs() < 1e-12);
        assert!(p.is_valid());
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let model = LogisticRegression::from_weights(vec![1.0, 1.0], 0.0);
        let result = model.predict_proba(&FeatureVector::new(3, vec![(2, 1.0)]));
        assert!(result.is_err());
    }

    #[test]
    fn test_fit_requires_both_classes() {
        let rows = vec![FeatureVector::new(1, vec![(0, 1.0)])];
        let result = LogisticRegression::fit(&rows, &[NewsClass::Fake], LogisticParams::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_fit_rejects_label_count_mismatch() {
        let (rows, _) = toy_data();
        let result = LogisticRegression::fit(&rows, &[NewsClass::Fake], LogisticParams::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_vector_uses_intercept_only() {
        let model = LogisticRegression::from_weights(vec![5.0, 5.0], 0.0);
        let p = model.predict_proba(&FeatureVector::zeros(2)).unwrap();
        assert!((p.fake - 0.5).abs() < 1e-12);
        // exact tie resolves to Real
        assert_eq!(p.argmax().0, NewsClass::Real);
    }
}
