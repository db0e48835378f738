// Sparse feature vector.
//
// A TF-IDF row for a news article touches a few hundred of the 5000 features,
// so vectors are stored as sorted (index, value) pairs plus the full width.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Build a vector from (index, value) pairs. Pairs are sorted by index,
    /// zeros are dropped and duplicate indices are summed.
    pub fn new(dim: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(i, _)| *i);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == index => *acc += value,
                _ => merged.push((index, value)),
            }
        }
        merged.retain(|(_, v)| *v != 0.0);
        Self {
            dim,
            entries: merged,
        }
    }

    /// An all-zero vector of the given width.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero features.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit L2 norm. Zero vectors stay zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }

    /// Dot product against a dense weight vector.
    ///
    /// Returns `None` when the weight vector's width differs from this
    /// vector's feature space.
    pub fn dot(&self, weights: &[f64]) -> Option<f64> {
        if weights.len() != self.dim {
            return None;
        }
        self.entries
            .iter()
            .map(|&(i, v)| weights.get(i).map(|w| w * v))
            .sum()
    }

    /// Value of one feature (0.0 when absent).
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_merges() {
        let v = FeatureVector::new(5, vec![(3, 1.0), (1, 2.0), (3, 0.5), (4, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(3), 1.5);
        assert_eq!(v.get(0), 0.0);
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = FeatureVector::new(2, vec![(0, 3.0), (1, 4.0)]);
        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.get(0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_vector_is_noop() {
        let mut v = FeatureVector::zeros(4);
        v.l2_normalize();
        assert!(v.is_zero());
        assert_eq!(v.dim(), 4);
    }

    #[test]
    fn test_dot_rejects_width_mismatch() {
        let v = FeatureVector::new(3, vec![(0, 1.0), (2, 2.0)]);
        assert_eq!(v.dot(&[1.0, 1.0, 1.0]), Some(3.0));
        assert_eq!(v.dot(&[1.0, 1.0]), None);
    }
}
