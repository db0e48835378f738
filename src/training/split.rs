// Stratified train/test split.
//
// Each class is shuffled separately with the same seeded RNG and the first
// `round(test_size * class_count)` samples go to the test set, so both sets
// keep the corpus's class ratio and the split is identical across runs.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::model::traits::NewsClass;

/// Indices into the original sample list.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

pub fn stratified_split(labels: &[NewsClass], test_size: f64, seed: u64) -> Result<SplitIndices> {
    if !(test_size > 0.0 && test_size < 1.0) {
        anyhow::bail!("test_size must be strictly between 0 and 1, got {test_size}");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in NewsClass::ALL {
        let mut members: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == class)
            .map(|(i, _)| i)
            .collect();
        if members.len() < 2 {
            anyhow::bail!(
                "Need at least 2 {class} samples to split, found {}",
                members.len()
            );
        }

        members.shuffle(&mut rng);
        // Both sides get at least one sample of every class
        let n_test = ((members.len() as f64 * test_size).round() as usize).clamp(1, members.len() - 1);
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
    }

    // Interleave the classes
    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(SplitIndices { train, test })
}
