// Held-out evaluation: confusion matrix, accuracy and per-class
// precision / recall / F1.

use serde::Serialize;

use crate::model::traits::NewsClass;

/// 2x2 confusion matrix indexed `[actual][predicted]` by `NewsClass::index`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_predictions(actual: &[NewsClass], predicted: &[NewsClass]) -> Self {
        let mut m = Self::default();
        for (a, p) in actual.iter().zip(predicted) {
            m.record(*a, *p);
        }
        m
    }

    pub fn record(&mut self, actual: NewsClass, predicted: NewsClass) {
        self.counts[actual.index()][predicted.index()] += 1;
    }

    pub fn get(&self, actual: NewsClass, predicted: NewsClass) -> usize {
        self.counts[actual.index()][predicted.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let correct: usize = NewsClass::ALL.iter().map(|&c| self.get(c, c)).sum();
        ratio(correct, self.total())
    }

    pub fn class_report(&self, class: NewsClass) -> ClassReport {
        let tp = self.get(class, class);
        let predicted: usize = NewsClass::ALL.iter().map(|&a| self.get(a, class)).sum();
        let support: usize = NewsClass::ALL.iter().map(|&p| self.get(class, p)).sum();

        let precision = ratio(tp, predicted);
        let recall = ratio(tp, support);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        ClassReport {
            class,
            precision,
            recall,
            f1,
            support,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassReport {
    pub class: NewsClass,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Everything the `train` command reports about the held-out set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub reports: Vec<ClassReport>,
    pub confusion: ConfusionMatrix,
}

impl Evaluation {
    pub fn new(actual: &[NewsClass], predicted: &[NewsClass]) -> Self {
        let confusion = ConfusionMatrix::from_predictions(actual, predicted);
        Self {
            accuracy: confusion.accuracy(),
            reports: NewsClass::ALL
                .iter()
                .map(|&c| confusion.class_report(c))
                .collect(),
            confusion,
        }
    }
}

// 0/0 is reported as 0, as classification reports usually do
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
