// Training pipeline: labeled documents in, fitted vectorizer + classifier
// and a held-out evaluation out.
//
// Steps:
// 1. Preprocess every document with the shared preprocessor
// 2. Stratified train/test split
// 3. Fit TF-IDF on the training split only
// 4. Fit logistic regression on the training rows
// 5. Score the test rows

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::metrics::Evaluation;
use super::split::stratified_split;
use crate::corpus::LabeledDocument;
use crate::features::tfidf::{TfidfParams, TfidfVectorizer};
use crate::features::traits::Vectorizer;
use crate::features::vector::FeatureVector;
use crate::model::logistic::{LogisticParams, LogisticRegression};
use crate::model::traits::NewsClass;
use crate::text::preprocess;

#[derive(Debug, Clone)]
pub struct TrainingParams {
    pub tfidf: TfidfParams,
    pub logistic: LogisticParams,
    /// Fraction of each class held out for evaluation
    pub test_size: f64,
    pub seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            tfidf: TfidfParams::default(),
            logistic: LogisticParams::default(),
            test_size: 0.2,
            seed: 42,
        }
    }
}

pub struct TrainingOutcome {
    pub vectorizer: TfidfVectorizer,
    pub classifier: LogisticRegression,
    pub evaluation: Evaluation,
    pub train_size: usize,
    pub test_size: usize,
}

/// Run every document through the preprocessor, optionally with a progress bar.
pub fn preprocess_corpus(documents: &[LabeledDocument], show_progress: bool) -> Vec<String> {
    let pb = if show_progress {
        let pb = ProgressBar::new(documents.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("  Preprocessing [{bar:30}] {pos}/{len} ({eta})")
        {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let processed = documents
        .iter()
        .map(|doc| {
            let text = preprocess(&doc.text);
            pb.inc(1);
            text
        })
        .collect();

    pb.finish_and_clear();
    processed
}

pub fn train(
    documents: &[LabeledDocument],
    params: &TrainingParams,
    show_progress: bool,
) -> Result<TrainingOutcome> {
    if documents.is_empty() {
        anyhow::bail!("No training documents. Check that True.csv and Fake.csv are not empty.");
    }

    let processed = preprocess_corpus(documents, show_progress);
    let labels: Vec<NewsClass> = documents.iter().map(|d| d.class).collect();

    let split = stratified_split(&labels, params.test_size, params.seed)?;
    info!(
        train = split.train.len(),
        test = split.test.len(),
        seed = params.seed,
        "Split corpus"
    );

    let train_docs: Vec<&str> = split.train.iter().map(|&i| processed[i].as_str()).collect();
    let train_labels: Vec<NewsClass> = split.train.iter().map(|&i| labels[i]).collect();

    let vectorizer = TfidfVectorizer::fit(&train_docs, params.tfidf.clone())?;
    let train_rows: Vec<FeatureVector> = train_docs
        .iter()
        .map(|doc| vectorizer.transform(doc))
        .collect();

    let classifier = LogisticRegression::fit(&train_rows, &train_labels, params.logistic.clone())?;

    let test_labels: Vec<NewsClass> = split.test.iter().map(|&i| labels[i]).collect();
    let predicted = split
        .test
        .iter()
        .map(|&i| classifier.predict(&vectorizer.transform(&processed[i])))
        .collect::<Result<Vec<_>>>()?;

    let evaluation = Evaluation::new(&test_labels, &predicted);
    info!(accuracy = evaluation.accuracy, "Evaluated on held-out split");

    Ok(TrainingOutcome {
        vectorizer,
        classifier,
        evaluation,
        train_size: split.train.len(),
        test_size: split.test.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::traits::NewsClassifier;

    fn doc(text: &str, class: NewsClass) -> LabeledDocument {
        LabeledDocument {
            text: text.to_string(),
            class,
        }
    }

    fn toy_corpus() -> Vec<LabeledDocument> {
        let real = [
            "Senate passes budget bill after committee vote",
            "Reuters reports senate committee approved budget",
            "Lawmakers vote on budget in senate committee",
            "Committee hearing on senate budget resolution",
            "Senate budget vote scheduled by committee chairman",
            "Budget committee senate officials said Tuesday",
        ];
        let fake = [
            "Shocking miracle cure doctors hate revealed",
            "Miracle cure shocking secret exposed by insiders",
            "Doctors stunned by shocking miracle cure video",
            "Secret miracle cure shocking truth they hide",
            "Shocking video reveals miracle cure conspiracy",
            "Insiders leak shocking miracle cure secret",
        ];
        real.iter()
            .map(|t| doc(t, NewsClass::Real))
            .chain(fake.iter().map(|t| doc(t, NewsClass::Fake)))
            .collect()
    }

    fn toy_params() -> TrainingParams {
        TrainingParams {
            tfidf: TfidfParams {
                max_features: None,
                ngram_range: (1, 2),
                min_df: 1,
                max_df: 1.0,
            },
            test_size: 0.34,
            ..TrainingParams::default()
        }
    }

    #[test]
    fn test_train_separates_toy_corpus() {
        let outcome = train(&toy_corpus(), &toy_params(), false).unwrap();
        assert_eq!(outcome.train_size + outcome.test_size, 12);
        assert_eq!(
            outcome.classifier.n_features(),
            outcome.vectorizer.dimension()
        );
        assert_eq!(outcome.evaluation.confusion.total(), outcome.test_size);
        assert!(outcome.evaluation.accuracy >= 0.75);
    }

    #[test]
    fn test_train_rejects_empty_corpus() {
        assert!(train(&[], &TrainingParams::default(), false).is_err());
    }

    #[test]
    fn test_preprocess_corpus_keeps_order() {
        let docs = vec![
            doc("The Senate", NewsClass::Real),
            doc("Miracle!!", NewsClass::Fake),
        ];
        let processed = preprocess_corpus(&docs, false);
        assert_eq!(processed.len(), 2);
        assert!(processed[0].contains("senate"));
        assert!(processed[1].contains("miracle"));
    }
}
