// TF-IDF vectorizer with a frozen vocabulary.
//
// Fitting follows the usual scikit-learn recipe:
//
// - tokens are whitespace-separated words of two or more characters
// - word n-grams over `ngram_range` (inclusive), joined by a single space
// - terms in fewer than `min_df` documents or in more than `max_df` of all
//   documents are pruned, then the `max_features` most frequent terms
//   (by total count across the corpus) are kept
// - vocabulary indices follow sorted term order
// - smooth idf: ln((1 + n) / (1 + df)) + 1
// - a row is raw counts * idf, scaled to unit L2 norm

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::traits::Vectorizer;
use super::vector::FeatureVector;

/// Hyperparameters fixed at fit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfParams {
    /// Keep at most this many terms (None = keep all that survive pruning)
    pub max_features: Option<usize>,
    /// Inclusive (min_n, max_n) word n-gram range
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in (0.0 to 1.0)
    pub max_df: f64,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            max_features: Some(5000),
            ngram_range: (1, 2),
            min_df: 5,
            max_df: 0.7,
        }
    }
}

/// A fitted TF-IDF vectorizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub params: TfidfParams,
    /// Term -> feature index
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per feature index
    idf: Vec<f64>,
    /// Number of documents seen during fit
    pub n_documents: usize,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and idf weights from preprocessed documents.
    pub fn fit<S: AsRef<str>>(documents: &[S], params: TfidfParams) -> Result<Self> {
        if documents.is_empty() {
            anyhow::bail!("Cannot fit a TF-IDF vectorizer on zero documents");
        }
        let (min_n, max_n) = params.ngram_range;
        if min_n == 0 || min_n > max_n {
            anyhow::bail!("Invalid n-gram range ({min_n}, {max_n})");
        }
        if !(0.0..=1.0).contains(&params.max_df) {
            anyhow::bail!("max_df must be between 0.0 and 1.0, got {}", params.max_df);
        }

        let n_documents = documents.len();
        let max_doc_count = params.max_df * n_documents as f64;
        if max_doc_count < params.min_df as f64 {
            anyhow::bail!(
                "max_df={} covers fewer documents ({max_doc_count:.1}) than min_df={}",
                params.max_df,
                params.min_df
            );
        }

        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = ngrams(doc.as_ref(), params.ngram_range);
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                *term_freq.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let candidate_count = doc_freq.len();

        // Sorted so that ties in the max_features cut are broken alphabetically
        let mut kept: Vec<(String, usize)> = doc_freq
            .iter()
            .filter(|(_, &df)| df >= params.min_df && df as f64 <= max_doc_count)
            .map(|(term, _)| (term.clone(), term_freq[term]))
            .collect();
        kept.sort_by(|a, b| a.0.cmp(&b.0));

        if let Some(limit) = params.max_features {
            // Stable sort keeps the alphabetical order among equal counts
            kept.sort_by(|a, b| b.1.cmp(&a.1));
            kept.truncate(limit);
            kept.sort_by(|a, b| a.0.cmp(&b.0));
        }

        if kept.is_empty() {
            anyhow::bail!(
                "After pruning, no terms remain ({candidate_count} candidates). \
                 Try a lower min_df or a higher max_df."
            );
        }

        let vocabulary: BTreeMap<String, usize> = kept
            .iter()
            .enumerate()
            .map(|(i, (term, _))| (term.clone(), i))
            .collect();

        let n = n_documents as f64;
        let idf: Vec<f64> = kept
            .iter()
            .map(|(term, _)| {
                let df = doc_freq[term] as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        info!(
            documents = n_documents,
            candidates = candidate_count,
            features = vocabulary.len(),
            "Fitted TF-IDF vocabulary"
        );

        Ok(Self {
            params,
            vocabulary,
            idf,
            n_documents,
        })
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Feature index for a term, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Terms ordered by feature index.
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names = vec![""; self.vocabulary.len()];
        for (term, &i) in &self.vocabulary {
            if let Some(slot) = names.get_mut(i) {
                *slot = term.as_str();
            }
        }
        names
    }

    /// Check the vocabulary and idf table agree. Used after deserializing.
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf.len() {
            anyhow::bail!(
                "Vectorizer is inconsistent: {} vocabulary terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            );
        }
        if let Some((term, &i)) = self.vocabulary.iter().find(|(_, &i)| i >= self.idf.len()) {
            anyhow::bail!("Vocabulary term {term:?} has out-of-range index {i}");
        }
        Ok(())
    }
}

impl Vectorizer for TfidfVectorizer {
    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    fn transform(&self, document: &str) -> FeatureVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in ngrams(document, self.params.ngram_range) {
            if let Some(i) = self.index_of(&term) {
                *counts.entry(i).or_insert(0.0) += 1.0;
            }
        }

        let entries: Vec<(usize, f64)> = counts
            .into_iter()
            .filter_map(|(i, tf)| self.idf.get(i).map(|idf| (i, tf * idf)))
            .collect();

        let mut vector = FeatureVector::new(self.dimension(), entries);
        vector.l2_normalize();
        vector
    }
}

/// Word n-grams of a preprocessed document, in document order.
/// Single-character tokens are skipped before n-grams are formed.
pub fn ngrams(document: &str, (min_n, max_n): (usize, usize)) -> Vec<String> {
    let tokens: Vec<&str> = document
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .collect();

    let mut out = Vec::new();
    for n in min_n.max(1)..=max_n {
        if n > tokens.len() {
            break;
        }
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loose() -> TfidfParams {
        TfidfParams {
            max_features: None,
            ngram_range: (1, 1),
            min_df: 1,
            max_df: 1.0,
        }
    }

    #[test]
    fn test_ngrams_unigrams_and_bigrams() {
        let grams = ngrams("senate vote bill", (1, 2));
        assert_eq!(
            grams,
            vec!["senate", "vote", "bill", "senate vote", "vote bill"]
        );
    }

    #[test]
    fn test_ngrams_skip_single_characters() {
        assert_eq!(ngrams("a senate u vote", (1, 2)), vec!["senate", "vote", "senate vote"]);
    }

    #[test]
    fn test_ngrams_short_document() {
        assert!(ngrams("", (1, 2)).is_empty());
        assert_eq!(ngrams("senate", (1, 2)), vec!["senate"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let docs = ["zebra apple", "mango apple"];
        let v = TfidfVectorizer::fit(&docs, loose()).unwrap();
        assert_eq!(v.feature_names(), vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_smooth_idf_values() {
        let docs = ["apple mango", "apple"];
        let v = TfidfVectorizer::fit(&docs, loose()).unwrap();
        // apple: df=2, n=2 -> ln(3/3) + 1 = 1
        assert!((v.idf()[0] - 1.0).abs() < 1e-12);
        // mango: df=1 -> ln(3/2) + 1
        assert!((v.idf()[1] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_transform_is_unit_norm_and_ignores_unknown_terms() {
        let docs = ["apple mango", "apple kiwi"];
        let v = TfidfVectorizer::fit(&docs, loose()).unwrap();
        let row = v.transform("apple mango unknownterm");
        assert_eq!(row.dim(), 3);
        assert_eq!(row.nnz(), 2);
        assert!((row.norm() - 1.0).abs() < 1e-12);

        let empty = v.transform("totally unseen words");
        assert!(empty.is_zero());
    }

    #[test]
    fn test_min_and_max_df_pruning() {
        let docs = ["common rare", "common other", "common other"];
        let params = TfidfParams {
            max_features: None,
            ngram_range: (1, 1),
            min_df: 2,
            max_df: 0.9,
        };
        let v = TfidfVectorizer::fit(&docs, params).unwrap();
        // "common" is in 100% of docs (> 90%), "rare" is in only one
        assert_eq!(v.feature_names(), vec!["other"]);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let docs = ["alpha alpha alpha beta", "beta gamma", "alpha delta"];
        let params = TfidfParams {
            max_features: Some(2),
            ..loose()
        };
        let v = TfidfVectorizer::fit(&docs, params).unwrap();
        assert_eq!(v.feature_names(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_everything_pruned_is_an_error() {
        let docs = ["one", "two"];
        let params = TfidfParams {
            min_df: 2,
            ..loose()
        };
        assert!(TfidfVectorizer::fit(&docs, params).is_err());
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let docs: [&str; 0] = [];
        assert!(TfidfVectorizer::fit(&docs, loose()).is_err());
    }
}
