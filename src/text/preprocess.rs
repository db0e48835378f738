// The one preprocessing function used for both training and inference.
//
// Pipeline: lowercase -> keep only [a-z] and whitespace -> split on
// whitespace -> drop English stop words -> lemmatize -> join with spaces.
//
// Stripping non-letters also removes hyphens and apostrophes, so
// "state-of-the-art" becomes "stateoftheart". That is lossy but it is what
// the fitted vocabulary was built from, so it has to stay.

use std::collections::HashSet;
use std::sync::OnceLock;

use stop_words::{get, LANGUAGE};

use super::lemmatizer::Lemmatizer;

/// Stop-word set plus lemmatizer, built once and reused for every document.
pub struct Preprocessor {
    stop_words: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor {
    /// Build a preprocessor with the English stop-word list from the
    /// `stop-words` crate.
    pub fn new() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(stop_words)
    }

    /// Build a preprocessor with a custom stop-word list.
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Normalize a document. Never fails; blank input gives an empty string.
    pub fn process(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let letters: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
            .collect();

        let tokens: Vec<String> = letters
            .split_whitespace()
            .filter(|word| !self.is_stop_word(word))
            .map(|word| self.lemmatizer.lemmatize(word))
            // A lemma can land on a stop word; dropping it keeps the output a fixed point.
            .filter(|lemma| !lemma.is_empty() && !self.is_stop_word(lemma))
            .collect();

        tokens.join(" ")
    }

    /// Same as [`process`](Self::process) but accepts a missing document.
    pub fn process_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.process(t)).unwrap_or_default()
    }
}

fn shared() -> &'static Preprocessor {
    static PREPROCESSOR: OnceLock<Preprocessor> = OnceLock::new();
    PREPROCESSOR.get_or_init(Preprocessor::new)
}

/// Normalize a document with the shared English preprocessor.
pub fn preprocess(text: &str) -> String {
    shared().process(text)
}

/// Normalize a possibly-missing document; `None` becomes `""`.
pub fn preprocess_opt(text: Option<&str>) -> String {
    shared().process_opt(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Preprocessor {
        Preprocessor::with_stop_words(["the", "a", "is", "and", "with", "this", "of"])
    }

    #[test]
    fn test_basic_pipeline() {
        let p = small();
        assert_eq!(
            p.process("The Senators approved THE budget bills!"),
            "senator approved budget bill"
        );
    }

    #[test]
    fn test_strips_digits_and_symbols() {
        let p = small();
        let out = p.process("This is a TEST with numbers 123 and symbols @#$!");
        assert_eq!(out, "test number symbol");
    }

    #[test]
    fn test_hyphen_and_apostrophe_join_words() {
        let p = small();
        assert_eq!(p.process("state-of-the-art"), "stateoftheart");
        assert_eq!(p.process("it's"), "its");
    }

    #[test]
    fn test_blank_inputs() {
        let p = small();
        assert_eq!(p.process(""), "");
        assert_eq!(p.process("   \n\t "), "");
        assert_eq!(p.process("123 !!! 456"), "");
        assert_eq!(p.process_opt(None), "");
    }

    #[test]
    fn test_collapses_whitespace() {
        let p = small();
        assert_eq!(p.process("  cats\n\n\tdogs   "), "cat dog");
    }

    #[test]
    fn test_stop_word_list_is_lowercased() {
        let p = Preprocessor::with_stop_words(["The"]);
        assert_eq!(p.process("the vote"), "vote");
    }

    #[test]
    fn test_lemma_that_is_a_stop_word_is_dropped() {
        // "wishes" lemmatizes to "wish", which this list treats as a stop word
        let p = Preprocessor::with_stop_words(["wish"]);
        assert_eq!(p.process("wishes granted"), "granted");
    }

    #[test]
    fn test_shared_preprocessor_is_idempotent() {
        let once = preprocess("WASHINGTON (Reuters) - The Senate approved the bills on Tuesday.");
        assert_eq!(preprocess(&once), once);
    }
}
