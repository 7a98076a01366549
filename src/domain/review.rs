// ============================================================
// Layer 3 — Review Domain Type
// ============================================================
// Represents a single movie review loaded from disk together
// with its sentiment label.
//
// The IMDB corpus stores one review per .txt file and encodes
// the label in the directory name:
//   aclImdb/train/pos/123_9.txt  → Positive
//   aclImdb/train/neg/456_2.txt  → Negative
//
// Reference: Maas et al. (2011) Learning Word Vectors for
//            Sentiment Analysis (the IMDB dataset paper)
//            Rust Book §6 (Enums)

use serde::{Deserialize, Serialize};

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    /// Numeric class used as the training target (neg = 0, pos = 1)
    pub fn as_label(self) -> u8 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Positive => 1,
        }
    }

    /// Map a sub-directory name of the corpus to a label.
    /// Anything other than `pos` / `neg` (e.g. `unsup`) is not labelled.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "pos" => Some(Sentiment::Positive),
            "neg" => Some(Sentiment::Negative),
            _     => None,
        }
    }

    /// Threshold a predicted probability of the positive class
    pub fn from_probability(p: f32) -> Self {
        if p >= 0.5 { Sentiment::Positive } else { Sentiment::Negative }
    }
}

/// A labelled review loaded from the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// The file the review came from — kept for traceability
    pub source: String,

    /// Raw review text, still containing HTML line breaks etc.
    pub text: String,

    pub sentiment: Sentiment,
}

impl Review {
    pub fn new(
        source:    impl Into<String>,
        text:      impl Into<String>,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
            sentiment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Sentiment::Negative.as_label(), 0);
        assert_eq!(Sentiment::Positive.as_label(), 1);
    }

    #[test]
    fn test_from_dir_name() {
        assert_eq!(Sentiment::from_dir_name("pos"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::from_dir_name("neg"), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_dir_name("unsup"), None);
    }

    #[test]
    fn test_from_probability_threshold() {
        assert_eq!(Sentiment::from_probability(0.5), Sentiment::Positive);
        assert_eq!(Sentiment::from_probability(0.49), Sentiment::Negative);
    }
}
