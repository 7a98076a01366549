// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// Maps every word seen in the training corpus to an integer
// index, in frequency-rank order (most frequent word first).
//
// Two indices are reserved and are never real words:
//   0 → [PAD]  padding placeholder, always a zero embedding row
//   1 → [UNK]  out-of-vocabulary placeholder
//
// The vocabulary keeps EVERY word it was built from, but only
// indices below `max_words` are used as model inputs. This is
// the "vocabulary cap": the number of rows of the embedding
// matrix. Words ranked beyond the cap encode as [UNK].
//
// Reference: Rust Book §8 (Hash Maps)

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

pub const PAD_TOKEN: &str = "[PAD]";
pub const UNK_TOKEN: &str = "[UNK]";
pub const PAD_ID: usize = 0;
pub const UNK_ID: usize = 1;

/// Number of reserved indices at the start of the vocabulary
pub const NUM_SPECIAL_TOKENS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    word_index: HashMap<String, usize>,
    max_words:  usize,
}

impl Vocabulary {
    /// Build a vocabulary from words already sorted by rank.
    /// The first word gets index 2, the next 3 and so on.
    /// Repeated words and the special tokens themselves are skipped.
    pub fn from_ranked_words<I, S>(ranked: I, max_words: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut word_index = HashMap::new();
        word_index.insert(PAD_TOKEN.to_string(), PAD_ID);
        word_index.insert(UNK_TOKEN.to_string(), UNK_ID);

        let mut next_id = NUM_SPECIAL_TOKENS;
        for word in ranked {
            let word = word.into();
            if !word_index.contains_key(&word) {
                word_index.insert(word, next_id);
                next_id += 1;
            }
        }

        Self { word_index, max_words }
    }

    /// Rebuild a vocabulary from a persisted word → index table
    pub fn from_word_index(word_index: HashMap<String, usize>, max_words: usize) -> Self {
        Self { word_index, max_words }
    }

    pub fn word_index(&self) -> &HashMap<String, usize> {
        &self.word_index
    }

    /// The vocabulary cap — only indices below this are model inputs
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Total number of entries, including the reserved tokens
    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    /// Raw index of a word, ignoring the cap
    pub fn get(&self, word: &str) -> Option<usize> {
        self.word_index.get(word).copied()
    }

    /// Index used as model input: unknown words and words ranked
    /// at or beyond the cap both map to [UNK].
    pub fn encode_word(&self, word: &str) -> usize {
        self.get(word).map_or(UNK_ID, |id| cap_index(id, self.max_words))
    }
}

/// Indices at or beyond `max_words` have no embedding row or
/// multi-hot column, so they fold into [UNK].
pub fn cap_index(id: usize, max_words: usize) -> usize {
    if id < max_words { id } else { UNK_ID }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_indices() {
        let v = Vocabulary::from_ranked_words(["the", "movie"], 10);
        assert_eq!(v.get(PAD_TOKEN), Some(PAD_ID));
        assert_eq!(v.get(UNK_TOKEN), Some(UNK_ID));
        assert_eq!(v.get("the"), Some(2));
        assert_eq!(v.get("movie"), Some(3));
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn test_duplicates_and_specials_skipped() {
        let v = Vocabulary::from_ranked_words(["a", "[PAD]", "a", "b"], 10);
        assert_eq!(v.get("a"), Some(2));
        assert_eq!(v.get("b"), Some(3));
        assert_eq!(v.get(PAD_TOKEN), Some(PAD_ID));
    }

    #[test]
    fn test_cap_maps_rare_words_to_unk() {
        // cap 4 → ids 0..=3 usable; "rare" gets id 4
        let v = Vocabulary::from_ranked_words(["good", "bad", "rare"], 4);
        assert_eq!(v.encode_word("good"), 2);
        assert_eq!(v.encode_word("bad"), 3);
        assert_eq!(v.encode_word("rare"), UNK_ID);
        assert_eq!(v.encode_word("never-seen"), UNK_ID);
    }
}
