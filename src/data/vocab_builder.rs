// ============================================================
// Layer 4 — Vocabulary Builder
// ============================================================
// Counts word frequencies over the training corpus and ranks
// the words: most frequent first, ties broken alphabetically so
// the same corpus always produces the same indices.
//
// Callers pass only the training split (after the validation
// hold-out); validation and test reviews are never counted.

use std::collections::HashMap;

use crate::domain::vocabulary::{Vocabulary, NUM_SPECIAL_TOKENS};

/// Build a vocabulary from tokenised documents.
///
/// `max_words` is the vocabulary cap (embedding rows). It must
/// leave room for at least one real word after the reserved
/// [PAD] / [UNK] slots; smaller values are raised to that minimum.
pub fn build_vocabulary(documents: &[Vec<String>], max_words: usize) -> Vocabulary {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for doc in documents {
        for word in doc {
            *freq.entry(word.as_str()).or_insert(0) += 1;
        }
    }

    let mut words: Vec<(&str, usize)> = freq.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let max_words = max_words.max(NUM_SPECIAL_TOKENS + 1);
    tracing::info!(
        "Vocabulary: {} distinct words, {} usable as model inputs",
        words.len(),
        (max_words - NUM_SPECIAL_TOKENS).min(words.len())
    );

    Vocabulary::from_ranked_words(words.into_iter().map(|(w, _)| w), max_words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocabulary::UNK_ID;

    fn doc(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_frequency_rank_order() {
        let docs = vec![
            doc(&["good", "film", "good"]),
            doc(&["bad", "film", "good"]),
        ];
        let v = build_vocabulary(&docs, 100);
        assert_eq!(v.get("good"), Some(2)); // 3 occurrences
        assert_eq!(v.get("film"), Some(3)); // 2 occurrences
        assert_eq!(v.get("bad"), Some(4));  // 1 occurrence
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let docs = vec![doc(&["zebra", "apple", "mango"])];
        let v = build_vocabulary(&docs, 100);
        assert_eq!(v.get("apple"), Some(2));
        assert_eq!(v.get("mango"), Some(3));
        assert_eq!(v.get("zebra"), Some(4));
    }

    #[test]
    fn test_cap_keeps_all_words_but_encodes_rare_as_unk() {
        let docs = vec![doc(&["a", "a", "b"])];
        let v = build_vocabulary(&docs, 3);
        assert_eq!(v.max_words(), 3);
        assert_eq!(v.get("b"), Some(3));
        assert_eq!(v.encode_word("a"), 2);
        assert_eq!(v.encode_word("b"), UNK_ID);
    }

    #[test]
    fn test_tiny_cap_is_raised() {
        let v = build_vocabulary(&[doc(&["x"])], 0);
        assert_eq!(v.max_words(), NUM_SPECIAL_TOKENS + 1);
    }
}
