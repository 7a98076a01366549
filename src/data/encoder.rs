// ============================================================
// Layer 4 — Review Encoder
// ============================================================
// Turns raw review text into a fixed-length sequence of token
// ids ready for the model:
//
//   raw text ──Preprocessor──▶ words ──Tokenizer──▶ ids
//            ──cap──▶ ids < max_words ──pad──▶ [max_len]
//
// The Tokenizer is the WordLevel tokenizer written by
// infra/tokenizer_store.rs, so training and prediction use the
// exact same word → id table.

use anyhow::Result;
use tokenizers::Tokenizer;

use crate::data::{preprocessor::Preprocessor, sequence::pad_sequence};
use crate::domain::vocabulary::cap_index;

pub struct ReviewEncoder {
    tokenizer:    Tokenizer,
    preprocessor: Preprocessor,
    max_words:    usize,
    max_len:      usize,
}

impl ReviewEncoder {
    pub fn new(tokenizer: Tokenizer, max_words: usize, max_len: usize) -> Self {
        Self {
            tokenizer,
            preprocessor: Preprocessor::new(),
            max_words,
            max_len,
        }
    }

    /// Token ids of `text`, not yet padded. Ids at or beyond the
    /// vocabulary cap become [UNK].
    pub fn token_ids(&self, text: &str) -> Result<Vec<u32>> {
        let words = self.preprocessor.words(text);
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let enc = self.tokenizer
            .encode(words.join(" "), false)
            .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

        Ok(enc
            .get_ids()
            .iter()
            .map(|&id| cap_index(id as usize, self.max_words) as u32)
            .collect())
    }

    /// Token ids of `text`, padded / truncated to `max_len`.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(pad_sequence(&self.token_ids(text)?, self.max_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocabulary::Vocabulary;
    use crate::infra::tokenizer_store::TokenizerStore;

    fn encoder(name: &str, max_words: usize, max_len: usize) -> (ReviewEncoder, String) {
        let dir = std::env::temp_dir()
            .join(format!("sentiment-encoder-{}-{}", name, std::process::id()));
        let dir = dir.to_string_lossy().into_owned();
        let vocab = Vocabulary::from_ranked_words(["the", "film", "was", "great"], max_words);
        let tok   = TokenizerStore::new(&dir).save(&vocab).unwrap();
        (ReviewEncoder::new(tok, max_words, max_len), dir)
    }

    #[test]
    fn test_encode_pads_and_cleans() {
        let (enc, dir) = encoder("pad", 100, 6);
        // the=2 film=3 was=4 great=5
        assert_eq!(enc.encode("The film<br />was GREAT!").unwrap(), vec![0, 0, 2, 3, 4, 5]);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_ids_beyond_cap_become_unk() {
        // cap 4 → only [PAD], [UNK], "the", "film" are usable
        let (enc, dir) = encoder("cap", 4, 4);
        assert_eq!(enc.token_ids("the film was great").unwrap(), vec![2, 3, 1, 1]);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_text() {
        let (enc, dir) = encoder("empty", 100, 3);
        assert_eq!(enc.encode("<br />").unwrap(), vec![0, 0, 0]);
        std::fs::remove_dir_all(&dir).ok();
    }
}
