// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Persists the vocabulary as a HuggingFace `tokenizer.json`
// (WordLevel model) so that prediction encodes text with the
// same word → id table that training used.
//
// The JSON is written directly instead of going through a
// trainer: the vocabulary is already built by
// data/vocab_builder.rs and only needs to be serialised.
//
// Text handed to the tokenizer is already cleaned and split by
// the Preprocessor, so no normaliser is configured and the
// pre-tokenizer only splits on whitespace.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::domain::vocabulary::{
    Vocabulary, PAD_ID, PAD_TOKEN, UNK_ID, UNK_TOKEN,
};

const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load a previously saved tokenizer
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}. Have you run 'train' first?",
                path.display(), e
            ))
    }

    /// Rebuild the vocabulary from the saved tokenizer.
    /// `max_words` is not stored in tokenizer.json; it comes from
    /// the saved training config.
    pub fn load_vocabulary(&self, max_words: usize) -> Result<Vocabulary> {
        let tokenizer  = self.load()?;
        let word_index = tokenizer
            .get_vocab(false)
            .into_iter()
            .map(|(w, id)| (w, id as usize))
            .collect();
        Ok(Vocabulary::from_word_index(word_index, max_words))
    }

    /// Write `vocab` as a WordLevel tokenizer and load it back.
    pub fn save(&self, vocab: &Vocabulary) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let vocab_json: serde_json::Map<String, serde_json::Value> = vocab
            .word_index()
            .iter()
            .map(|(w, &id)| (w.clone(), serde_json::json!(id)))
            .collect();

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": PAD_ID, "content": PAD_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": UNK_ID, "content": UNK_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": null,
            "pre_tokenizer": {
                "type": "WhitespaceSplit"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab_json,
                "unk_token": UNK_TOKEN
            }
        });

        let tok_path = self.path();
        std::fs::write(
            &tok_path,
            serde_json::to_string(&tokenizer_json)?
        ).with_context(|| format!("Cannot write '{}'", tok_path.display()))?;

        tracing::info!(
            "Tokenizer with {} entries saved to '{}'",
            vocab.len(),
            tok_path.display()
        );

        Tokenizer::from_file(&tok_path)
            .map_err(|e| anyhow::anyhow!("Cannot reload tokenizer: {e}"))
    }
}
