// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load training reviews          (Layer 4 - data)
//   Step 2: Split train/validation         (Layer 4 - data)
//   Step 3: Build vocabulary (train only)  (Layer 4 - data)
//   Step 4: Save tokenizer                 (Layer 6 - infra)
//   Step 5: Encode both splits             (Layer 4 - data)
//   Step 6: Load test reviews (optional)   (Layer 4 - data)
//   Step 7: Build GloVe matrix (glove mode)(Layer 4 - data)
//   Step 8: Save config                    (Layer 6 - infra)
//   Step 9: Run training loop              (Layer 5 - ml)

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};
use tokenizers::Tokenizer;

use crate::data::{
    dataset::{ReviewDataset, ReviewSample},
    embedding_matrix::build_embedding_matrix,
    encoder::ReviewEncoder,
    glove::GloveLoader,
    loader::ImdbLoader,
    preprocessor::Preprocessor,
    splitter::split_holdout,
    vocab_builder::build_vocabulary,
};
use crate::domain::{
    embedding::EmbeddingMatrix,
    review::Review,
    traits::ReviewSource,
    vocabulary::Vocabulary,
};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
    tokenizer_store::TokenizerStore,
};
use crate::ml::trainer::{run_training, TrainingData};

// ─── Embedding mode ───────────────────────────────────────────────────────────
/// How words are turned into model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingMode {
    /// Multi-hot bag of words over the vocabulary
    OneHot,
    /// Embedding layer trained from random initialisation
    Learned,
    /// Embedding layer initialised from pretrained GloVe vectors
    Glove,
}

impl FromStr for EmbeddingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one-hot" => Ok(Self::OneHot),
            "learned" => Ok(Self::Learned),
            "glove"   => Ok(Self::Glove),
            other     => Err(format!(
                "unknown mode '{other}' (expected one-hot, learned or glove)"
            )),
        }
    }
}

impl fmt::Display for EmbeddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OneHot  => "one-hot",
            Self::Learned => "learned",
            Self::Glove   => "glove",
        })
    }
}

// ─── Optimizer kind ───────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizerKind {
    Adam,
    #[serde(rename = "rmsprop")]
    RmsProp,
}

impl FromStr for OptimizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adam"    => Ok(Self::Adam),
            "rmsprop" => Ok(Self::RmsProp),
            other     => Err(format!("unknown optimizer '{other}' (expected adam or rmsprop)")),
        }
    }
}

// ─── Training Configuration ──────────────────────────────────────────────────
// All settings for a training run. Saved next to the checkpoint
// so prediction can rebuild the same model and encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Root of the aclImdb corpus (contains train/ and test/)
    pub data_dir:             String,
    pub checkpoint_dir:       String,
    pub mode:                 EmbeddingMode,
    /// GloVe text file, required in glove mode
    pub glove_path:           Option<String>,
    /// Let the optimiser update pretrained embeddings
    pub trainable_embeddings: bool,
    /// Vocabulary cap: embedding rows / multi-hot width
    pub max_words:            usize,
    /// Tokens per review after padding / truncation
    pub max_len:              usize,
    pub embedding_dim:        usize,
    /// Hidden layer width of the embedding classifier
    pub hidden_size:          usize,
    /// Keep at most this many training reviews
    pub training_samples:     Option<usize>,
    pub validation_samples:   usize,
    pub batch_size:           usize,
    pub epochs:               usize,
    pub lr:                   f64,
    pub optimizer:            OptimizerKind,
    pub seed:                 u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir:             "data/aclImdb".to_string(),
            checkpoint_dir:       "checkpoints".to_string(),
            mode:                 EmbeddingMode::Learned,
            glove_path:           None,
            trainable_embeddings: false,
            max_words:            10_000,
            max_len:              100,
            embedding_dim:        100,
            hidden_size:          32,
            training_samples:     None,
            validation_samples:   10_000,
            batch_size:           32,
            epochs:               10,
            lr:                   1e-3,
            optimizer:            OptimizerKind::RmsProp,
            seed:                 42,
        }
    }
}

impl TrainConfig {
    /// Reject settings that would fail later in the pipeline
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_words > 2, "max_words must be greater than 2 (two ids are reserved)");
        ensure!(self.max_len > 0, "max_len must be greater than 0");
        ensure!(self.embedding_dim > 0, "embedding_dim must be greater than 0");
        ensure!(self.batch_size > 0, "batch_size must be greater than 0");
        if self.mode == EmbeddingMode::Glove && self.glove_path.is_none() {
            bail!("glove mode needs --glove-path");
        }
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<Vec<EpochMetrics>> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load training reviews ─────────────────────────────────────
        let train_dir = Path::new(&cfg.data_dir).join("train");
        let reviews   = ImdbLoader::new(train_dir.to_string_lossy()).load_all()?;
        ensure!(
            !reviews.is_empty(),
            "No training reviews found under '{}'",
            train_dir.display()
        );

        // ── Step 2: Train / validation split ──────────────────────────────────
        let (train_reviews, val_reviews) = split_holdout(
            reviews,
            cfg.validation_samples,
            cfg.training_samples,
            cfg.seed,
        );
        ensure!(
            !train_reviews.is_empty(),
            "No training reviews left after holding out {} for validation",
            cfg.validation_samples
        );
        tracing::info!(
            "Split: {} train, {} validation",
            train_reviews.len(),
            val_reviews.len()
        );

        // ── Step 3: Vocabulary from the training split only ───────────────────
        let vocab = training_vocabulary(&train_reviews, cfg.max_words);

        // ── Step 4: Save tokenizer for prediction ─────────────────────────────
        let tokenizer = TokenizerStore::new(&cfg.checkpoint_dir).save(&vocab)?;
        let encoder   = ReviewEncoder::new(tokenizer, cfg.max_words, cfg.max_len);

        // ── Step 5: Encode ────────────────────────────────────────────────────
        let train_samples = encode_reviews(&encoder, &train_reviews)?;
        let val_samples   = encode_reviews(&encoder, &val_reviews)?;

        // ── Step 6: Optional test split ───────────────────────────────────────
        let test_dir     = Path::new(&cfg.data_dir).join("test");
        let test_reviews = ImdbLoader::new(test_dir.to_string_lossy()).load_all()?;
        let test = if test_reviews.is_empty() {
            None
        } else {
            Some(ReviewDataset::new(encode_reviews(&encoder, &test_reviews)?))
        };

        // ── Step 7: Pretrained embedding matrix ───────────────────────────────
        let matrix = match cfg.mode {
            EmbeddingMode::Glove => Some(glove_matrix(cfg, &vocab)?),
            _ => None,
        };

        // ── Step 8: Save config for prediction ────────────────────────────────
        let ckpt_manager = CheckpointManager::create(&cfg.checkpoint_dir)?;
        ckpt_manager.save_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

        // ── Step 9: Train ─────────────────────────────────────────────────────
        let data = TrainingData {
            train: ReviewDataset::new(train_samples),
            valid: ReviewDataset::new(val_samples),
            test,
        };
        tracing::info!("{} training reviews are positive", data.train.positive_count());
        let history = run_training(cfg, data, &ckpt_manager, &metrics, matrix)?;

        tracing::info!("Metrics written to '{}'", metrics.csv_path().display());
        Ok(history)
    }
}

/// Vocabulary counted over `reviews` only, so held-out reviews
/// never influence which words get their own index.
pub fn training_vocabulary(reviews: &[Review], max_words: usize) -> Vocabulary {
    let preprocessor = Preprocessor::new();
    let documents: Vec<Vec<String>> = reviews
        .iter()
        .map(|r| preprocessor.words(&r.text))
        .collect();
    build_vocabulary(&documents, max_words)
}

fn encode_reviews(encoder: &ReviewEncoder, reviews: &[Review]) -> Result<Vec<ReviewSample>> {
    reviews
        .iter()
        .map(|r| {
            Ok(ReviewSample {
                token_ids: encoder.encode(&r.text)?,
                label:     r.sentiment.as_label(),
            })
        })
        .collect()
}

/// Load the GloVe file named in `cfg` and build the matrix for `vocab`.
pub fn glove_matrix(cfg: &TrainConfig, vocab: &Vocabulary) -> Result<EmbeddingMatrix> {
    let path = cfg
        .glove_path
        .as_deref()
        .context("glove mode needs --glove-path")?;
    let vectors = GloveLoader::new(path, cfg.embedding_dim).load()?;
    ensure!(
        !vectors.is_empty(),
        "No {}-d vectors found in '{}'",
        cfg.embedding_dim,
        path
    );

    let matrix = build_embedding_matrix(
        vocab.max_words(),
        cfg.embedding_dim,
        vocab.word_index(),
        &vectors,
    )?;
    Ok(matrix)
}

/// Encoder for an already-trained checkpoint directory
pub fn encoder_for(cfg: &TrainConfig, tokenizer: Tokenizer) -> ReviewEncoder {
    ReviewEncoder::new(tokenizer, cfg.max_words, cfg.max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("one-hot".parse::<EmbeddingMode>(), Ok(EmbeddingMode::OneHot));
        assert_eq!("glove".parse::<EmbeddingMode>(), Ok(EmbeddingMode::Glove));
        assert!("word2vec".parse::<EmbeddingMode>().is_err());
        assert_eq!(EmbeddingMode::OneHot.to_string(), "one-hot");
        assert_eq!("rmsprop".parse::<OptimizerKind>(), Ok(OptimizerKind::RmsProp));
    }

    #[test]
    fn test_config_json_uses_kebab_case_modes() {
        let cfg  = TrainConfig { mode: EmbeddingMode::OneHot, ..TrainConfig::default() };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"mode\":\"one-hot\""));
        assert!(json.contains("\"optimizer\":\"rmsprop\""));
    }

    #[test]
    fn test_validate() {
        assert!(TrainConfig::default().validate().is_ok());

        let glove_without_path = TrainConfig {
            mode: EmbeddingMode::Glove,
            ..TrainConfig::default()
        };
        assert!(glove_without_path.validate().is_err());

        let tiny_vocab = TrainConfig { max_words: 2, ..TrainConfig::default() };
        assert!(tiny_vocab.validate().is_err());
    }

    #[test]
    fn test_vocabulary_ignores_held_out_reviews() {
        use crate::domain::review::Sentiment;

        let reviews: Vec<Review> = (0..10)
            .map(|i| Review {
                source:    format!("{i}.txt"),
                text:      format!("common word{i}"),
                sentiment: Sentiment::Positive,
            })
            .collect();
        let (train, val) = split_holdout(reviews, 4, None, 7);
        let vocab = training_vocabulary(&train, 100);

        assert!(vocab.get("common").is_some());
        for r in &train {
            let own = r.text.split(' ').nth(1).unwrap();
            assert!(vocab.get(own).is_some());
        }
        for r in &val {
            let own = r.text.split(' ').nth(1).unwrap();
            assert_eq!(vocab.get(own), None);
        }
    }

    #[test]
    fn test_glove_matrix_rejects_empty_file() {
        let dir = std::env::temp_dir()
            .join(format!("sentiment-glove-empty-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("vectors.txt");
        // Only vectors of the wrong width
        std::fs::write(&path, "good 0.5 0.5 0.5\n").unwrap();

        let cfg = TrainConfig {
            mode: EmbeddingMode::Glove,
            glove_path: Some(path.to_string_lossy().into_owned()),
            embedding_dim: 2,
            ..TrainConfig::default()
        };
        let vocab = Vocabulary::from_ranked_words(["good"], 4);
        assert!(glove_matrix(&cfg, &vocab).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_glove_matrix_from_file() {
        let dir = std::env::temp_dir()
            .join(format!("sentiment-glove-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("vectors.txt");
        std::fs::write(&path, "good 0.5 0.5\nbad -0.5 -0.5\nmalformed 1\n").unwrap();

        let cfg = TrainConfig {
            mode: EmbeddingMode::Glove,
            glove_path: Some(path.to_string_lossy().into_owned()),
            embedding_dim: 2,
            ..TrainConfig::default()
        };
        let vocab  = Vocabulary::from_ranked_words(["good", "film", "bad"], 4);
        let matrix = glove_matrix(&cfg, &vocab).unwrap();

        // good=2, film=3, bad=4 (beyond cap 4)
        assert_eq!(matrix.shape(), (4, 2));
        assert_eq!(matrix.row(2), &[0.5, 0.5]);
        assert_eq!(matrix.row(3), &[0.0, 0.0]);
        assert_eq!(matrix.populated_rows(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
