// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands `train`, `predict` and `coverage`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::{EmbeddingMode, OptimizerKind, TrainConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a sentiment classifier on the IMDB reviews
    Train(TrainArgs),

    /// Score a review with a trained checkpoint
    Predict(PredictArgs),

    /// Report how much of the trained vocabulary a GloVe file covers
    Coverage(CoverageArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Root of the aclImdb corpus (must contain train/, may contain test/)
    #[arg(long, default_value = "data/aclImdb")]
    pub data_dir: String,

    /// Directory to save checkpoints, tokenizer, config and metrics
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Input representation: one-hot, learned or glove
    #[arg(long, default_value = "learned")]
    pub mode: EmbeddingMode,

    /// GloVe text file (e.g. glove.6B.100d.txt), required for --mode glove
    #[arg(long)]
    pub glove_path: Option<String>,

    /// Fine-tune the pretrained embeddings instead of freezing them
    #[arg(long)]
    pub trainable: bool,

    /// Vocabulary cap — only the most frequent words get their own id
    #[arg(long, default_value_t = 10_000)]
    pub max_words: usize,

    /// Reviews are cut / padded to this many words
    #[arg(long, default_value_t = 100)]
    pub max_len: usize,

    /// Embedding size; must match the GloVe file in glove mode
    #[arg(long, default_value_t = 100)]
    pub embedding_dim: usize,

    /// Width of the hidden layer after the embedding
    #[arg(long, default_value_t = 32)]
    pub hidden_size: usize,

    /// Train on at most this many reviews (e.g. 200 for the small-data experiment)
    #[arg(long)]
    pub training_samples: Option<usize>,

    /// Reviews held out for validation
    #[arg(long, default_value_t = 10_000)]
    pub validation_samples: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// adam or rmsprop
    #[arg(long, default_value = "rmsprop")]
    pub optimizer: OptimizerKind,

    /// Seed for the train/validation shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir:             a.data_dir,
            checkpoint_dir:       a.checkpoint_dir,
            mode:                 a.mode,
            glove_path:           a.glove_path,
            trainable_embeddings: a.trainable,
            max_words:            a.max_words,
            max_len:              a.max_len,
            embedding_dim:        a.embedding_dim,
            hidden_size:          a.hidden_size,
            training_samples:     a.training_samples,
            validation_samples:   a.validation_samples,
            batch_size:           a.batch_size,
            epochs:               a.epochs,
            lr:                   a.lr,
            optimizer:            a.optimizer,
            seed:                 a.seed,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The review text to classify
    #[arg(long)]
    pub text: String,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}

/// All arguments for the `coverage` command
#[derive(Args, Debug)]
pub struct CoverageArgs {
    /// GloVe text file to check
    #[arg(long)]
    pub glove_path: String,

    #[arg(long, default_value_t = 100)]
    pub embedding_dim: usize,

    /// Directory holding the trained tokenizer and config
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
