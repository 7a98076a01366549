// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, built on `clap`.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `train`    — trains a classifier on the IMDB reviews
//   2. `predict`  — loads a checkpoint and scores a review
//   3. `coverage` — checks a GloVe file against the vocabulary
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, CoverageArgs, PredictArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "sentiment-embeddings",
    version = "0.1.0",
    about = "Classify IMDB review sentiment with one-hot, learned or GloVe word embeddings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Predict(args)  => run_predict(args),
            Commands::Coverage(args) => run_coverage(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting {} training on reviews in: {}", args.mode, args.data_dir);

    let checkpoint_dir = args.checkpoint_dir.clone();
    let history = TrainUseCase::new(args.into()).execute()?;

    if let Some(last) = history.last() {
        println!(
            "Training complete. Final val_acc={:.1}%. Checkpoint saved to '{}'.",
            last.val_acc * 100.0,
            checkpoint_dir
        );
    }
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;
    use crate::domain::{review::Sentiment, traits::SentimentPredictor};

    let use_case = PredictUseCase::new(&args.checkpoint_dir)?;
    let p        = use_case.predict(&args.text)?;

    println!("\n{:?} (p(positive) = {:.3})", Sentiment::from_probability(p), p);
    Ok(())
}

fn run_coverage(args: CoverageArgs) -> Result<()> {
    use crate::application::coverage_use_case::glove_coverage;

    let report = glove_coverage(&args.checkpoint_dir, &args.glove_path, args.embedding_dim)?;
    println!(
        "{} of {} vocabulary rows have a {}-d pretrained vector ({:.1}%)",
        report.covered,
        report.vocabulary_cap.saturating_sub(2),
        report.embedding_dim,
        report.ratio() * 100.0,
    );
    Ok(())
}
