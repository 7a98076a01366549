// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// Scores a single review with a trained checkpoint:
//   1. Read train_config.json to learn mode and sizes
//   2. Load tokenizer.json and build the same encoder
//   3. Load the latest weights
//   4. Encode the text and return sigmoid(logit)

use anyhow::Result;

use crate::application::train_use_case::encoder_for;
use crate::data::encoder::ReviewEncoder;
use crate::domain::traits::SentimentPredictor;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    encoder:    ReviewEncoder,
    inferencer: Inferencer,
}

impl PredictUseCase {
    pub fn new(checkpoint_dir: &str) -> Result<Self> {
        let ckpt       = CheckpointManager::open(checkpoint_dir);
        let cfg        = ckpt.load_config()?;
        let tokenizer  = TokenizerStore::new(checkpoint_dir).load()?;
        let encoder    = encoder_for(&cfg, tokenizer);
        let device     = burn::backend::wgpu::WgpuDevice::default();
        let inferencer = Inferencer::from_checkpoint(&ckpt, &cfg, device)?;
        Ok(Self { encoder, inferencer })
    }
}

impl SentimentPredictor for PredictUseCase {
    fn predict(&self, text: &str) -> Result<f32> {
        let ids = self.encoder.encode(text)?;
        Ok(self.inferencer.predict(&ids))
    }
}
