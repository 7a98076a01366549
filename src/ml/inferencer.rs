// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::Result;
use burn::prelude::*;
use burn::tensor::activation::sigmoid;

use crate::application::train_use_case::{EmbeddingMode, TrainConfig};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{
    EmbeddingClassifier, MultiHotClassifier, MultiHotClassifierConfig, SentimentModel,
};
use crate::ml::trainer::embedding_config;

enum LoadedModel<B: Backend> {
    MultiHot(MultiHotClassifier<B>),
    Embedding(EmbeddingClassifier<B>),
}

pub struct Inferencer<B: Backend = burn::backend::Wgpu> {
    model:  LoadedModel<B>,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    /// Rebuild the architecture described by `cfg` and load the
    /// latest checkpoint into it.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        cfg:          &TrainConfig,
        device:       B::Device,
    ) -> Result<Self> {
        let model = match cfg.mode {
            EmbeddingMode::OneHot => {
                let model: MultiHotClassifier<B> =
                    MultiHotClassifierConfig::new(cfg.max_words).init(&device);
                LoadedModel::MultiHot(ckpt_manager.load_model(model, &device)?)
            }
            // A frozen GloVe embedding is restored from the checkpoint
            // like any other weight, so both modes load the same way.
            EmbeddingMode::Learned | EmbeddingMode::Glove => {
                let model: EmbeddingClassifier<B> = embedding_config(cfg).init(&device);
                LoadedModel::Embedding(ckpt_manager.load_model(model, &device)?)
            }
        };
        tracing::info!("Model loaded from checkpoint ({} mode)", cfg.mode);
        Ok(Self { model, device })
    }

    /// Probability that the padded sequence `token_ids` is a
    /// positive review.
    pub fn predict(&self, token_ids: &[u32]) -> f32 {
        let ids: Vec<i32> = token_ids.iter().map(|&x| x as i32).collect();
        let input = Tensor::<B, 1, Int>::from_ints(ids.as_slice(), &self.device)
            .reshape([1, ids.len()]);

        let logits = match &self.model {
            LoadedModel::MultiHot(m)  => m.forward(input),
            LoadedModel::Embedding(m) => m.forward(input),
        };
        sigmoid(logits).into_scalar().elem::<f32>()
    }
}
