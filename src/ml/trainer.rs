// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + validation loop using Burn's DataLoader.
//
//   - Training uses MyBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns the model on MyInnerBackend (Wgpu)
//   - Validation / test batchers must also use MyInnerBackend
//
// The loop itself is generic over the backend and the model so
// the same code trains the multi-hot and the embedding models,
// and so tests can train on the CPU NdArray backend.
//
// Loss is binary cross-entropy on logits; a review counts as
// predicted positive when its logit is > 0 (probability > 0.5).
//
// Reference: Burn Book §5 (Training)

use anyhow::{anyhow, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    nn::loss::BinaryCrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer, RmsPropConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::{EmbeddingMode, OptimizerKind, TrainConfig};
use crate::data::{
    batcher::{ReviewBatch, ReviewBatcher},
    dataset::ReviewDataset,
};
use crate::domain::embedding::EmbeddingMatrix;
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{best_epoch, EpochMetrics, MetricsLogger},
};
use crate::ml::model::{
    EmbeddingClassifierConfig, MultiHotClassifierConfig, SentimentModel,
};

type MyBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

/// Everything the loop trains and evaluates on.
pub struct TrainingData {
    pub train: ReviewDataset,
    pub valid: ReviewDataset,
    /// Held-out test split, evaluated once after the last epoch
    pub test:  Option<ReviewDataset>,
}

/// Train on the default WGPU device.
pub fn run_training(
    cfg:          &TrainConfig,
    data:         TrainingData,
    ckpt_manager: &CheckpointManager,
    metrics:      &MetricsLogger,
    matrix:       Option<EmbeddingMatrix>,
) -> Result<Vec<EpochMetrics>> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_on::<MyBackend>(cfg, data, ckpt_manager, metrics, matrix, device)
}

/// Build the model for `cfg.mode` and train it on backend `B`.
pub fn train_on<B: AutodiffBackend>(
    cfg:          &TrainConfig,
    data:         TrainingData,
    ckpt_manager: &CheckpointManager,
    metrics:      &MetricsLogger,
    matrix:       Option<EmbeddingMatrix>,
    device:       B::Device,
) -> Result<Vec<EpochMetrics>> {
    match cfg.mode {
        EmbeddingMode::OneHot => {
            let model = MultiHotClassifierConfig::new(cfg.max_words).init::<B>(&device);
            tracing::info!("Model ready: multi-hot input of {} words", cfg.max_words);
            with_optimizer(cfg, model, data, ckpt_manager, metrics, device)
        }
        EmbeddingMode::Learned => {
            let model = embedding_config(cfg).init::<B>(&device);
            tracing::info!("Model ready: {}-d embedding learned from scratch", cfg.embedding_dim);
            with_optimizer(cfg, model, data, ckpt_manager, metrics, device)
        }
        EmbeddingMode::Glove => {
            let matrix = matrix
                .ok_or_else(|| anyhow!("GloVe mode needs a pretrained embedding matrix"))?;
            let model = embedding_config(cfg)
                .init_with_weights::<B>(&matrix, cfg.trainable_embeddings, &device)?;
            tracing::info!(
                "Model ready: {}-d pretrained embedding ({})",
                cfg.embedding_dim,
                if cfg.trainable_embeddings { "trainable" } else { "frozen" }
            );
            with_optimizer(cfg, model, data, ckpt_manager, metrics, device)
        }
    }
}

pub fn embedding_config(cfg: &TrainConfig) -> EmbeddingClassifierConfig {
    EmbeddingClassifierConfig::new(cfg.max_words, cfg.max_len, cfg.embedding_dim)
        .with_hidden_size(cfg.hidden_size)
}

fn with_optimizer<B, M>(
    cfg:          &TrainConfig,
    model:        M,
    data:         TrainingData,
    ckpt_manager: &CheckpointManager,
    metrics:      &MetricsLogger,
    device:       B::Device,
) -> Result<Vec<EpochMetrics>>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + SentimentModel<B>,
    M::InnerModule: SentimentModel<B::InnerBackend>,
{
    match cfg.optimizer {
        OptimizerKind::Adam => {
            let optim = AdamConfig::new().with_epsilon(1e-8).init();
            fit(cfg, model, optim, data, ckpt_manager, metrics, device)
        }
        OptimizerKind::RmsProp => {
            let optim = RmsPropConfig::new().init();
            fit(cfg, model, optim, data, ckpt_manager, metrics, device)
        }
    }
}

fn fit<B, M, O>(
    cfg:          &TrainConfig,
    mut model:    M,
    mut optim:    O,
    data:         TrainingData,
    ckpt_manager: &CheckpointManager,
    metrics:      &MetricsLogger,
    device:       B::Device,
) -> Result<Vec<EpochMetrics>>
where
    B: AutodiffBackend,
    M: AutodiffModule<B> + SentimentModel<B>,
    M::InnerModule: SentimentModel<B::InnerBackend>,
    O: Optimizer<M, B>,
{
    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_loader = DataLoaderBuilder::new(ReviewBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(data.train);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_loader = DataLoaderBuilder::new(ReviewBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(data.valid);

    let loss_fn = BinaryCrossEntropyLossConfig::new()
        .with_logits(true)
        .init(&device);

    let mut history = Vec::with_capacity(cfg.epochs);

    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        let mut correct  = 0usize;
        let mut seen     = 0usize;

        for batch in train_loader.iter() {
            let logits = model.forward(batch.token_ids);
            let loss   = loss_fn.forward(logits.clone(), batch.labels.clone());

            seen     += batch.labels.dims()[0];
            correct  += count_correct(logits, batch.labels);
            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
        let train_acc  = if seen    > 0 { correct as f64 / seen as f64 } else { 0.0 };

        // ── Validation phase ──────────────────────────────────────────────────
        let (val_loss, val_acc) = evaluate(&model.valid(), &*val_loader);

        println!(
            "Epoch {:>3}/{} | loss={:.4} | acc={:.1}% | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, train_loss, train_acc * 100.0, val_loss, val_acc * 100.0,
        );

        let m = EpochMetrics::new(epoch, train_loss, train_acc, val_loss, val_acc);
        metrics.log(&m)?;
        ckpt_manager.save_model(&model, epoch)?;
        history.push(m);
    }

    if let Some(best) = best_epoch(&history) {
        tracing::info!(
            "Best validation accuracy {:.1}% at epoch {}",
            best.val_acc * 100.0,
            best.epoch
        );
    }

    // ── Test phase ────────────────────────────────────────────────────────────
    if let Some(test) = data.test {
        let test_loader = DataLoaderBuilder::new(ReviewBatcher::<B::InnerBackend>::new(device))
            .batch_size(cfg.batch_size)
            .num_workers(1)
            .build(test);
        let (test_loss, test_acc) = evaluate(&model.valid(), &*test_loader);
        println!("Test | loss={:.4} | acc={:.1}%", test_loss, test_acc * 100.0);
    }

    tracing::info!("Training complete!");
    Ok(history)
}

/// Average loss and accuracy of `model` over every batch of `loader`.
/// An empty loader gives (NaN, 0.0).
pub fn evaluate<B: Backend, M: SentimentModel<B>>(
    model:  &M,
    loader: &dyn DataLoader<ReviewBatch<B>>,
) -> (f64, f64) {
    let mut loss_sum = 0.0f64;
    let mut batches  = 0usize;
    let mut correct  = 0usize;
    let mut seen     = 0usize;

    for batch in loader.iter() {
        let logits  = model.forward(batch.token_ids);
        let loss_fn = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .init(&logits.device());

        loss_sum += loss_fn
            .forward(logits.clone(), batch.labels.clone())
            .into_scalar()
            .elem::<f64>();
        batches += 1;
        seen    += batch.labels.dims()[0];
        correct += count_correct(logits, batch.labels);
    }

    let loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
    let acc  = if seen    > 0 { correct as f64 / seen as f64 } else { 0.0 };
    (loss, acc)
}

/// Reviews whose thresholded logit matches the label
fn count_correct<B: Backend>(logits: Tensor<B, 1>, labels: Tensor<B, 1, Int>) -> usize {
    logits
        .greater_elem(0.0)
        .int()
        .equal(labels)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use crate::data::dataset::ReviewSample;
    use crate::ml::model::{EmbeddingClassifier, SentimentModel};

    type TestBackend = Autodiff<NdArray>;

    fn scratch_dir(name: &str) -> String {
        let dir = std::env::temp_dir()
            .join(format!("sentiment-trainer-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.to_string_lossy().into_owned()
    }

    // Positive reviews contain word 2, negative ones word 3
    fn toy_samples(n: usize) -> Vec<ReviewSample> {
        (0..n)
            .map(|i| {
                let label = (i % 2) as u8;
                let word  = if label == 1 { 2 } else { 3 };
                ReviewSample { token_ids: vec![0, 4, word, word], label }
            })
            .collect()
    }

    fn toy_config(mode: EmbeddingMode, checkpoint_dir: &str) -> TrainConfig {
        TrainConfig {
            checkpoint_dir: checkpoint_dir.to_string(),
            mode,
            max_words: 6,
            max_len: 4,
            embedding_dim: 2,
            hidden_size: 4,
            batch_size: 4,
            epochs: 2,
            ..TrainConfig::default()
        }
    }

    fn toy_data() -> TrainingData {
        TrainingData {
            train: ReviewDataset::new(toy_samples(16)),
            valid: ReviewDataset::new(toy_samples(8)),
            test:  Some(ReviewDataset::new(toy_samples(4))),
        }
    }

    #[test]
    fn test_count_correct() {
        let device = Default::default();
        let logits = Tensor::<NdArray, 1>::from_floats([2.0, -1.0, 0.5, -3.0], &device);
        let labels = Tensor::<NdArray, 1, Int>::from_ints([1, 0, 0, 1], &device);
        assert_eq!(count_correct(logits, labels), 2);
    }

    #[test]
    fn test_one_hot_training_records_every_epoch() {
        let dir     = scratch_dir("onehot");
        let cfg     = toy_config(EmbeddingMode::OneHot, &dir);
        let ckpt    = CheckpointManager::create(&dir).unwrap();
        let metrics = MetricsLogger::new(&dir).unwrap();

        let history = train_on::<TestBackend>(
            &cfg, toy_data(), &ckpt, &metrics, None, Default::default(),
        ).unwrap();

        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|m| m.train_loss.is_finite()));
        assert!(history.iter().all(|m| (0.0..=1.0).contains(&m.val_acc)));

        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_glove_mode_requires_matrix() {
        let dir     = scratch_dir("nomatrix");
        let cfg     = toy_config(EmbeddingMode::Glove, &dir);
        let ckpt    = CheckpointManager::create(&dir).unwrap();
        let metrics = MetricsLogger::new(&dir).unwrap();

        let result = train_on::<TestBackend>(
            &cfg, toy_data(), &ckpt, &metrics, None, Default::default(),
        );
        assert!(result.is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    // Rows as they appear in glove.6B, not rounded to any format
    fn glove_rows() -> EmbeddingMatrix {
        let mut matrix = EmbeddingMatrix::zeros(6, 2);
        matrix.row_mut(2).copy_from_slice(&[0.418, 0.24968]);
        matrix.row_mut(3).copy_from_slice(&[-0.41242, 0.1217]);
        matrix.row_mut(4).copy_from_slice(&[0.34527, -0.044457]);
        matrix
    }

    #[test]
    fn test_frozen_embedding_is_not_updated() {
        let dir     = scratch_dir("frozen");
        let cfg     = toy_config(EmbeddingMode::Glove, &dir);
        let ckpt    = CheckpointManager::create(&dir).unwrap();
        let metrics = MetricsLogger::new(&dir).unwrap();

        let matrix = glove_rows();

        train_on::<TestBackend>(
            &cfg, toy_data(), &ckpt, &metrics, Some(matrix.clone()), Default::default(),
        ).unwrap();

        let fresh: EmbeddingClassifier<NdArray> =
            embedding_config(&cfg).init(&Default::default());
        let trained = ckpt.load_model(fresh, &Default::default()).unwrap();
        let weights: Vec<f32> = trained.embedding.weight.val().into_data().to_vec().unwrap();
        assert_eq!(weights, matrix.as_slice());

        // The checkpoint still classifies a batch
        let ids = Tensor::<NdArray, 1, Int>::from_ints([0, 4, 2, 2], &Default::default())
            .reshape([1, 4]);
        assert_eq!(trained.forward(ids).dims(), [1]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_trainable_embedding_is_fine_tuned() {
        let dir     = scratch_dir("trainable");
        let cfg     = TrainConfig {
            trainable_embeddings: true,
            hidden_size: 16,
            lr: 1e-2,
            ..toy_config(EmbeddingMode::Glove, &dir)
        };
        let ckpt    = CheckpointManager::create(&dir).unwrap();
        let metrics = MetricsLogger::new(&dir).unwrap();
        let matrix  = glove_rows();

        train_on::<TestBackend>(
            &cfg, toy_data(), &ckpt, &metrics, Some(matrix.clone()), Default::default(),
        ).unwrap();

        let fresh: EmbeddingClassifier<NdArray> =
            embedding_config(&cfg).init(&Default::default());
        let trained = ckpt.load_model(fresh, &Default::default()).unwrap();
        let weights: Vec<f32> = trained.embedding.weight.val().into_data().to_vec().unwrap();

        // Words 2, 3 and 4 occur in every batch, so their rows move
        let moved = (2..5).any(|row| {
            weights[row * 2..row * 2 + 2] != *matrix.row(row)
        });
        assert!(moved, "trainable embedding was never updated");

        std::fs::remove_dir_all(&dir).ok();
    }
}
