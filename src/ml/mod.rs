// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn framework specific code for the
// models, the training loop and inference. (data/batcher.rs and
// data/dataset.rs implement Burn's data traits, and
// infra/checkpoint.rs uses its recorder.)
//
//   model.rs      — The two classifiers
//                   • MultiHotClassifier: bag-of-words 0/1 input
//                     → two 16-unit ReLU layers → 1 logit
//                   • EmbeddingClassifier: embedding lookup
//                     (learned, or initialised from GloVe and
//                     optionally frozen) → flatten → ReLU layer
//                     → 1 logit
//
//   trainer.rs    — The training loop
//                   Forward pass, binary cross-entropy, backward
//                   pass, optimiser step, validation, metrics
//                   and checkpoint saving per epoch
//
//   inferencer.rs — Loads a checkpoint and scores encoded reviews
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Chollet (2017) Deep Learning with Python §6.1

/// Classifier architectures
pub mod model;

/// Training loop with validation, metrics and checkpointing
pub mod trainer;

/// Inference engine — loads a checkpoint and predicts sentiment
pub mod inferencer;
